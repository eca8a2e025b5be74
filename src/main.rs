use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use meetup_events::config::env_loader::load_config;
use meetup_events::events::api::EventsAPI;
use meetup_events::tracing::setup_tracing;
use meetup_events::views::create::CreateEventForm;
use meetup_events::views::details::{DeleteOutcome, EventDetailsView};
use meetup_events::views::home::HomeView;
use meetup_events::views::{AlwaysConfirm, Confirmation};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "meetup-events")]
#[command(about = "Browse, create and RSVP to meetup events")]
struct Cli {
    /// Base URL of the events API (overrides EVENTS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, optionally narrowed by text and tag
    List {
        /// Matches title, description or location, ignoring case
        #[arg(short, long, default_value = "")]
        search: String,

        /// Exact tag to filter by
        #[arg(short, long, default_value = "")]
        tag: String,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Date and time (e.g., "2025-03-20T15:00")
        #[arg(long, default_value = "")]
        date: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long, default_value = "")]
        image_url: String,

        /// Can be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    Rsvp {
        id: String,

        /// Name or email
        attendee: String,
    },
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

struct PromptConfirmation;

impl Confirmation for PromptConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or_else(|err| {
                error!("Couldn't read confirmation: {}", err);
                false
            })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config()?;

    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url;
    }

    let loki = setup_tracing(config.log_level).await;
    debug!("Using {:?}", config);

    let api = EventsAPI::new(&config.api_base_url);

    match cli.command {
        Commands::List { search, tag } => {
            let mut view = HomeView::new(config.time_zone);
            view.set_search_term(&search);
            view.select_tag(&tag);
            view.load(&api).await;

            print!("{}", view.render());
        }
        Commands::Show { id } => {
            let mut view = EventDetailsView::new(&id, config.time_zone);
            view.load(&api).await;

            print!("{}", view.render());
        }
        Commands::Create {
            title,
            description,
            date,
            location,
            image_url,
            tags,
        } => {
            let mut form = CreateEventForm {
                title,
                description,
                date,
                location,
                image_url,
                ..CreateEventForm::new()
            };

            for tag in tags {
                form.set_tag_input(&tag);
                form.add_tag();
            }

            match form.submit(&api).await {
                Some(route) => {
                    if let Some(toast) = &form.toast {
                        println!("{}", toast);
                    }

                    let mut home = HomeView::new(config.time_zone);
                    home.load(&api).await;

                    println!("{}\n", route);
                    print!("{}", home.render());
                }
                None => print!("{}", form.render()),
            }
        }
        Commands::Rsvp { id, attendee } => {
            let mut view = EventDetailsView::new(&id, config.time_zone);
            view.load(&api).await;

            if view.event.data().is_some() {
                view.set_attendee_input(&attendee);
                view.rsvp(&api).await;
            }

            print!("{}", view.render());
        }
        Commands::Delete { id, yes } => {
            let mut view = EventDetailsView::new(&id, config.time_zone);

            let outcome = if yes {
                view.delete(&api, &AlwaysConfirm).await
            } else {
                view.delete(&api, &PromptConfirmation).await
            };

            match outcome {
                DeleteOutcome::Cancelled => println!("Nothing deleted"),
                DeleteOutcome::Deleted(route) => {
                    if let Some(toast) = &view.toast {
                        println!("{}", toast);
                    }
                    println!("{}", route);
                }
                DeleteOutcome::Failed(message) => println!("{}", message),
            }
        }
    }

    if let Some(loki) = loki {
        loki.shutdown().await;
    }

    Ok(())
}
