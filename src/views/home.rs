use super::{LoadState, Route};
use crate::events::api::EventsClient;
use crate::events::filter::{collect_tags, filter_events};
use crate::events::format::format_event_date;
use crate::events::model::{Event, FilterCriteria};
use chrono_tz::Tz;
use std::fmt::{self, Display, Formatter};
use tracing::{info, instrument};

const DESCRIPTION_PREVIEW_LENGTH: usize = 80;
pub const NO_EVENTS_HINT: &str = "No events found. Try changing your search or create a new event.";

/// Listing page: every event, narrowed by a search term and a tag
pub struct HomeView {
    pub events: LoadState<Vec<Event>>,
    pub criteria: FilterCriteria,
    time_zone: Option<Tz>,
}

impl HomeView {
    pub fn new(time_zone: Option<Tz>) -> Self {
        Self {
            events: LoadState::Loading,
            criteria: FilterCriteria::default(),
            time_zone,
        }
    }

    #[instrument(skip_all)]
    pub async fn load(&mut self, client: &impl EventsClient) {
        self.events = LoadState::Loading;
        self.events = LoadState::from_result(client.list_events().await);

        if let Some(events) = self.events.data() {
            info!("Loaded {} events", events.len());
        }
    }

    pub fn set_search_term(&mut self, search_term: &str) {
        self.criteria.search_term = search_term.to_string();
    }

    /// An empty tag selects "All"
    pub fn select_tag(&mut self, tag: &str) {
        self.criteria.selected_tag = tag.to_string();
    }

    pub fn tags(&self) -> Vec<String> {
        self.events
            .data()
            .map(|events| collect_tags(events))
            .unwrap_or_default()
    }

    pub fn visible_events(&self) -> Vec<&Event> {
        match self.events.data() {
            Some(events) => filter_events(events, &self.criteria),
            None => Vec::new(),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn render_tag_bar(&self) -> String {
        let selected_tag = &self.criteria.selected_tag;
        let mut buttons = vec![tag_button("All", selected_tag.is_empty())];

        buttons.extend(
            self.tags()
                .iter()
                .map(|tag| tag_button(tag, tag == selected_tag)),
        );

        format!("Tags: {}", buttons.join(" "))
    }

    fn write_card(&self, f: &mut Formatter<'_>, event: &Event) -> fmt::Result {
        let date = format_event_date(&event.date, self.time_zone);
        if !date.is_empty() {
            writeln!(f, "{}", date)?;
        }

        writeln!(f, "{}", event.title)?;
        writeln!(
            f,
            "{}",
            voca_rs::chop::truncate(&event.description, DESCRIPTION_PREVIEW_LENGTH, "...")
        )?;
        writeln!(f, "@ {}", event.location)?;

        if !event.tags.is_empty() {
            writeln!(f, "{}", render_tags(&event.tags))?;
        }

        writeln!(
            f,
            "{} attendee(s) - View Details: {}",
            event.attendee_count(),
            Route::Event(event.id.clone())
        )
    }
}

impl Display for HomeView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Events    + Create Event ({})", Route::NewEvent)?;

        if !self.criteria.search_term.is_empty() {
            writeln!(f, "Search: \"{}\"", self.criteria.search_term)?;
        }

        writeln!(f, "{}", self.render_tag_bar())?;

        match &self.events {
            LoadState::Loading => writeln!(f, "\nLoading events...")?,
            LoadState::Failed(message) => writeln!(f, "\nFailed to load events: {}", message)?,
            LoadState::Loaded(_) => {}
        }

        let visible_events = self.visible_events();

        for event in &visible_events {
            writeln!(f)?;
            self.write_card(f, event)?;
        }

        if !self.events.is_loading() && visible_events.is_empty() {
            writeln!(f, "\n{}", NO_EVENTS_HINT)?;
        }

        Ok(())
    }
}

fn tag_button(label: &str, selected: bool) -> String {
    if selected {
        format!("[{}]", label)
    } else {
        label.to_string()
    }
}

pub(crate) fn render_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}
