use super::home::render_tags;
use super::{Confirmation, LoadState, Route};
use crate::events::api::EventsClient;
use crate::events::format::format_event_date;
use crate::events::model::Event;
use chrono_tz::Tz;
use std::fmt::{self, Display, Formatter};
use tracing::{info, instrument, warn};

pub const RSVP_REQUIRED: &str = "Please enter your name or email to RSVP.";
pub const RSVP_SUCCESS: &str = "RSVP submitted successfully!";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this event?";
pub const DELETE_SUCCESS: &str = "Event deleted successfully!";
pub const RSVP_IN_FLIGHT: &str = "Your RSVP is still being submitted.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted(Route),
    Failed(String),
}

/// Details page of a single event, with its RSVP form and delete action
pub struct EventDetailsView {
    pub id: String,
    pub event: LoadState<Event>,
    pub attendee_input: String,
    pub rsvp_error: Option<String>,
    pub toast: Option<String>,
    rsvp_pending: bool,
    time_zone: Option<Tz>,
}

impl EventDetailsView {
    pub fn new(id: &str, time_zone: Option<Tz>) -> Self {
        Self {
            id: id.to_string(),
            event: LoadState::Loading,
            attendee_input: String::new(),
            rsvp_error: None,
            toast: None,
            rsvp_pending: false,
            time_zone,
        }
    }

    #[instrument(skip(self, client), fields(id = %self.id))]
    pub async fn load(&mut self, client: &impl EventsClient) {
        self.event = LoadState::Loading;
        self.event = LoadState::from_result(client.get_event(&self.id).await);
    }

    pub fn set_attendee_input(&mut self, attendee: &str) {
        self.attendee_input = attendee.to_string();
    }

    /// The RSVP button stays disabled while a submission is in flight
    pub fn can_rsvp(&self) -> bool {
        !self.rsvp_pending
    }

    #[instrument(skip(self, client), fields(id = %self.id))]
    pub async fn rsvp(&mut self, client: &impl EventsClient) {
        if self.rsvp_pending {
            warn!("RSVP already in flight");
            self.rsvp_error = Some(RSVP_IN_FLIGHT.to_string());
            return;
        }

        self.rsvp_error = None;

        let attendee = self.attendee_input.trim().to_string();
        if attendee.is_empty() {
            self.rsvp_error = Some(RSVP_REQUIRED.to_string());
            return;
        }

        let result = {
            let _pending = PendingRsvp::start(&mut self.rsvp_pending);
            client.rsvp(&self.id, &attendee).await
        };

        match result {
            Ok(updated_event) => {
                info!("RSVP registered, {} attendees", updated_event.attendee_count());

                self.event = LoadState::Loaded(updated_event);
                self.attendee_input.clear();
                self.toast = Some(RSVP_SUCCESS.to_string());
            }
            Err(err) => {
                warn!("RSVP failed: {}", err);
                self.rsvp_error = Some(err.to_string());
            }
        }
    }

    #[instrument(skip(self, client, confirmation), fields(id = %self.id))]
    pub async fn delete(
        &mut self,
        client: &impl EventsClient,
        confirmation: &impl Confirmation,
    ) -> DeleteOutcome {
        if !confirmation.confirm(DELETE_PROMPT) {
            info!("Delete cancelled");
            return DeleteOutcome::Cancelled;
        }

        match client.delete_event(&self.id).await {
            Ok(()) => {
                self.toast = Some(DELETE_SUCCESS.to_string());
                DeleteOutcome::Deleted(Route::Home)
            }
            Err(err) => {
                warn!("Delete failed: {}", err);
                DeleteOutcome::Failed(err.to_string())
            }
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for EventDetailsView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(toast) = &self.toast {
            writeln!(f, "{}\n", toast)?;
        }

        let event = match &self.event {
            LoadState::Loading => return writeln!(f, "Loading event..."),
            LoadState::Failed(message) => return writeln!(f, "{}", message),
            LoadState::Loaded(event) => event,
        };

        writeln!(f, "{}", event.title)?;
        writeln!(f, "{}", format_event_date(&event.date, self.time_zone))?;
        writeln!(f, "@ {}", event.location)?;

        if let Some(image_url) = &event.image_url {
            writeln!(f, "Image: {}", image_url)?;
        }

        writeln!(f, "\n{}\n", event.description)?;

        if !event.tags.is_empty() {
            writeln!(f, "{}\n", render_tags(&event.tags))?;
        }

        if let Some(rsvp_error) = &self.rsvp_error {
            writeln!(f, "RSVP: {}\n", rsvp_error)?;
        }

        writeln!(f, "Attendees ({})", event.attendee_count())?;

        if event.attendees.is_empty() {
            return writeln!(f, "No attendees yet. Be the first to RSVP!");
        }

        for attendee in &event.attendees {
            writeln!(f, "- {}", attendee)?;
        }

        Ok(())
    }
}

/// Holds the RSVP control disabled, released even if the request is abandoned
struct PendingRsvp<'a>(&'a mut bool);

impl<'a> PendingRsvp<'a> {
    fn start(pending: &'a mut bool) -> Self {
        *pending = true;
        Self(pending)
    }
}

impl Drop for PendingRsvp<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
