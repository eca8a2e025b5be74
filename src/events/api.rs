use super::dto::{ErrorResponse, EventResponse};
use super::model::{Event, NewEvent, RsvpRequest};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

pub const DEFAULT_EVENTS_API_URL: &str = "https://meet-up-events-backend.vercel.app";

pub const LIST_EVENTS_FAILED: &str = "The events service returned an error";
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the events service";
pub const FETCH_EVENT_FAILED: &str = "Failed to fetch event";
pub const CREATE_EVENT_FAILED: &str = "Failed to create event";
pub const RSVP_FAILED: &str = "Failed to RSVP";
pub const DELETE_EVENT_FAILED: &str = "Failed to delete event";
pub const EVENT_NOT_FOUND: &str = "Event not found";

/// Every variant displays as a message meant for the user
#[derive(Debug, Error)]
pub enum APIError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidResponse(String),
    #[error("{0}")]
    Request(#[from] reqwest::Error),
}

/// Operations of the remote events API
#[allow(async_fn_in_trait)]
pub trait EventsClient {
    async fn list_events(&self) -> Result<Vec<Event>, APIError>;

    async fn get_event(&self, id: &str) -> Result<Event, APIError>;

    async fn create_event(&self, event: &NewEvent) -> Result<Event, APIError>;

    /// Returns the event with the attendee appended
    async fn rsvp(&self, id: &str, attendee: &str) -> Result<Event, APIError>;

    async fn delete_event(&self, id: &str) -> Result<(), APIError>;
}

pub struct EventsAPI {
    client: Client,
    base_url: String,
}

impl EventsAPI {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    fn event_url(&self, id: &str) -> String {
        format!("{}/events/{}", self.base_url, id)
    }

    async fn read_event(response: Response, fallback: &str) -> Result<Event, APIError> {
        let json_response = response.text().await?;

        match serde_json::from_str::<EventResponse>(&json_response) {
            Ok(dto) => Ok(dto.to_model()),
            Err(e) => {
                error!("Response parse failed: {:?}", e);
                Err(APIError::InvalidResponse(fallback.to_string()))
            }
        }
    }
}

impl Default for EventsAPI {
    fn default() -> Self {
        Self::new(DEFAULT_EVENTS_API_URL)
    }
}

impl EventsClient for EventsAPI {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_events(&self) -> Result<Vec<Event>, APIError> {
        info!("Getting all events");

        let response = self.client.get(self.events_url()).send().await?;
        let json_response = error_for_status(response, LIST_EVENTS_FAILED)
            .await?
            .text()
            .await?;

        parse_event_list(&json_response)
    }

    #[tracing::instrument(skip(self))]
    async fn get_event(&self, id: &str) -> Result<Event, APIError> {
        info!("Getting event");

        let response = self.client.get(self.event_url(id)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("Event does not exist");
            return Err(APIError::NotFound(EVENT_NOT_FOUND.to_string()));
        }

        let response = error_for_status(response, FETCH_EVENT_FAILED).await?;

        Self::read_event(response, FETCH_EVENT_FAILED)
            .await
            .map_err(|err| match err {
                APIError::InvalidResponse(_) => APIError::NotFound(EVENT_NOT_FOUND.to_string()),
                other => other,
            })
    }

    #[tracing::instrument(skip(self, event), fields(title = %event.title))]
    async fn create_event(&self, event: &NewEvent) -> Result<Event, APIError> {
        info!("Creating event");

        let response = self
            .client
            .post(self.events_url())
            .json(event)
            .send()
            .await?;
        let response = error_for_status(response, CREATE_EVENT_FAILED).await?;

        Self::read_event(response, CREATE_EVENT_FAILED).await
    }

    #[tracing::instrument(skip(self))]
    async fn rsvp(&self, id: &str, attendee: &str) -> Result<Event, APIError> {
        info!("Sending RSVP");

        let response = self
            .client
            .patch(format!("{}/rsvp", self.event_url(id)))
            .json(&RsvpRequest { attendee })
            .send()
            .await?;
        let response = error_for_status(response, RSVP_FAILED).await?;

        Self::read_event(response, RSVP_FAILED).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_event(&self, id: &str) -> Result<(), APIError> {
        info!("Deleting event");

        let response = self.client.delete(self.event_url(id)).send().await?;

        error_for_status(response, DELETE_EVENT_FAILED).await?;

        Ok(())
    }
}

/// Turns a non-success response into an error carrying the body's message, or the fallback
async fn error_for_status(response: Response, fallback: &str) -> Result<Response, APIError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, fallback);

    error!("Request failed with {}: {}", status, message);

    Err(APIError::Http {
        status: status.as_u16(),
        message,
    })
}

pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or_else(|| fallback.to_string())
}

pub fn parse_event_list(json_response: &str) -> Result<Vec<Event>, APIError> {
    match serde_json::from_str::<Value>(json_response) {
        Ok(Value::Array(values)) => Ok(values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<EventResponse>(value) {
                Ok(dto) => Some(dto.to_model()),
                Err(e) => {
                    warn!("Skipping event that is not an object: {}", e);
                    None
                }
            })
            .collect()),
        Ok(_) => {
            error!("Expected a list of events");
            Err(APIError::InvalidResponse(UNEXPECTED_RESPONSE.to_string()))
        }
        Err(e) => {
            error!("Response parse failed: {:?}", e);
            Err(APIError::InvalidResponse(UNEXPECTED_RESPONSE.to_string()))
        }
    }
}
