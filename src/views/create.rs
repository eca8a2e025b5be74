use super::Route;
use crate::events::api::{APIError, EventsClient};
use crate::events::model::NewEvent;
use std::fmt::{self, Display, Formatter};
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

pub const REQUIRED_FIELDS_MISSING: &str =
    "Please fill all required fields (Title, Description, Date, Location).";
pub const CREATE_SUCCESS: &str = "Event created successfully!";

#[derive(strum::IntoStaticStr, strum::EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    Description,
    Date,
    Location,
}

/// Creation form state. Fields are kept exactly as typed.
#[derive(Debug, Default)]
pub struct CreateEventForm {
    pub title: String,
    pub description: String,
    /// Value of a datetime input, e.g. "2025-03-01T18:00"
    pub date: String,
    pub location: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub tag_input: String,
    pub error: Option<String>,
    pub toast: Option<String>,
}

impl CreateEventForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tag_input(&mut self, tag: &str) {
        self.tag_input = tag.to_string();
    }

    /// Adds the trimmed tag input, unless it is empty or already present
    pub fn add_tag(&mut self) {
        let tag = self.tag_input.trim().to_string();
        if tag.is_empty() {
            return;
        }

        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }

        self.tag_input.clear();
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    fn field(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::Title => &self.title,
            RequiredField::Description => &self.description,
            RequiredField::Date => &self.date,
            RequiredField::Location => &self.location,
        }
    }

    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::iter()
            .filter(|field| self.field(*field).is_empty())
            .collect()
    }

    pub fn payload(&self) -> Result<NewEvent, APIError> {
        let missing_fields = self.missing_fields();

        if !missing_fields.is_empty() {
            let names: Vec<&'static str> = missing_fields.into_iter().map(Into::into).collect();
            warn!("Missing required fields: {}", names.join(", "));

            return Err(APIError::Validation(REQUIRED_FIELDS_MISSING.to_string()));
        }

        Ok(NewEvent {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            location: self.location.clone(),
            image_url: self.image_url.clone(),
            tags: self.tags.clone(),
        })
    }

    /// Returns where to navigate on success. Failures are kept in `error`.
    #[instrument(skip_all, fields(title = %self.title))]
    pub async fn submit(&mut self, client: &impl EventsClient) -> Option<Route> {
        self.error = None;

        let result = match self.payload() {
            Ok(payload) => client.create_event(&payload).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(event) => {
                info!("Created event {}", event.id);
                self.toast = Some(CREATE_SUCCESS.to_string());
                Some(Route::Home)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for CreateEventForm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Create New Event")?;

        if let Some(error) = &self.error {
            writeln!(f, "{}", error)?;
        }

        writeln!(f, "Title *: {}", self.title)?;
        writeln!(f, "Description *: {}", self.description)?;
        writeln!(f, "Date & Time *: {}", self.date)?;
        writeln!(f, "Location *: {}", self.location)?;
        writeln!(f, "Image URL (optional): {}", self.image_url)?;
        writeln!(f, "Tags: {}", self.tags.join(", "))
    }
}
