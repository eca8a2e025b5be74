use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Raw timestamp as sent by the API, only used for display
    pub date: String,
    pub location: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub attendees: Vec<String>,
}

impl Event {
    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }
}

/// Payload of a creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub image_url: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RsvpRequest<'a> {
    pub attendee: &'a str,
}

/// Search term and selected tag of the listing. Empty strings disable each part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub selected_tag: String,
}

impl FilterCriteria {
    pub fn new(search_term: impl Into<String>, selected_tag: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            selected_tag: selected_tag.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.selected_tag.is_empty()
    }
}
