use super::model::Event;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

// Note: every field is optional on the wire, a malformed record must not fail the whole list
#[derive(Debug, Deserialize)]
pub struct EventResponse {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub location: String,
    #[serde(rename = "imageUrl", default, deserialize_with = "deserialize_str")]
    pub image_url: String,
    #[serde(default, deserialize_with = "deserialize_str_vec")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_str_vec")]
    pub attendees: Vec<String>,
}

impl EventResponse {
    pub fn to_model(self) -> Event {
        if self.id.is_empty() {
            warn!("Event '{}' has no id", self.title);
        }

        Event {
            id: self.id,
            title: self.title,
            description: self.description,
            date: self.date,
            location: self.location,
            image_url: Some(self.image_url).filter(|url| !url.is_empty()),
            tags: self.tags,
            attendees: self.attendees,
        }
    }
}

/// Body of a failed request
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "deserialize_str")]
    pub error: String,
    #[serde(default, deserialize_with = "deserialize_str")]
    pub message: String,
}

impl ErrorResponse {
    pub fn into_message(self) -> Option<String> {
        [self.error, self.message]
            .into_iter()
            .find(|message| !message.is_empty())
    }
}

fn deserialize_id<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn deserialize_str<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn deserialize_str_vec<'de, D>(d: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(d)? {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|value| match value {
                Value::String(s) => Some(s),
                _unknown => {
                    warn!("Skipping non-string entry: {}", _unknown);
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn should_deserialize_event_list() {
        let dto = serde_json::from_str::<Vec<EventResponse>>(
            r##"
              [{
                "_id": "6751b2f1c7a9e2d3f4a5b6c7",
                "title": "Jazz Night",
                "description": "An evening of live jazz by the river",
                "date": "2025-03-01T18:00:00.000Z",
                "location": "Riverside Park",
                "imageUrl": "https://example.com/jazz.jpg",
                "tags": ["music", "outdoor", "music"],
                "attendees": ["ana@example.com", "Rui"],
                "__v": 2
              }]"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let event = dto.unwrap().into_iter().next().unwrap().to_model();

        assert_eq!(event.id, "6751b2f1c7a9e2d3f4a5b6c7");
        assert_eq!(event.title, "Jazz Night");
        assert_eq!(event.image_url.as_deref(), Some("https://example.com/jazz.jpg"));
        assert_eq!(event.tags, vec!["music", "outdoor", "music"]);
        assert_eq!(event.attendee_count(), 2);
    }

    #[test_log::test]
    fn should_deserialize_event_without_optional_fields() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{ "_id": "abc", "title": "Code Jam", "date": "2025-04-12T10:00" }"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let event = dto.unwrap().to_model();

        assert_eq!(event.description, "");
        assert_eq!(event.location, "");
        assert_eq!(event.image_url, None);
        assert!(event.tags.is_empty());
        assert!(event.attendees.is_empty());
    }

    #[test_log::test]
    fn should_deserialize_null_fields_as_empty() {
        let dto = serde_json::from_str::<EventResponse>(
            r##"{ "id": 7, "title": null, "imageUrl": "", "tags": null, "attendees": [null, "Rui"] }"##,
        );

        assert!(dto.is_ok(), "{:?}", dto);

        let event = dto.unwrap().to_model();

        assert_eq!(event.id, "7");
        assert_eq!(event.title, "");
        assert_eq!(event.image_url, None);
        assert!(event.tags.is_empty());
        assert_eq!(event.attendees, vec!["Rui"]);
    }

    #[test_log::test]
    fn should_prefer_error_field_in_error_body() {
        let body = serde_json::from_str::<ErrorResponse>(
            r##"{ "error": "Event not found", "message": "ignored" }"##,
        )
        .unwrap();

        assert_eq!(body.into_message().as_deref(), Some("Event not found"));
    }

    #[test_log::test]
    fn should_fall_back_to_message_field_in_error_body() {
        let body = serde_json::from_str::<ErrorResponse>(r##"{ "message": "Title is required" }"##)
            .unwrap();

        assert_eq!(body.into_message().as_deref(), Some("Title is required"));
    }

    #[test_log::test]
    fn should_have_no_message_in_empty_error_body() {
        let body = serde_json::from_str::<ErrorResponse>("{}").unwrap();

        assert_eq!(body.into_message(), None);
    }
}
