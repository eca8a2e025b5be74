// Shared by the integration tests; not every test file uses every helper
#![allow(dead_code)]

use meetup_events::events::api::{APIError, EventsClient};
use meetup_events::events::model::{Event, NewEvent};
use meetup_events::views::Confirmation;
use std::sync::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Get(String),
    Create(NewEvent),
    Rsvp(String, String),
    Delete(String),
}

/// In-memory events service that records every request it receives
pub struct FakeEventsClient {
    pub events: Mutex<Vec<Event>>,
    pub calls: Mutex<Vec<Call>>,
    pub failure: Option<(u16, String)>,
}

impl FakeEventsClient {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
            calls: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            failure: Some((status, message.to_string())),
            ..Self::new(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), APIError> {
        self.calls.lock().unwrap().push(call);

        match &self.failure {
            Some((status, message)) => Err(APIError::Http {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn find(&self, id: &str) -> Result<Event, APIError> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|event| event.id == id)
            .cloned()
            .ok_or_else(|| APIError::NotFound("Event not found".to_string()))
    }
}

impl EventsClient for FakeEventsClient {
    async fn list_events(&self) -> Result<Vec<Event>, APIError> {
        self.record(Call::List)?;

        Ok(self.events.lock().unwrap().clone())
    }

    async fn get_event(&self, id: &str) -> Result<Event, APIError> {
        self.record(Call::Get(id.to_string()))?;

        self.find(id)
    }

    async fn create_event(&self, event: &NewEvent) -> Result<Event, APIError> {
        self.record(Call::Create(event.clone()))?;

        let created = Event {
            id: uuid::Uuid::new_v4().to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            location: event.location.clone(),
            image_url: Some(event.image_url.clone()).filter(|url| !url.is_empty()),
            tags: event.tags.clone(),
            attendees: Vec::new(),
        };
        self.events.lock().unwrap().push(created.clone());

        Ok(created)
    }

    async fn rsvp(&self, id: &str, attendee: &str) -> Result<Event, APIError> {
        self.record(Call::Rsvp(id.to_string(), attendee.to_string()))?;

        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| APIError::NotFound("Event not found".to_string()))?;
        event.attendees.push(attendee.to_string());

        Ok(event.clone())
    }

    async fn delete_event(&self, id: &str) -> Result<(), APIError> {
        self.record(Call::Delete(id.to_string()))?;

        self.events.lock().unwrap().retain(|event| event.id != id);

        Ok(())
    }
}

/// Events service that never answers
pub struct HangingEventsClient;

impl EventsClient for HangingEventsClient {
    async fn list_events(&self) -> Result<Vec<Event>, APIError> {
        std::future::pending().await
    }

    async fn get_event(&self, _id: &str) -> Result<Event, APIError> {
        std::future::pending().await
    }

    async fn create_event(&self, _event: &NewEvent) -> Result<Event, APIError> {
        std::future::pending().await
    }

    async fn rsvp(&self, _id: &str, _attendee: &str) -> Result<Event, APIError> {
        std::future::pending().await
    }

    async fn delete_event(&self, _id: &str) -> Result<(), APIError> {
        std::future::pending().await
    }
}

/**
Answers a single HTTP request on a local port with the given status and body.
Returns the base URL to point `EventsAPI` at and a handle yielding the raw request received.
*/
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let request = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;

        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        request
    });

    (base_url, request)
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let read = stream.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let Some(header_end) = buffer.windows(4).position(|window| window == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|length| length.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if buffer.len() >= header_end + 4 + content_length {
            break;
        }
    }

    String::from_utf8_lossy(&buffer).into_owned()
}

pub struct Answer(pub bool);

impl Confirmation for Answer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

pub fn event(id: &str, title: &str, tags: &[&str]) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{} description", title),
        date: "2025-03-01T18:00:00.000Z".to_string(),
        location: "Lisbon".to_string(),
        image_url: None,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        attendees: Vec::new(),
    }
}

pub fn sample_events() -> Vec<Event> {
    vec![
        event("1", "Jazz Night", &["music"]),
        event("2", "Code Jam", &["tech"]),
    ]
}
