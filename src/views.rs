pub mod create;
pub mod details;
pub mod home;

use crate::events::api::APIError;
use std::fmt::{Display, Formatter};

/// State of the data a view loads when it becomes active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Failed(String),
    Loaded(T),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, APIError>) -> Self {
        match result {
            Ok(data) => LoadState::Loaded(data),
            Err(err) => LoadState::Failed(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Where the user ends up after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    NewEvent,
    Event(String),
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::NewEvent => write!(f, "/events/new"),
            Route::Event(id) => write!(f, "/events/{}", id),
        }
    }
}

/// Asks the user to confirm a destructive action
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything, for non-interactive use
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
