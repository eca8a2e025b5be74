use crate::config::model::Config;
use crate::events::api::DEFAULT_EVENTS_API_URL;
use chrono_tz::Tz;
use std::env;
use thiserror::Error;
use tracing::Level;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config '{name}': '{value}' is not a valid {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Reads the config from the environment, including a `.env` file if there is one
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    load_config_from(|name| env::var(name).ok())
}

pub fn load_config_from(var: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
    let api_base_url = var("EVENTS_API_URL")
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EVENTS_API_URL.to_string());

    let time_zone = match var("EVENTS_TIME_ZONE") {
        Some(value) if !value.is_empty() => Some(value.parse::<Tz>().map_err(|_| {
            ConfigError::Invalid {
                name: "EVENTS_TIME_ZONE",
                value,
                expected: "IANA time zone",
            }
        })?),
        _ => None,
    };

    let log_level = match var("LOG_LEVEL") {
        Some(value) => value.parse::<Level>().map_err(|_| ConfigError::Invalid {
            name: "LOG_LEVEL",
            value,
            expected: "log level (trace, debug, info, warn, error)",
        })?,
        None => Level::INFO,
    };

    Ok(Config {
        api_base_url,
        time_zone,
        log_level,
    })
}
