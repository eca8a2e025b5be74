use chrono_tz::Tz;
use tracing::Level;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// Pins the zone event dates are displayed in, the local zone otherwise
    pub time_zone: Option<Tz>,
    pub log_level: Level,
}
