use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::debug;

const DISPLAY_FORMAT: &str = "%a, %-d %b %Y, %H:%M";

/// Formats used by datetime inputs, which carry no offset
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// ISO 8601 forms RFC 3339 rejects: no seconds, or an offset without a colon
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/**
Renders an event timestamp for display, e.g. "Sat, 1 Mar 2025, 18:00".
* time_zone: pins the display zone, otherwise the local one is used

Unknown formats render as an empty string.
*/
pub fn format_event_date(date: &str, time_zone: Option<Tz>) -> String {
    if date.trim().is_empty() {
        return String::new();
    }

    let with_offset = DateTime::parse_from_rfc3339(date).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(date, format).ok())
    });

    if let Some(date_time) = with_offset {
        return format_in_zone(date_time, time_zone);
    }

    // A bare date is shown at midnight, as written
    match NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(date, DATE_FORMAT)
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
        })
    {
        Some(date_time) => date_time.format(DISPLAY_FORMAT).to_string(),
        None => {
            debug!("Unparsable event date '{}'", date);
            String::new()
        }
    }
}

fn format_in_zone(date_time: DateTime<FixedOffset>, time_zone: Option<Tz>) -> String {
    match time_zone {
        Some(zone) => zone
            .from_utc_datetime(&date_time.naive_utc())
            .format(DISPLAY_FORMAT)
            .to_string(),
        None => date_time
            .with_timezone(&Local)
            .format(DISPLAY_FORMAT)
            .to_string(),
    }
}
