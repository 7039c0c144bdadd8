//! Time Utilities
//!
//! Parsing of Cabrillo QSO date and time fields. Cabrillo carries the date as
//! `YYYY-MM-DD` and the time as `HHMM` (UTC); some loggers append seconds.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Parse a Cabrillo date (YYYY-MM-DD)
pub fn parse_cabrillo_date(date_str: &str) -> Option<NaiveDate> {
    let clean = date_str.trim();
    if clean.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(clean, "%Y-%m-%d").ok()
}

/// Parse a Cabrillo time (HHMM or HHMMSS)
pub fn parse_cabrillo_time(time_str: &str) -> Option<NaiveTime> {
    let clean = time_str.trim();
    if !clean.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match clean.len() {
        4 => NaiveTime::parse_from_str(clean, "%H%M").ok(),
        6 => NaiveTime::parse_from_str(clean, "%H%M%S").ok(),
        _ => None,
    }
}

/// Format a time back to the Cabrillo field, keeping seconds only when present
pub fn format_cabrillo_time(time: &NaiveTime) -> String {
    use chrono::Timelike;
    if time.second() == 0 {
        time.format("%H%M").to_string()
    } else {
        time.format("%H%M%S").to_string()
    }
}

/// Format a date/time pair the way validation messages quote it
pub fn format_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format("%Y-%m-%d %H%MZ").to_string()
}
