//! Date parsing and formatting helpers
//!
//! Dates are stored as RFC 3339 UTC strings so that lexicographic order in
//! the database matches chronological order. Clients may send either a bare
//! date (`2024-01-01`) or a full RFC 3339 timestamp.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Current instant as the stored string form
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Normalize a client-supplied date into the stored RFC 3339 UTC form.
///
/// Accepts `YYYY-MM-DD` (midnight UTC) or any RFC 3339 timestamp. Fixed
/// microsecond precision keeps string order equal to time order.
pub fn normalize_date(input: &str) -> Option<String> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0)?.and_utc();
        return Some(dt.to_rfc3339_opts(SecondsFormat::Micros, true));
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// Human-readable form used in chat notifications, e.g. `01/02/2024 13:30`
pub fn format_human(stored: &str) -> String {
    match DateTime::parse_from_rfc3339(stored) {
        Ok(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => stored.to_string(),
    }
}
