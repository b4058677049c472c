//! Provider timestamps and time-to-departure.
//!
//! The departure monitor reports instants as UTC strings such as
//! `"2025-06-02T08:14:00Z"`. Everything the dashboard shows is a whole
//! number of minutes relative to "now".

use chrono::{DateTime, NaiveDateTime, Utc};

/// Error returned when a provider timestamp can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp {value:?}: {reason}")]
pub struct TimeError {
    value: String,
    reason: &'static str,
}

/// Parse a provider timestamp as a UTC instant.
///
/// Accepts the provider's usual `YYYY-MM-DDTHH:MM:SSZ` shape and falls back
/// to full RFC 3339 (offsets, fractional seconds).
///
/// # Examples
///
/// ```
/// use departure_board::domain::parse_provider_time;
///
/// let t = parse_provider_time("2025-06-02T08:14:00Z").unwrap();
/// assert_eq!(t.to_rfc3339(), "2025-06-02T08:14:00+00:00");
///
/// assert!(parse_provider_time("08:14").is_err());
/// ```
pub fn parse_provider_time(s: &str) -> Result<DateTime<Utc>, TimeError> {
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ") {
        return Ok(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| TimeError {
            value: s.to_string(),
            reason: "expected an ISO 8601 UTC timestamp",
        })
}

/// Whole minutes from `now` until `at`, truncated toward zero.
///
/// 90 seconds ahead is 1 minute; 30 seconds in the past is 0; 61 seconds
/// in the past is -1.
pub fn minutes_until(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (at - now).num_minutes()
}
