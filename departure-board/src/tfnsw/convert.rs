//! Conversion from departure monitor DTOs to domain types.
//!
//! Each stop event is flattened into a [`Departure`] independently. An event
//! that can't be converted is logged and skipped so one bad record doesn't
//! cost the whole stop its board.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::{
    Departure, TransportMode, accent_color, minutes_until, parse_provider_time,
};

use super::types::{DepartureMonitorResponse, StopEvent, raw_route_label};

/// Separator between a destination and its intermediate stop.
const VIA_SEPARATOR: &str = " via ";

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Stop event didn't have the expected shape
    #[error("malformed stop event: {0}")]
    Malformed(String),
}

/// Convert a departure monitor response into departures, in provider order.
///
/// Events whose route label is in `routes_to_exclude` are dropped. `stop_name`
/// is the display name of the queried stop, used to suppress a "via" clause
/// that only names the stop itself.
///
/// Fails only when the envelope has no `stopEvents` at all.
pub fn convert_departure_monitor(
    response: &DepartureMonitorResponse,
    stop_name: &str,
    routes_to_exclude: &BTreeSet<String>,
    now: DateTime<Utc>,
) -> Result<Vec<Departure>, ConversionError> {
    let events = response
        .stop_events
        .as_deref()
        .ok_or(ConversionError::MissingField("stopEvents"))?;

    let mut departures = Vec::with_capacity(events.len());

    for (index, raw) in events.iter().enumerate() {
        let event = match StopEvent::from_value(raw) {
            Ok(event) => event,
            Err(e) => {
                let e = ConversionError::Malformed(e.to_string());
                warn!(
                    stop = stop_name,
                    index,
                    route = raw_route_label(raw).unwrap_or("?"),
                    "skipping stop event: {e}"
                );
                continue;
            }
        };

        if let Some(route) = event.route_label()
            && routes_to_exclude.contains(route)
        {
            debug!(stop = stop_name, route, "skipping excluded route");
            continue;
        }

        match convert_stop_event(&event, stop_name, now) {
            Ok(departure) => departures.push(departure),
            Err(e) => {
                warn!(
                    stop = stop_name,
                    index,
                    route = event.route_label().unwrap_or("?"),
                    "skipping stop event: {e}"
                );
            }
        }
    }

    Ok(departures)
}

/// Convert a single stop event.
pub fn convert_stop_event(
    event: &StopEvent,
    stop_name: &str,
    now: DateTime<Utc>,
) -> Result<Departure, ConversionError> {
    let raw_destination = event
        .destination_name()
        .ok_or(ConversionError::MissingField("transportation.destination.name"))?;
    let (destination, via) = split_destination(raw_destination, stop_name);

    let departure_time = event
        .departure_time()
        .ok_or(ConversionError::MissingField("departureTimePlanned"))?;
    let departure_time = parse_provider_time(departure_time)
        .map_err(|_| ConversionError::InvalidTime(departure_time.to_string()))?;

    let line_label = event.route_label().map(str::to_string);

    let mode = event
        .product_class()
        .map(TransportMode::from_class)
        .unwrap_or(TransportMode::Unknown);

    Ok(Departure {
        accent_color: accent_color(line_label.as_deref(), mode).to_string(),
        line_label,
        destination,
        via,
        minutes_to_departure: minutes_until(departure_time, now),
        mode_name: mode,
        is_realtime_controlled: event.is_realtime_controlled.unwrap_or(false),
        trip_id: event.trip_id().map(str::to_string),
    })
}

/// Split a provider destination into its primary destination and via clause.
///
/// The via clause is the text between the first and second `" via "`
/// separators. It is dropped when it is just the queried stop's own name.
///
/// ```
/// use departure_board::tfnsw::split_destination;
///
/// let (dest, via) = split_destination("Parramatta via Westmead", "Central");
/// assert_eq!(dest, "Parramatta");
/// assert_eq!(via.as_deref(), Some("Westmead"));
///
/// let (_, via) = split_destination("Parramatta via Westmead", "Westmead");
/// assert_eq!(via, None);
/// ```
pub fn split_destination(raw: &str, stop_name: &str) -> (String, Option<String>) {
    let mut parts = raw.split(VIA_SEPARATOR);
    // split always yields at least one item
    let head = parts.next().unwrap_or(raw);
    let via = parts
        .next()
        .filter(|via| *via != stop_name)
        .map(str::to_string);

    (expand_abbreviations(head), via)
}

/// Expand the provider's "Stn" abbreviation.
///
/// This is a plain substring replacement, so "Stn" inside a longer word is
/// expanded too.
pub fn expand_abbreviations(destination: &str) -> String {
    destination.replace("Stn", "Station")
}
