//! The normalized departure record.

use serde::Serialize;

use super::TransportMode;

/// One upcoming vehicle departure, flattened from the provider's stop event.
///
/// Field names are the JSON snapshot's keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Departure {
    /// Route label shown in the coloured cell (e.g. "T1", "M52").
    pub line_label: Option<String>,

    /// Destination with the "via" clause removed and "Stn" expanded.
    pub destination: String,

    /// Intermediate stop from the destination's "via" clause. Never the
    /// name of the stop this departure was queried for.
    pub via: Option<String>,

    /// Whole minutes until departure, truncated toward zero. Negative once
    /// the vehicle has left.
    pub minutes_to_departure: i64,

    pub mode_name: TransportMode,

    /// `#RRGGBB` accent for the dashboard.
    pub accent_color: String,

    /// Whether the time is live-tracked rather than timetabled.
    pub is_realtime_controlled: bool,

    pub trip_id: Option<String>,
}
