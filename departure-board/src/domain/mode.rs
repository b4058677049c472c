//! Transport modes and the provider's product class codes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A category of vehicle or service.
///
/// The first seven variants are the modes the departure monitor can be asked
/// about. `Unknown` only ever comes out of normalization, when an event
/// carries a product class this table doesn't know; it cannot appear in
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Train,
    Metro,
    LightRail,
    Bus,
    Coach,
    Ferry,
    SchoolBus,
    #[serde(skip_deserializing)]
    Unknown,
}

impl TransportMode {
    /// Every mode the provider can filter on, in class-code order.
    pub const QUERYABLE: [TransportMode; 7] = [
        TransportMode::Train,
        TransportMode::Metro,
        TransportMode::LightRail,
        TransportMode::Bus,
        TransportMode::Coach,
        TransportMode::Ferry,
        TransportMode::SchoolBus,
    ];

    /// Map a provider product class to a mode.
    ///
    /// ```
    /// use departure_board::domain::TransportMode;
    ///
    /// assert_eq!(TransportMode::from_class(4), TransportMode::LightRail);
    /// assert_eq!(TransportMode::from_class(99), TransportMode::Unknown);
    /// ```
    pub fn from_class(class: i64) -> Self {
        match class {
            1 => TransportMode::Train,
            2 => TransportMode::Metro,
            4 => TransportMode::LightRail,
            5 => TransportMode::Bus,
            7 => TransportMode::Coach,
            9 => TransportMode::Ferry,
            11 => TransportMode::SchoolBus,
            _ => TransportMode::Unknown,
        }
    }

    /// The provider's product class for this mode, if it has one.
    pub fn class_code(self) -> Option<u8> {
        match self {
            TransportMode::Train => Some(1),
            TransportMode::Metro => Some(2),
            TransportMode::LightRail => Some(4),
            TransportMode::Bus => Some(5),
            TransportMode::Coach => Some(7),
            TransportMode::Ferry => Some(9),
            TransportMode::SchoolBus => Some(11),
            TransportMode::Unknown => None,
        }
    }

    /// Name used in JSON output and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Train => "train",
            TransportMode::Metro => "metro",
            TransportMode::LightRail => "light_rail",
            TransportMode::Bus => "bus",
            TransportMode::Coach => "coach",
            TransportMode::Ferry => "ferry",
            TransportMode::SchoolBus => "school_bus",
            TransportMode::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display colour for a departure, as `#RRGGBB`.
///
/// The route label is accepted so individual lines can be given their own
/// colour later; today only the mode decides.
pub fn accent_color(_line: Option<&str>, mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Train => "#F6891F",
        TransportMode::Metro => "#168388",
        TransportMode::LightRail => "#BB2043",
        TransportMode::Bus => "#009ED7",
        TransportMode::Ferry => "#648C3C",
        TransportMode::Coach | TransportMode::SchoolBus | TransportMode::Unknown => "#000000",
    }
}
