//! Departure monitor response DTOs.
//!
//! These map the provider's `rapidJSON` output. Everything is optional
//! because the provider drops keys freely at every level of nesting; the
//! only thing the envelope must have for a response to count as usable is
//! the top-level `stopEvents` array, and even that is checked by the client
//! rather than by serde.
//!
//! Stop events are kept as raw JSON in the envelope and decoded one at a
//! time, so a single event of the wrong shape can't sink the whole response.
//! Only the keys the board reads are modelled; serde ignores the rest.

use serde::Deserialize;
use serde_json::Value;

/// Top-level departure monitor response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureMonitorResponse {
    /// API version string echoed by the provider.
    pub version: Option<String>,

    /// Undecoded stop events, in the provider's order. `None` when the key
    /// is absent.
    pub stop_events: Option<Vec<Value>>,
}

/// A single scheduled vehicle visit to the queried stop.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopEvent {
    /// Timetabled departure (UTC, `YYYY-MM-DDTHH:MM:SSZ`).
    pub departure_time_planned: Option<String>,

    /// Live estimate, when the vehicle is tracked.
    pub departure_time_estimated: Option<String>,

    /// Whether the estimate comes from live tracking.
    pub is_realtime_controlled: Option<bool>,

    pub transportation: Option<Transportation>,

    pub properties: Option<StopEventProperties>,
}

impl StopEvent {
    /// Decode one raw stop event.
    pub fn from_value(raw: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    /// Best available departure time: the estimate if non-empty, else planned.
    pub fn departure_time(&self) -> Option<&str> {
        self.departure_time_estimated
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.departure_time_planned.as_deref())
    }

    /// Short route label (e.g. "T1", "M52", "F3").
    pub fn route_label(&self) -> Option<&str> {
        self.transportation.as_ref()?.disassembled_name.as_deref()
    }

    /// Full destination string, possibly containing a " via " clause.
    pub fn destination_name(&self) -> Option<&str> {
        self.transportation
            .as_ref()?
            .destination
            .as_ref()?
            .name
            .as_deref()
    }

    /// Provider product class (1 = train, 5 = bus, ...).
    pub fn product_class(&self) -> Option<i64> {
        self.transportation.as_ref()?.product.as_ref()?.class
    }

    /// Realtime trip identifier.
    pub fn trip_id(&self) -> Option<&str> {
        self.properties.as_ref()?.realtime_trip_id.as_deref()
    }
}

/// Product class of a raw stop event, read without decoding the rest of it.
pub fn raw_product_class(raw: &Value) -> Option<i64> {
    raw.pointer("/transportation/product/class")?.as_i64()
}

/// Route label of a raw stop event, for logging events that won't decode.
pub fn raw_route_label(raw: &Value) -> Option<&str> {
    raw.pointer("/transportation/disassembledName")?.as_str()
}

/// The service operating the stop event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transportation {
    /// Short route label.
    pub disassembled_name: Option<String>,

    pub product: Option<Product>,

    pub destination: Option<Place>,
}

/// Product (mode) metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    pub class: Option<i64>,
}

/// Destination of a service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Place {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopEventProperties {
    #[serde(rename = "RealtimeTripId")]
    pub realtime_trip_id: Option<String>,
}
