//! Transport for NSW departure monitor client.
//!
//! This module provides an HTTP client for the trip planner's departure
//! monitor (an EFA `rapidJSON` endpoint) and the conversion of its nested
//! stop events into flat [`Departure`](crate::domain::Departure) records.
//!
//! Key characteristics of the departure monitor:
//! - One request covers one stop; the mode filter is expressed as a list of
//!   `exclMOT_<class>` flags naming the modes to leave *out*
//! - Times are UTC ISO 8601 strings; a live estimate, when present, sits
//!   beside the planned time
//! - Any key may be missing at any level of nesting

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TfnswClient, TfnswConfig, departure_monitor_params,
    excluded_mode_params,
};
pub use convert::{
    ConversionError, convert_departure_monitor, convert_stop_event, expand_abbreviations,
    split_destination,
};
pub use error::TfnswError;
pub use mock::MockTfnswClient;
pub use types::{
    DepartureMonitorResponse, Place, Product, StopEvent, StopEventProperties, Transportation,
};
