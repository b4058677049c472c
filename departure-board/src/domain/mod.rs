//! Domain types for the departure board.
//!
//! Configuration of what to monitor (stops and modes), the closed set of
//! transport modes, and the flat `Departure` record every renderer consumes.

mod departure;
mod mode;
mod stop;
mod time;

pub use departure::Departure;
pub use mode::{TransportMode, accent_color};
pub use stop::{ModeConfig, StopConfig};
pub use time::{TimeError, minutes_until, parse_provider_time};
