//! Monitored stops and the modes queried at each.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::TransportMode;

/// A physical stop the dashboard shows departures for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StopConfig {
    /// Display name. Also used to suppress a redundant "via" clause.
    pub name: String,

    /// Provider-assigned stop identifier, passed through as `name_dm`.
    pub stop_id: String,

    /// Modes to query, in display order.
    pub modes: Vec<ModeConfig>,
}

impl StopConfig {
    pub fn new(name: impl Into<String>, stop_id: impl Into<String>, modes: Vec<ModeConfig>) -> Self {
        Self {
            name: name.into(),
            stop_id: stop_id.into(),
            modes,
        }
    }
}

/// One transport mode to query at a stop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModeConfig {
    #[serde(rename = "mode_name")]
    pub mode: TransportMode,

    /// Provider class code as written in the config file. When present it
    /// must agree with `mode`; see [`ModeConfig::mode_number`].
    #[serde(default, rename = "mode_number")]
    pub declared_mode_number: Option<u8>,

    /// Route labels never shown for this mode at this stop.
    #[serde(default)]
    pub routes_to_exclude: BTreeSet<String>,
}

impl ModeConfig {
    pub fn new(mode: TransportMode) -> Self {
        Self {
            mode,
            declared_mode_number: None,
            routes_to_exclude: BTreeSet::new(),
        }
    }

    /// Exclude the given route labels.
    pub fn excluding<I, S>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.routes_to_exclude
            .extend(routes.into_iter().map(Into::into));
        self
    }

    /// The provider class code for this mode.
    ///
    /// Configuration validation guarantees any declared number matches, so
    /// this is always derived from the mode itself.
    pub fn mode_number(&self) -> Option<u8> {
        self.mode.class_code()
    }
}
