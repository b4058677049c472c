//! Replay client for running without API access.
//!
//! Loads recorded departure monitor responses from JSON files and serves
//! them as if they were live, normalized against a fixed reference instant
//! so recorded times stay meaningful.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::{Departure, ModeConfig, StopConfig};

use super::client::normalize;
use super::error::TfnswError;
use super::types::{DepartureMonitorResponse, raw_product_class};

/// Replay client that serves recorded responses from a directory.
#[derive(Debug, Clone)]
pub struct MockTfnswClient {
    /// Recorded responses, keyed by stop ID.
    responses: HashMap<String, DepartureMonitorResponse>,
    /// Instant the recordings are replayed at.
    now: DateTime<Utc>,
}

impl MockTfnswClient {
    /// Load every `{stop_id}.json` file in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>, now: DateTime<Utc>) -> Result<Self, TfnswError> {
        let data_dir = data_dir.as_ref();
        let mut responses = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            TfnswError::Replay(format!("failed to read {}: {e}", data_dir.display()))
        })?;

        for entry in entries {
            let entry = entry
                .map_err(|e| TfnswError::Replay(format!("failed to read directory entry: {e}")))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stop_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| TfnswError::Replay(format!("invalid filename: {path:?}")))?
                .to_string();

            let json = std::fs::read_to_string(&path)
                .map_err(|e| TfnswError::Replay(format!("failed to read {path:?}: {e}")))?;

            let response: DepartureMonitorResponse = serde_json::from_str(&json)
                .map_err(|e| TfnswError::Replay(format!("failed to parse {path:?}: {e}")))?;

            responses.insert(stop_id, response);
        }

        if responses.is_empty() {
            return Err(TfnswError::Replay(format!(
                "no recorded responses found in {}",
                data_dir.display()
            )));
        }

        Ok(Self { responses, now })
    }

    /// Serve departures for one (stop, mode) pair.
    ///
    /// Only events of the queried mode are kept, as the live provider would
    /// do with its `exclMOT_*` filter.
    pub fn get_departures(
        &self,
        stop: &StopConfig,
        mode: &ModeConfig,
    ) -> Result<Vec<Departure>, TfnswError> {
        let recorded = self.responses.get(&stop.stop_id).ok_or_else(|| {
            TfnswError::Replay(format!("no recorded response for stop {}", stop.stop_id))
        })?;

        let class = mode.mode_number().map(i64::from);
        let filtered = DepartureMonitorResponse {
            version: recorded.version.clone(),
            stop_events: recorded.stop_events.as_ref().map(|events| {
                events
                    .iter()
                    .filter(|e| raw_product_class(e) == class)
                    .cloned()
                    .collect()
            }),
        };

        normalize(&filtered, stop, mode, self.now)
    }

    /// Stop IDs with a recorded response.
    pub fn available_stops(&self) -> Vec<&str> {
        let mut stops: Vec<&str> = self.responses.keys().map(String::as_str).collect();
        stops.sort_unstable();
        stops
    }
}
