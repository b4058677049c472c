//! Assembling the departure board.
//!
//! Walks the configured stops one (stop, mode) pair at a time, collects
//! whatever each pair yields, then orders and windows the result.

use std::future::Future;

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{Departure, ModeConfig, StopConfig};
use crate::tfnsw::{MockTfnswClient, TfnswClient, TfnswError};

/// Inclusive range of minutes-to-departure shown on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeWindow {
    pub min_minutes: i64,
    pub max_minutes: i64,
}

impl TimeWindow {
    pub fn new(min_minutes: i64, max_minutes: i64) -> Self {
        Self {
            min_minutes,
            max_minutes,
        }
    }

    pub fn contains(&self, minutes: i64) -> bool {
        (self.min_minutes..=self.max_minutes).contains(&minutes)
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::new(0, 120)
    }
}

/// Something that can produce departures for a (stop, mode) pair.
///
/// This abstraction allows the board to be assembled from recorded data.
pub trait DepartureSource {
    fn departures(
        &self,
        stop: &StopConfig,
        mode: &ModeConfig,
    ) -> impl Future<Output = Result<Vec<Departure>, TfnswError>>;
}

impl DepartureSource for TfnswClient {
    fn departures(
        &self,
        stop: &StopConfig,
        mode: &ModeConfig,
    ) -> impl Future<Output = Result<Vec<Departure>, TfnswError>> {
        self.get_departures(stop, mode)
    }
}

impl DepartureSource for MockTfnswClient {
    fn departures(
        &self,
        stop: &StopConfig,
        mode: &ModeConfig,
    ) -> impl Future<Output = Result<Vec<Departure>, TfnswError>> {
        std::future::ready(self.get_departures(stop, mode))
    }
}

/// Fetch departures for every configured (stop, mode) pair, in order.
///
/// Pairs are queried sequentially. A failing pair is logged and contributes
/// nothing; it never aborts the run.
pub async fn collect_departures<S: DepartureSource>(
    source: &S,
    stops: &[StopConfig],
) -> Vec<Departure> {
    let mut all = Vec::new();

    for stop in stops {
        for mode in &stop.modes {
            match source.departures(stop, mode).await {
                Ok(departures) => {
                    info!(
                        stop = %stop.name,
                        stop_id = %stop.stop_id,
                        mode = %mode.mode,
                        count = departures.len(),
                        "fetched departures"
                    );
                    all.extend(departures);
                }
                Err(e) => {
                    warn!(
                        stop = %stop.name,
                        stop_id = %stop.stop_id,
                        mode = %mode.mode,
                        "no departures for stop: {e}"
                    );
                }
            }
        }
    }

    all
}

/// Order departures soonest first and keep those inside `window`.
///
/// The sort is stable, so departures due in the same minute keep the order
/// they were collected in.
pub fn assemble_board(mut departures: Vec<Departure>, window: TimeWindow) -> Vec<Departure> {
    departures.sort_by_key(|d| d.minutes_to_departure);
    departures.retain(|d| window.contains(d.minutes_to_departure));
    departures
}

/// Build the board from a source: collect, order, window.
pub async fn build_board<S: DepartureSource>(
    source: &S,
    stops: &[StopConfig],
    window: TimeWindow,
) -> Vec<Departure> {
    assemble_board(collect_departures(source, stops).await, window)
}
