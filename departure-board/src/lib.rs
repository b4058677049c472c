//! Public-transport departure board.
//!
//! Fetches live departures for a handful of stops from the Transport for
//! NSW departure monitor and publishes them as a terminal listing, a JSON
//! snapshot and a self-refreshing HTML dashboard.

pub mod app;
pub mod board;
pub mod config;
pub mod domain;
pub mod render;
pub mod tfnsw;
