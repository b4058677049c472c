//! Departure monitor HTTP client.
//!
//! Queries the Transport for NSW trip planner's `departure_mon` endpoint one
//! (stop, mode) pair at a time and converts the response to domain types.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::domain::{Departure, ModeConfig, StopConfig, TransportMode};

use super::convert::convert_departure_monitor;
use super::error::TfnswError;
use super::types::DepartureMonitorResponse;

/// Default base URL for the trip planner API.
pub const DEFAULT_BASE_URL: &str = "https://api.transport.nsw.gov.au/v1/tp";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// API version the query parameters are written against.
const API_VERSION: &str = "10.2.1.42";

/// Configuration for the departure monitor client.
#[derive(Debug, Clone)]
pub struct TfnswConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TfnswConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Departure monitor API client.
#[derive(Debug, Clone)]
pub struct TfnswClient {
    http: reqwest::Client,
    base_url: String,
}

impl TfnswClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TfnswConfig) -> Result<Self, TfnswError> {
        let mut headers = HeaderMap::new();

        // The trip planner wants "apikey <key>" in the Authorization header
        let auth = HeaderValue::from_str(&format!("apikey {}", config.api_key))
            .map_err(|_| TfnswError::NotConfigured("invalid API key format".to_string()))?;
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the raw departure monitor response for one stop and mode.
    ///
    /// The reference date and time sent to the provider is the local wall
    /// clock at call time.
    pub async fn get_departure_monitor(
        &self,
        stop_id: &str,
        mode: TransportMode,
    ) -> Result<DepartureMonitorResponse, TfnswError> {
        let url = format!("{}/departure_mon", self.base_url);
        let params = departure_monitor_params(stop_id, mode, Local::now());

        debug!(stop_id, %mode, "requesting departure monitor");

        let response = self.http.get(&url).query(&params).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                stop_id,
                %mode,
                status = status.as_u16(),
                %body,
                "departure monitor request failed"
            );

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(TfnswError::Unauthorized { message: body });
            }

            return Err(TfnswError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TfnswError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// Fetch and normalize departures for one configured (stop, mode) pair.
    pub async fn get_departures(
        &self,
        stop: &StopConfig,
        mode: &ModeConfig,
    ) -> Result<Vec<Departure>, TfnswError> {
        let response = self.get_departure_monitor(&stop.stop_id, mode.mode).await?;
        normalize(&response, stop, mode, Utc::now())
    }
}

/// Normalize a response for a configured (stop, mode) pair.
pub(crate) fn normalize(
    response: &DepartureMonitorResponse,
    stop: &StopConfig,
    mode: &ModeConfig,
    now: DateTime<Utc>,
) -> Result<Vec<Departure>, TfnswError> {
    if response.stop_events.is_none() {
        return Err(TfnswError::MissingStopEvents);
    }

    convert_departure_monitor(response, &stop.name, &mode.routes_to_exclude, now).map_err(|e| {
        TfnswError::Json {
            message: e.to_string(),
            body: None,
        }
    })
}

/// Query parameters for a departure monitor request.
///
/// The provider's mode filter is exclusion-based: every known mode gets an
/// `exclMOT_<class>=true` flag except the one being queried.
pub fn departure_monitor_params(
    stop_id: &str,
    mode: TransportMode,
    at: DateTime<Local>,
) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = [
        ("outputFormat", "rapidJSON"),
        ("coordOutputFormat", "EPSG:4326"),
        ("mode", "direct"),
        ("type_dm", "stop"),
        ("name_dm", stop_id),
        ("departureMonitorMacro", "true"),
        ("TfNSWDM", "true"),
        ("version", API_VERSION),
        ("excludedMeans", "checkbox"),
        ("includeNonPassengerTrips", "false"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    params.push(("itdDate".to_string(), at.format("%Y%m%d").to_string()));
    params.push(("itdTime".to_string(), at.format("%H%M").to_string()));
    params.extend(excluded_mode_params(mode));

    params
}

/// `exclMOT_<class>=true` for every queryable mode other than `keep`.
pub fn excluded_mode_params(keep: TransportMode) -> Vec<(String, String)> {
    TransportMode::QUERYABLE
        .into_iter()
        .filter(|m| *m != keep)
        .filter_map(|m| m.class_code())
        .map(|code| (format!("exclMOT_{code}"), "true".to_string()))
        .collect()
}
