//! Run configuration.
//!
//! Loaded once at startup from a YAML file and passed by reference to each
//! stage. When no file exists the built-in stop table is used.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::board::TimeWindow;
use crate::domain::{ModeConfig, StopConfig, TransportMode};
use crate::tfnsw::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Config file used when none is named on the command line or in the
/// environment.
pub const DEFAULT_CONFIG_PATH: &str = "departure-board.yaml";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "DEPARTURE_BOARD_CONFIG";

/// Environment variable that overrides the configured API key.
pub const API_KEY_ENV: &str = "TFNSW_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Trip planner API key. Usually supplied through `TFNSW_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "AppConfig::default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "AppConfig::default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub output: OutputConfig,

    /// Minutes-to-departure range kept on the board (default: 0..=120)
    #[serde(default)]
    pub window: TimeWindow,

    #[serde(default)]
    pub html: HtmlConfig,

    /// Serve recorded responses instead of calling the API.
    #[serde(default)]
    pub replay: Option<ReplayConfig>,

    #[serde(default = "default_stops")]
    pub stops: Vec<StopConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            output: OutputConfig::default(),
            window: TimeWindow::default(),
            html: HtmlConfig::default(),
            replay: None,
            stops: default_stops(),
        }
    }
}

/// Where the snapshot files are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_json_path")]
    pub json_path: PathBuf,
    #[serde(default = "OutputConfig::default_html_path")]
    pub html_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: Self::default_json_path(),
            html_path: Self::default_html_path(),
        }
    }
}

impl OutputConfig {
    fn default_json_path() -> PathBuf {
        PathBuf::from("departures.json")
    }
    fn default_html_path() -> PathBuf {
        PathBuf::from("dashboard.html")
    }
}

/// HTML dashboard settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    /// Page title (default: "Departures")
    #[serde(default = "HtmlConfig::default_title")]
    pub title: String,
    /// Auto-refresh interval in seconds (default: 60)
    #[serde(default = "HtmlConfig::default_refresh_secs")]
    pub refresh_secs: u32,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            refresh_secs: Self::default_refresh_secs(),
        }
    }
}

impl HtmlConfig {
    fn default_title() -> String {
        "Departures".to_string()
    }
    fn default_refresh_secs() -> u32 {
        60
    }
}

/// Offline replay of recorded departure monitor responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayConfig {
    /// Directory of `<stop_id>.json` recordings.
    pub dir: PathBuf,
    /// Instant the recordings are replayed at.
    pub at: DateTime<Utc>,
}

impl AppConfig {
    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }
    fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT_SECS
    }

    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::from_yaml(&content)
    }

    /// Parse and validate YAML config text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the API key when `key` is set and non-empty.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
        self
    }

    /// Check the invariants serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stops.is_empty() {
            return Err(ConfigError::Invalid("no stops configured".to_string()));
        }

        for stop in &self.stops {
            if stop.modes.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "stop {:?} has no modes",
                    stop.name
                )));
            }

            for mode in &stop.modes {
                if let Some(declared) = mode.declared_mode_number
                    && mode.mode_number() != Some(declared)
                {
                    return Err(ConfigError::Invalid(format!(
                        "stop {:?}: mode_number {declared} does not match {}",
                        stop.name, mode.mode
                    )));
                }
            }
        }

        if self.window.min_minutes > self.window.max_minutes {
            return Err(ConfigError::Invalid(format!(
                "window min_minutes {} is after max_minutes {}",
                self.window.min_minutes, self.window.max_minutes
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be positive".to_string(),
            ));
        }

        if self.html.refresh_secs == 0 {
            return Err(ConfigError::Invalid(
                "html.refresh_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Pick the config file: explicit argument, then environment, then default.
pub fn resolve_config_path(arg: Option<String>, env: Option<String>) -> PathBuf {
    arg.or(env)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// The Parramatta interchange: trains and buses at the station, light rail
/// at Parramatta Square, ferries at the wharf.
pub fn default_stops() -> Vec<StopConfig> {
    const PARRAMATTA_BUS_EXCLUSIONS: [&str; 34] = [
        "520", "521", "523", "524", "546", "549", "552", "600", "601", "603", "604", "606", "609",
        "625", "660", "661", "662", "663", "700", "705", "706", "707", "708", "711", "802", "804",
        "806", "810X", "811X", "824", "906", "907", "909", "920",
    ];

    vec![
        StopConfig::new(
            "Parramatta",
            "10101229",
            vec![
                ModeConfig::new(TransportMode::Train),
                ModeConfig::new(TransportMode::Bus).excluding(PARRAMATTA_BUS_EXCLUSIONS),
            ],
        ),
        StopConfig::new(
            "Parramatta Square",
            "10101710",
            vec![ModeConfig::new(TransportMode::LightRail)],
        ),
        StopConfig::new(
            "Parramatta Wharf",
            "10102032",
            vec![ModeConfig::new(TransportMode::Ferry)],
        ),
    ]
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse config: {0}")]
    ParseError(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn defaults() {
        let config = AppConfig::default();

        assert!(config.api_key.is_empty());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.output.json_path, PathBuf::from("departures.json"));
        assert_eq!(config.output.html_path, PathBuf::from("dashboard.html"));
        assert_eq!(config.window, TimeWindow::new(0, 120));
        assert_eq!(config.html.refresh_secs, 60);
        assert!(config.replay.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_stop_table() {
        let stops = default_stops();

        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].stop_id, "10101229");
        assert_eq!(stops[0].modes[1].mode, TransportMode::Bus);
        assert_eq!(stops[0].modes[1].routes_to_exclude.len(), 34);
        assert!(stops[0].modes[1].routes_to_exclude.contains("810X"));
        assert!(stops[0].modes[0].routes_to_exclude.is_empty());
        assert_eq!(stops[1].modes[0].mode, TransportMode::LightRail);
        assert_eq!(stops[2].modes[0].mode, TransportMode::Ferry);
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config.stops, default_stops());
        assert_eq!(config.window, TimeWindow::default());
    }

    #[test]
    fn full_yaml() {
        let yaml = r#"
api_key: secret
timeout_secs: 5
output:
  json_path: out/board.json
window:
  max_minutes: 45
html:
  title: Central
replay:
  dir: data/mock_departures
  at: 2025-06-02T08:00:00Z
stops:
  - name: Central
    stop_id: "10101100"
    modes:
      - mode_name: metro
        mode_number: 2
      - mode_name: coach
        routes_to_exclude: ["X1"]
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.output.json_path, PathBuf::from("out/board.json"));
        assert_eq!(config.output.html_path, PathBuf::from("dashboard.html"));
        assert_eq!(config.window, TimeWindow::new(0, 45));
        assert_eq!(config.html.title, "Central");
        assert_eq!(config.html.refresh_secs, 60);

        let replay = config.replay.unwrap();
        assert_eq!(replay.dir, PathBuf::from("data/mock_departures"));
        assert_eq!(replay.at, Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap());

        assert_eq!(config.stops.len(), 1);
        assert_eq!(config.stops[0].modes[0].mode, TransportMode::Metro);
        assert!(config.stops[0].modes[1].routes_to_exclude.contains("X1"));
    }

    #[test]
    fn mismatched_mode_number_rejected() {
        let yaml = r#"
stops:
  - name: Central
    stop_id: "10101100"
    modes:
      - mode_name: bus
        mode_number: 1
"#;
        let err = AppConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("does not match bus"));
    }

    #[test]
    fn unknown_mode_rejected() {
        let yaml = r#"
stops:
  - name: Central
    stop_id: "10101100"
    modes:
      - mode_name: hovercraft
"#;
        assert!(matches!(
            AppConfig::from_yaml(yaml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn stop_without_modes_rejected() {
        let yaml = r#"
stops:
  - name: Central
    stop_id: "10101100"
    modes: []
"#;
        assert!(matches!(
            AppConfig::from_yaml(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn empty_stop_list_rejected() {
        assert!(matches!(
            AppConfig::from_yaml("stops: []"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn inverted_window_rejected() {
        let yaml = "window:\n  min_minutes: 30\n  max_minutes: 10\n";
        assert!(matches!(
            AppConfig::from_yaml(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn zero_refresh_rejected() {
        let yaml = "html:\n  refresh_secs: 0\n";
        assert!(matches!(
            AppConfig::from_yaml(yaml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = AppConfig::from_yaml("timeout_secs: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("timeout_secs")));
    }

    #[test]
    fn api_key_override() {
        let config = AppConfig::default().with_api_key_override(Some("from-env".to_string()));
        assert_eq!(config.api_key, "from-env");

        let config = config.with_api_key_override(Some(String::new()));
        assert_eq!(config.api_key, "from-env");

        let config = config.with_api_key_override(None);
        assert_eq!(config.api_key, "from-env");
    }

    #[test]
    fn config_path_precedence() {
        assert_eq!(
            resolve_config_path(Some("a.yaml".into()), Some("b.yaml".into())),
            PathBuf::from("a.yaml")
        );
        assert_eq!(
            resolve_config_path(None, Some("b.yaml".into())),
            PathBuf::from("b.yaml")
        );
        assert_eq!(
            resolve_config_path(None, None),
            PathBuf::from(DEFAULT_CONFIG_PATH)
        );
    }

    #[test]
    fn load_missing_file() {
        let err = AppConfig::load("/nonexistent/departure-board.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.yaml");
        std::fs::write(&path, "api_key: k\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.api_key, "k");
    }

    #[test]
    fn example_file_is_valid() {
        let config =
            AppConfig::from_yaml(include_str!("../departure-board.example.yaml")).unwrap();
        assert_eq!(config.stops.len(), 3);
        assert!(config.replay.is_none());
        assert!(config.stops[0].modes[1].routes_to_exclude.contains("520"));
    }
}
