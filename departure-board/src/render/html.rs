//! Static, self-refreshing HTML dashboard.

use std::path::Path;

use askama::Template;

use crate::domain::Departure;

use super::{RenderError, write_file};

/// Background opacity of the content and time cells.
const TINT_ALPHA: f64 = 0.1;

/// Full dashboard page.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub refresh_secs: u32,
    pub refresh_millis: u64,
    pub rows: Vec<DepartureRow>,
}

impl DashboardTemplate {
    pub fn new(title: impl Into<String>, refresh_secs: u32, departures: &[Departure]) -> Self {
        Self {
            title: title.into(),
            refresh_secs,
            refresh_millis: u64::from(refresh_secs) * 1000,
            rows: departures.iter().map(DepartureRow::from_departure).collect(),
        }
    }
}

/// One table row. Text fields are escaped by the template.
#[derive(Debug, Clone)]
pub struct DepartureRow {
    pub line: String,
    pub accent: String,
    pub tint: String,
    pub destination: String,
    pub via: Option<String>,
    /// Pre-built markup; only ever digits, fixed words and `<br>`.
    pub time_html: String,
    pub realtime: bool,
}

impl DepartureRow {
    pub fn from_departure(departure: &Departure) -> Self {
        let accent = if departure.accent_color.is_empty() {
            "#000000".to_string()
        } else {
            departure.accent_color.clone()
        };

        let destination = if departure.destination.is_empty() {
            "Unknown Destination".to_string()
        } else {
            departure.destination.clone()
        };

        Self {
            line: departure.line_label.clone().unwrap_or_default(),
            tint: hex_to_rgba(&accent, TINT_ALPHA),
            accent,
            destination,
            via: departure.via.clone().filter(|v| !v.is_empty()),
            time_html: time_label(departure.minutes_to_departure),
            realtime: departure.is_realtime_controlled,
        }
    }
}

/// Time cell text: "Now", "M min", or "H hr<br>M min" beyond an hour.
///
/// ```
/// use departure_board::render::time_label;
///
/// assert_eq!(time_label(0), "Now");
/// assert_eq!(time_label(45), "45 min");
/// assert_eq!(time_label(75), "1 hr<br>15 min");
/// ```
pub fn time_label(minutes: i64) -> String {
    match minutes {
        0 => "Now".to_string(),
        m if m > 60 => format!("{} hr<br>{} min", m / 60, m % 60),
        m => format!("{m} min"),
    }
}

/// Convert `#RRGGBB` or `#RRGGBBAA` to a CSS `rgba(...)` with extra opacity.
///
/// Anything else is returned unchanged.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let h = hex.trim_start_matches('#');
    let channel = |i: usize| h.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());

    match h.len() {
        6 => match (channel(0), channel(2), channel(4)) {
            (Some(r), Some(g), Some(b)) => format!("rgba({r},{g},{b},{alpha})"),
            _ => hex.to_string(),
        },
        8 => match (channel(0), channel(2), channel(4), channel(6)) {
            (Some(r), Some(g), Some(b), Some(a)) => {
                let a = f64::from(a) / 255.0 * alpha;
                format!("rgba({r},{g},{b},{a})")
            }
            _ => hex.to_string(),
        },
        _ => hex.to_string(),
    }
}

/// Render the dashboard document.
pub fn render_dashboard(
    departures: &[Departure],
    title: &str,
    refresh_secs: u32,
) -> Result<String, RenderError> {
    Ok(DashboardTemplate::new(title, refresh_secs, departures).render()?)
}

/// Write the dashboard, replacing any existing file.
pub fn write_html(
    departures: &[Departure],
    path: &Path,
    title: &str,
    refresh_secs: u32,
) -> Result<(), RenderError> {
    let html = render_dashboard(departures, title, refresh_secs)?;
    write_file(path, html.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportMode;
    use tempfile::tempdir;

    fn departure(destination: &str, via: Option<&str>, minutes: i64) -> Departure {
        Departure {
            line_label: Some("M92".to_string()),
            destination: destination.to_string(),
            via: via.map(str::to_string),
            minutes_to_departure: minutes,
            mode_name: TransportMode::Bus,
            accent_color: "#009ED7".to_string(),
            is_realtime_controlled: true,
            trip_id: None,
        }
    }

    fn render(departures: &[Departure]) -> String {
        render_dashboard(departures, "Departures", 60).unwrap()
    }

    #[test]
    fn time_labels() {
        assert_eq!(time_label(0), "Now");
        assert_eq!(time_label(1), "1 min");
        assert_eq!(time_label(45), "45 min");
        assert_eq!(time_label(60), "60 min");
        assert_eq!(time_label(61), "1 hr<br>1 min");
        assert_eq!(time_label(75), "1 hr<br>15 min");
        assert_eq!(time_label(120), "2 hr<br>0 min");
    }

    #[test]
    fn rgba_conversion() {
        assert_eq!(hex_to_rgba("#009ED7", 0.1), "rgba(0,158,215,0.1)");
        assert_eq!(hex_to_rgba("#F6891F", 1.0), "rgba(246,137,31,1)");
        assert_eq!(hex_to_rgba("#00000000", 0.5), "rgba(0,0,0,0)");
        assert_eq!(hex_to_rgba("#FFFFFFFF", 1.0), "rgba(255,255,255,1)");
        assert_eq!(hex_to_rgba("red", 0.1), "red");
        assert_eq!(hex_to_rgba("#GGGGGG", 0.1), "#GGGGGG");
    }

    #[test]
    fn empty_board_has_no_rows() {
        let html = render(&[]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<table id=\"departures-table\">"));
        assert_eq!(html.matches("<tr>").count(), 0);
    }

    #[test]
    fn one_row_per_departure() {
        let html = render(&[
            departure("Sutherland", None, 3),
            departure("Macquarie Park", Some("Epping"), 75),
        ]);

        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains("background-color:#009ED7;\">M92</td>"));
        assert!(html.contains("background-color:rgba(0,158,215,0.1);"));
        assert!(html.contains("<span class=\"destination\">Macquarie Park</span>"));
        assert!(html.contains(" via Epping</span>"));
        assert!(html.contains(">1 hr<br>15 min</td>"));
        assert!(html.contains(">3 min</td>"));
        assert_eq!(html.matches(" via ").count(), 1);
    }

    #[test]
    fn scheduled_times_are_muted() {
        let mut scheduled = departure("Sutherland", None, 3);
        scheduled.is_realtime_controlled = false;

        let html = render(&[scheduled]);
        assert!(html.contains("class=\"time scheduled\""));

        let html = render(&[departure("Sutherland", None, 3)]);
        assert!(!html.contains("class=\"time scheduled\""));
    }

    #[test]
    fn escapes_untrusted_text() {
        let mut evil = departure("<script>alert(1)</script>", Some("A & B"), 0);
        evil.line_label = Some("<b>".to_string());

        let html = render(&[evil]);

        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains(">Now</td>"));
    }

    #[test]
    fn empty_destination_placeholder() {
        let html = render(&[departure("", None, 5)]);
        assert!(html.contains("Unknown Destination"));
    }

    #[test]
    fn auto_refresh() {
        let html = render_dashboard(&[], "Parramatta", 60).unwrap();
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"60\">"));
        assert!(html.contains("}, 60000);"));
        assert!(html.contains("<title>Parramatta</title>"));
    }

    #[test]
    fn write_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.html");
        let departures = [departure("Sutherland", Some("Hurstville"), 12)];

        write_html(&departures, &path, "Departures", 60).unwrap();
        let first = std::fs::read(&path).unwrap();
        write_html(&departures, &path, "Departures", 60).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert!(String::from_utf8(first).unwrap().contains("Hurstville"));
    }
}
