//! Colour-coded terminal listing.

use std::io::{self, Write};

use crate::domain::{Departure, TransportMode};

const RESET: &str = "\x1b[0m";

/// ANSI colour for a mode. `None` leaves the terminal default.
fn ansi_colour(mode: TransportMode) -> Option<&'static str> {
    match mode {
        TransportMode::Train => Some("\x1b[33m"),
        TransportMode::LightRail => Some("\x1b[31m"),
        TransportMode::Ferry => Some("\x1b[32m"),
        TransportMode::Bus | TransportMode::SchoolBus => Some("\x1b[34m"),
        TransportMode::Metro => Some("\x1b[36m"),
        TransportMode::Coach => Some("\x1b[35m"),
        TransportMode::Unknown => None,
    }
}

/// Write the listing: a count line, then one numbered line per departure.
pub fn write_listing<W: Write>(out: &mut W, departures: &[Departure]) -> io::Result<()> {
    writeln!(out, "Found {} departures", departures.len())?;

    for (i, departure) in departures.iter().enumerate() {
        writeln!(
            out,
            "{:<3} {}{:<6} {:<30} {:<25} {:>4} min{}",
            i + 1,
            ansi_colour(departure.mode_name).unwrap_or(RESET),
            departure.line_label.as_deref().unwrap_or(""),
            departure.destination,
            departure.via.as_deref().unwrap_or(""),
            departure.minutes_to_departure,
            RESET,
        )?;
    }

    Ok(())
}

/// Print the listing to standard output.
pub fn print_listing(departures: &[Departure]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_listing(&mut lock, departures)?;
    lock.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departure(label: &str, mode: TransportMode, minutes: i64, via: Option<&str>) -> Departure {
        Departure {
            line_label: Some(label.to_string()),
            destination: "Central Station".to_string(),
            via: via.map(str::to_string),
            minutes_to_departure: minutes,
            mode_name: mode,
            accent_color: "#000000".to_string(),
            is_realtime_controlled: true,
            trip_id: None,
        }
    }

    fn render(departures: &[Departure]) -> String {
        let mut out = Vec::new();
        write_listing(&mut out, departures).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_listing() {
        assert_eq!(render(&[]), "Found 0 departures\n");
    }

    #[test]
    fn numbered_coloured_lines() {
        let output = render(&[
            departure("T1", TransportMode::Train, 4, Some("Strathfield")),
            departure("M92", TransportMode::Bus, 12, None),
        ]);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Found 2 departures");

        assert!(lines[1].starts_with("1   \x1b[33mT1 "));
        assert!(lines[1].contains("Strathfield"));
        assert!(lines[1].ends_with("   4 min\x1b[0m"));

        assert!(lines[2].starts_with("2   \x1b[34mM92 "));
        assert!(lines[2].ends_with("  12 min\x1b[0m"));
    }

    #[test]
    fn unknown_mode_is_uncoloured() {
        let output = render(&[departure("?", TransportMode::Unknown, 1, None)]);
        let line = output.lines().nth(1).unwrap();
        assert!(line.starts_with("1   \x1b[0m?"));
    }

    #[test]
    fn every_queryable_mode_has_a_colour() {
        for mode in TransportMode::QUERYABLE {
            assert!(ansi_colour(mode).is_some(), "{mode} has no colour");
        }
    }
}
