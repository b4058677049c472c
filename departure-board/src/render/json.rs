//! JSON snapshot of the board.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::domain::Departure;

use super::{RenderError, write_file};

/// Serialize departures as a 4-space indented JSON array.
///
/// Non-ASCII text is written as-is.
pub fn to_json(departures: &[Departure]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    departures.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write the snapshot, replacing any existing file.
pub fn write_json(departures: &[Departure], path: &Path) -> Result<(), RenderError> {
    write_file(path, &to_json(departures)?)
}
