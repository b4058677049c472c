//! Output renderers for the assembled board.
//!
//! Three independent sinks: a terminal listing on stdout, a JSON snapshot
//! file and a static HTML dashboard file. The file sinks overwrite their
//! target in place; a reader racing a write may see a partial file.

mod html;
mod json;
mod terminal;

use std::path::{Path, PathBuf};

pub use html::{
    DashboardTemplate, DepartureRow, hex_to_rgba, render_dashboard, time_label, write_html,
};
pub use json::{to_json, write_json};
pub use terminal::{print_listing, write_listing};

/// Errors producing an output file.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize departures: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render template: {0}")]
    Template(#[from] askama::Error),
}

/// Write `contents` to `path`, creating parent directories as needed.
pub(crate) fn write_file(path: &Path, contents: &[u8]) -> Result<(), RenderError> {
    let io_err = |source: std::io::Error| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    std::fs::write(path, contents).map_err(io_err)?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}
