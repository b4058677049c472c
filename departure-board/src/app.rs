//! One run of the dashboard: fetch, assemble, render.

use tracing::{info, warn};

use crate::board::build_board;
use crate::config::{AppConfig, ConfigError};
use crate::domain::Departure;
use crate::render::{RenderError, print_listing, write_html, write_json};
use crate::tfnsw::{MockTfnswClient, TfnswClient, TfnswConfig, TfnswError};

/// Failures that end a run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to set up departure source: {0}")]
    Source(#[from] TfnswError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to print listing: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Fetch the board for every configured stop and publish it to all sinks.
///
/// Returns the published board.
pub async fn run(config: &AppConfig) -> Result<Vec<Departure>, RunError> {
    let board = match &config.replay {
        Some(replay) => {
            info!(dir = %replay.dir.display(), at = %replay.at, "replaying recorded departures");
            let client = MockTfnswClient::new(&replay.dir, replay.at)?;
            build_board(&client, &config.stops, config.window).await
        }
        None => {
            if config.api_key.is_empty() {
                warn!("no API key configured; requests will be rejected");
            }
            let client = TfnswClient::new(
                TfnswConfig::new(&config.api_key)
                    .with_base_url(&config.base_url)
                    .with_timeout(config.timeout_secs),
            )?;
            build_board(&client, &config.stops, config.window).await
        }
    };

    publish(&board, config)?;
    Ok(board)
}

/// Send the board to the terminal, JSON and HTML sinks.
pub fn publish(board: &[Departure], config: &AppConfig) -> Result<(), RunError> {
    print_listing(board)?;
    write_json(board, &config.output.json_path)?;
    write_html(
        board,
        &config.output.html_path,
        &config.html.title,
        config.html.refresh_secs,
    )?;
    Ok(())
}
