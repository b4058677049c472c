use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use departure_board::app::run;
use departure_board::config::{
    API_KEY_ENV, AppConfig, CONFIG_PATH_ENV, ConfigError, resolve_config_path,
};

fn load_config() -> Result<AppConfig, ConfigError> {
    let arg = std::env::args().nth(1);
    let env = std::env::var(CONFIG_PATH_ENV).ok();
    let explicit = arg.is_some() || env.is_some();
    let path = resolve_config_path(arg, env);

    let config = if explicit || path.exists() {
        info!(path = %path.display(), "loading config");
        AppConfig::load(&path)?
    } else {
        info!("no config file found, using built-in stops");
        AppConfig::default()
    };

    Ok(config.with_api_key_override(std::env::var(API_KEY_ENV).ok()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout is the departure listing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&config).await {
        Ok(board) => {
            info!(departures = board.len(), "board published");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
