pub mod config;
pub mod error;
pub mod run;

use std::{fs::OpenOptions, sync::Arc};

use config::ServerConfig;
pub use error::{Error, Result};
use showbook_app::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let data_dir = config.data_dir();
    if !data_dir.is_dir() {
        tokio::fs::create_dir_all(&data_dir).await?;
        info!("Created data directory {}", data_dir.display());
    }

    let pool = showbook_dal::new_pool(&config.database_url()).await?;
    showbook_dal::migrate(&pool).await?;
    Ok(AppState::new(pool))
}

/// Debug runs log to stdout, otherwise INFO and above are appended to the log file
pub fn init_logging(config: &ServerConfig) -> Result<()> {
    if config.debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    } else {
        let log_file = config.log_file();
        if let Some(dir) = log_file.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("info"))
            .with_ansi(false)
            .with_writer(Arc::new(file))
            .init();
    }
    Ok(())
}
