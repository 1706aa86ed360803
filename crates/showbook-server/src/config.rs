use std::path::PathBuf;

use crate::error::Result;
pub use clap::Parser;

#[derive(Debug, Clone, clap::Parser)]
pub struct ServerConfig {
    #[arg(
        short,
        long,
        default_value_t = 5000,
        env = "SHOWBOOK_LISTEN_PORT",
        help = "Port to listen on"
    )]
    pub port: u16,
    #[arg(
        short,
        long,
        default_value = "127.0.0.1",
        env = "SHOWBOOK_LISTEN_ADDRESS",
        help = "Address to listen on"
    )]
    pub listen_address: String,

    #[arg(
        long,
        env = "SHOWBOOK_DATABASE_URL",
        help = "Database URL e.g. sqlite://file.db, default is sqlite://[data-dir]/showbook.db, where data-dir is set by --data-dir"
    )]
    database_url: Option<String>,

    #[arg(
        long,
        env = "SHOWBOOK_DATA_DIR",
        help = "Data directory (database, logs), default is system default like ~/.local/share/showbook",
        default_value_t = default_data_dir()
    )]
    data_dir: String,

    #[arg(
        long,
        env = "SHOWBOOK_DEBUG",
        help = "Debug mode, logs go to stdout with level given by RUST_LOG (default debug)"
    )]
    pub debug: bool,

    #[arg(
        long,
        env = "SHOWBOOK_LOG_FILE",
        help = "Log file used when not in debug mode, default is [data-dir]/error.log"
    )]
    log_file: Option<PathBuf>,

    #[arg(
        long,
        env = "SHOWBOOK_STATIC_DIR",
        help = "Directory with static assets served under /static"
    )]
    pub static_dir: Option<PathBuf>,
}

fn default_data_dir() -> String {
    dirs::data_dir()
        .map(|p| p.join("showbook"))
        .unwrap_or_else(|| PathBuf::from("showbook"))
        .to_string_lossy()
        .to_string()
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        ServerConfig::try_parse().map_err(|e| e.into())
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    pub fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}/showbook.db", self.data_dir))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir().join("error.log"))
    }
}
