use std::path::PathBuf;

use clap::Parser;
use potpourri_core::http::DEFAULT_USER_AGENT;

pub const DB_FILE: &str = "potpourri.db";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Data directory path
    #[arg(short, long, env = "POTPOURRI_DATA", default_value = ".")]
    pub data: PathBuf,

    /// Database url, takes precedence over the data directory
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Address to bind
    #[arg(long, env = "POTPOURRI_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on, 0 lets the system pick one
    #[arg(short, long, env = "POTPOURRI_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// Emit logs as json lines
    #[arg(long)]
    pub log_json: bool,

    /// Lyrics page request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub fetch_timeout: u64,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Database pool size
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,
}

impl Args {
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => {
                let db_path = self.data.join(DB_FILE);
                format!("sqlite://{}?mode=rwc", db_path.to_string_lossy())
            }
        }
    }
}
