//! Daemon configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file (`roster.toml`, or the path in `ROSTER_CONFIG`), then `ROSTER_*`
//! environment variables.

use ::config::{Config, Environment, File, FileFormat};
use anyhow::{Context, Result};
use roster_api_rpc::server::{DEFAULT_RPC_HOST, DEFAULT_RPC_PORT};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "roster.toml";
const DEFAULT_DATABASE_URL: &str = "sqlite://~/.roster/roster.db";
const DEFAULT_MAX_CONNECTIONS: i64 = 8;
const SQLITE_SCHEME: &str = "sqlite://";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonConfig {
    pub database_url: String,
    pub rpc_host: String,
    pub rpc_port: u16,
    pub max_connections: u32,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        let file =
            std::env::var("ROSTER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_sources(&file, Environment::with_prefix("ROSTER"))
    }

    fn from_sources(file: &str, env: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("rpc_host", DEFAULT_RPC_HOST)?
            .set_default("rpc_port", i64::from(DEFAULT_RPC_PORT))?
            .set_default("max_connections", DEFAULT_MAX_CONNECTIONS)?
            .set_default("log_format", "pretty")?
            .add_source(File::new(file, FileFormat::Toml).required(false))
            .add_source(env.try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read configuration (file: {})", file))?;

        let mut config: DaemonConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.database_url = expand_database_url(&config.database_url);

        Ok(config)
    }

    /// Filesystem path of the database, `None` for in-memory URLs
    pub fn database_path(&self) -> Option<&str> {
        let path = self.database_url.strip_prefix(SQLITE_SCHEME)?;
        let path = path.split('?').next().unwrap_or(path);
        (!path.is_empty() && !path.starts_with(":memory:")).then_some(path)
    }
}

/// Expand a leading `~` in the path part of a `sqlite://` URL
fn expand_database_url(url: &str) -> String {
    match url.strip_prefix(SQLITE_SCHEME) {
        Some(path) => format!("{}{}", SQLITE_SCHEME, shellexpand::tilde(path)),
        None => url.to_string(),
    }
}
