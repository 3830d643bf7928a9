//! Configuration management for sensed.
//!
//! Loads settings from $SENSED_CONFIG, /etc/supportsense/config.toml or
//! /var/lib/supportsense/config.toml, in that order, or uses defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sense_shared::{DEFAULT_BIND_ADDR, STATE_DIR};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "SENSED_CONFIG";

/// Config file path
pub const CONFIG_PATH: &str = "/etc/supportsense/config.toml";

/// Fallback config file path
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/supportsense/config.toml";

/// Database file name inside the state directory
pub const DB_FILE_NAME: &str = "support_tickets.db";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Ticket store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Drop and recreate the tickets table at startup
    #[serde(default)]
    pub reset_on_start: bool,

    /// Insert the sample tickets when the table is empty
    #[serde(default = "default_seed_samples")]
    pub seed_samples: bool,
}

/// System state dir when it exists, otherwise the user data dir
fn default_db_path() -> PathBuf {
    let system_dir = PathBuf::from(STATE_DIR);
    if system_dir.exists() {
        return system_dir.join(DB_FILE_NAME);
    }

    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("supportsense")
        .join(DB_FILE_NAME)
}

fn default_seed_samples() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            reset_on_start: false,
            seed_samples: default_seed_samples(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Find and parse the config file without logging.
    ///
    /// An explicit path must exist and parse. Standard locations that are
    /// missing are skipped. Returns the config and the file it came from.
    pub fn resolve(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_from_path(path)?, Some(path.to_path_buf())));
        }

        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            candidates.push(PathBuf::from(env_path));
        }
        candidates.push(PathBuf::from(CONFIG_PATH));
        candidates.push(PathBuf::from(DEFAULT_CONFIG_PATH));

        for path in candidates {
            if path.exists() {
                return Ok((Self::load_from_path(&path)?, Some(path)));
            }
        }

        Ok((Config::default(), None))
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save default config to path (for init)
    pub fn save_default(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        info!("Saved default config to {}", path.display());
        Ok(())
    }
}
