//! Configuration loading and database path resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Default tracing filter when neither RUST_LOG nor config set one
pub const DEFAULT_LOG_LEVEL: &str = "fyyur_web=debug,fyyur_common=info,tower_http=info";

/// Optional settings read from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub database_path: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }
}

/// Values given on the command line
///
/// The binary's argument parser folds the `FYYUR_*` environment variables
/// into these, so this module never reads the environment itself.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub database: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Fully resolved application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl AppConfig {
    /// Merge overrides, TOML values and compiled defaults, in that priority
    pub fn resolve(overrides: &Overrides, toml: &TomlConfig) -> Self {
        let database_path = resolve_database_path(overrides.database.as_deref(), toml);

        Self {
            database_path,
            host: overrides
                .host
                .clone()
                .or_else(|| toml.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            log_level: overrides
                .log_level
                .clone()
                .or_else(|| toml.log_level.clone())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// `host:port` string for binding the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database path resolution, highest priority first:
/// 1. Command-line argument (or `FYYUR_DATABASE`, via the argument parser)
/// 2. TOML config file
/// 3. OS-dependent compiled default
pub fn resolve_database_path(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Some(path) = &toml.database_path {
        return path.clone();
    }

    default_database_path()
}

/// Load the TOML config
///
/// An explicit path must exist and parse. Without one, the platform config
/// location is tried and a missing file falls back to defaults.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        info!("Using config at {}", path.display());
        return TomlConfig::parse(&content);
    }

    let Some(path) = default_config_path() else {
        warn!("Could not determine config directory, using defaults");
        return Ok(TomlConfig::default());
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            info!("Using config at {}", path.display());
            TomlConfig::parse(&content)
        }
        Err(_) => {
            warn!("No config file at {}, using defaults", path.display());
            Ok(TomlConfig::default())
        }
    }
}

/// Platform config file location (`~/.config/fyyur/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"))
}

/// OS-dependent default database file
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
        .join("fyyur.db")
}
