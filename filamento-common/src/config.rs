//! Configuration loading and resolution
//!
//! Every setting resolves in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or malformed TOML file is logged and ignored; startup never fails
//! because of it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable: root folder holding the database file
pub const ENV_ROOT_FOLDER: &str = "FILAMENTO_ROOT_FOLDER";
/// Environment variable: database name (file `<root>/<name>.db`)
pub const ENV_DATABASE: &str = "FILAMENTO_DATABASE";
/// Environment variable: full sqlx SQLite URL, overrides root folder + name
pub const ENV_DATABASE_URL: &str = "FILAMENTO_DATABASE_URL";
/// Environment variable: listen address
pub const ENV_BIND: &str = "FILAMENTO_BIND";
/// Environment variable: listen port
pub const ENV_PORT: &str = "FILAMENTO_PORT";

/// Logging section of the TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
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

/// Contents of `config.toml`; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub database: Option<String>,
    pub database_url: Option<String>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Load from an explicit path, or from the first platform default that exists.
    ///
    /// Falls back to an empty config (with a warning) when nothing usable is found.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_file(),
        };

        let Some(path) = path else {
            debug!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => {
                    debug!("Loaded config file: {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Compiled fallbacks used when no other source supplies a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub database: String,
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            database: "filamento".to_string(),
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
            log_level: default_log_level(),
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_folder: Option<PathBuf>,
    pub database: Option<String>,
    pub database_url: Option<String>,
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

/// Where the SQLite database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// Database file on disk (created if missing)
    File(PathBuf),
    /// Explicit sqlx connection URL
    Url(String),
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub root_folder: PathBuf,
    pub database: DatabaseLocation,
    pub bind_address: String,
    pub port: u16,
    pub log_level: String,
}

impl ServiceConfig {
    /// Resolve every setting from CLI overrides, environment, TOML and defaults
    pub fn resolve(cli: &ConfigOverrides, toml: &TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::for_current_platform();

        let root_folder = cli
            .root_folder
            .clone()
            .or_else(|| env_value(ENV_ROOT_FOLDER).map(PathBuf::from))
            .or_else(|| toml.root_folder.clone())
            .unwrap_or(defaults.root_folder);

        let database_url = cli
            .database_url
            .clone()
            .or_else(|| env_value(ENV_DATABASE_URL))
            .or_else(|| toml.database_url.clone());

        let database = match database_url {
            Some(url) => DatabaseLocation::Url(url),
            None => {
                let name = cli
                    .database
                    .clone()
                    .or_else(|| env_value(ENV_DATABASE))
                    .or_else(|| toml.database.clone())
                    .unwrap_or(defaults.database);
                validate_database_name(&name)?;
                DatabaseLocation::File(root_folder.join(format!("{}.db", name)))
            }
        };

        let bind_address = cli
            .bind_address
            .clone()
            .or_else(|| env_value(ENV_BIND))
            .or_else(|| toml.bind_address.clone())
            .unwrap_or(defaults.bind_address);

        let port = match cli.port {
            Some(port) => port,
            None => match env_value(ENV_PORT) {
                Some(raw) => raw.parse::<u16>().map_err(|_| {
                    Error::Config(format!("{} must be a port number, got '{}'", ENV_PORT, raw))
                })?,
                None => toml.port.unwrap_or(defaults.port),
            },
        };

        let log_level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| toml.logging.level.clone());

        Ok(Self {
            root_folder,
            database,
            bind_address,
            port,
            log_level,
        })
    }

    /// `host:port` string for the listener
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Database names become file names; keep them to a safe character set
fn validate_database_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Database name '{}' may only contain letters, digits, '_' and '-'",
            name
        )))
    }
}

/// First existing config file for the platform
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("filamento").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/filamento/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/filamento (or /var/lib/filamento for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("filamento"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/filamento"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("filamento"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/filamento"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("filamento"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\filamento"))
    } else {
        PathBuf::from("./filamento_data")
    }
}
