//! Runtime configuration for hosts embedding the companion core.
//!
//! # Responsibility
//! - Resolve log level, log directory and database path from the
//!   environment, with build-mode defaults.
//!
//! # Invariants
//! - Resolution never touches the file system.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "COMPANION_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "COMPANION_LOG_DIR";
pub const ENV_DB_PATH: &str = "COMPANION_DB_PATH";

/// Database file used when `COMPANION_DB_PATH` is unset.
pub const DEFAULT_DB_FILE_NAME: &str = "companion.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    RelativeLogDir(String),
    EmptyDbPath,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{ENV_LOG_LEVEL}: {message}"),
            Self::RelativeLogDir(value) => {
                write!(f, "{ENV_LOG_DIR} must be an absolute path, got `{value}`")
            }
            Self::EmptyDbPath => write!(f, "{ENV_DB_PATH} cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub log_level: &'static str,
    /// File logging is enabled only when a directory is configured.
    pub log_dir: Option<PathBuf>,
    pub db_path: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: None,
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; unset and blank values fall back
    /// to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(level) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }

        if let Some(dir) = non_blank(ENV_LOG_DIR) {
            let path = PathBuf::from(dir.trim());
            if !path.is_absolute() {
                return Err(ConfigError::RelativeLogDir(dir));
            }
            config.log_dir = Some(path);
        }

        match lookup(ENV_DB_PATH) {
            Some(path) if path.trim().is_empty() => return Err(ConfigError::EmptyDbPath),
            Some(path) => config.db_path = PathBuf::from(path.trim()),
            None => {}
        }

        Ok(config)
    }
}
