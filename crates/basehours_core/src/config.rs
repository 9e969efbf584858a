//! Runtime configuration for the core.
//!
//! # Responsibility
//! - Resolve database and logging settings from the process environment.
//! - Validate values once so later layers can trust them.
//!
//! # Invariants
//! - `log_level` is always one of `trace|debug|info|warn|error`.
//! - `log_dir`, when set, is an absolute path.
//! - `db_path == None` selects an in-memory database.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "BASEHOURS_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "BASEHOURS_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BASEHOURS_LOG_DIR";

/// Configuration loading failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable is present but blank.
    EmptyValue(&'static str),
    InvalidLogLevel(String),
    RelativeLogDir(PathBuf),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "`{key}` is set but empty"),
            Self::InvalidLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::RelativeLogDir(path) => {
                write!(f, "log_dir must be an absolute path, got `{}`", path.display())
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: &'static str,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Loads settings from `BASEHOURS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through an arbitrary key lookup.
    ///
    /// Missing keys fall back to [`CoreConfig::default`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_DB_PATH) {
            config.db_path = Some(non_empty(ENV_DB_PATH, &value)?.into());
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config = config.with_log_level(non_empty(ENV_LOG_LEVEL, &value)?)?;
        }
        if let Some(value) = lookup(ENV_LOG_DIR) {
            config = config.with_log_dir(non_empty(ENV_LOG_DIR, &value)?)?;
        }

        Ok(config)
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn with_log_level(mut self, level: &str) -> Result<Self, ConfigError> {
        self.log_level = normalize_level(level)
            .map_err(|_| ConfigError::InvalidLogLevel(level.trim().to_string()))?;
        Ok(self)
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        if !dir.is_absolute() {
            return Err(ConfigError::RelativeLogDir(dir));
        }
        self.log_dir = Some(dir);
        Ok(self)
    }
}

fn non_empty<'a>(key: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyValue(key));
    }
    Ok(trimmed)
}
