//! Startup configuration.
//!
//! # Responsibility
//! - Load `.env` from the working directory when present.
//! - Resolve store URI and logging settings from the process environment.
//!
//! # Invariants
//! - A missing or unparseable store URI is reported as an error; callers
//!   treat it as fatal.
//! - Optional settings fall back to build-mode defaults.

use crate::logging::{default_log_level, LogTarget};
use crate::store::{StoreError, StoreUri};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Environment key holding the store connection URI.
pub const STORE_URI_KEY: &str = "MDNOTE_STORE_URI";
/// Environment key overriding the log level.
pub const LOG_LEVEL_KEY: &str = "MDNOTE_LOG_LEVEL";
/// Environment key naming an absolute directory for rolling log files.
pub const LOG_DIR_KEY: &str = "MDNOTE_LOG_DIR";

/// Configuration failure at startup.
#[derive(Debug)]
pub enum ConfigError {
    EnvFile(dotenvy::Error),
    Missing(&'static str),
    InvalidStoreUri(StoreError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvFile(err) => write!(f, "failed to load .env file: {err}"),
            Self::Missing(key) => write!(f, "required setting `{key}` is not set"),
            Self::InvalidStoreUri(err) => write!(f, "`{STORE_URI_KEY}` is invalid: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EnvFile(err) => Some(err),
            Self::Missing(_) => None,
            Self::InvalidStoreUri(err) => Some(err),
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store_uri: StoreUri,
    pub log_level: String,
    pub log_target: LogTarget,
}

impl AppConfig {
    /// Loads `.env` (if any) and reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(ConfigError::EnvFile(err)),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let raw_uri = read(STORE_URI_KEY).ok_or(ConfigError::Missing(STORE_URI_KEY))?;
        let store_uri = StoreUri::parse(&raw_uri).map_err(ConfigError::InvalidStoreUri)?;

        let log_level = read(LOG_LEVEL_KEY).unwrap_or_else(|| default_log_level().to_string());
        let log_target = match read(LOG_DIR_KEY) {
            Some(dir) => LogTarget::Directory(PathBuf::from(dir)),
            None => LogTarget::Stderr,
        };

        Ok(Self {
            store_uri,
            log_level,
            log_target,
        })
    }
}
