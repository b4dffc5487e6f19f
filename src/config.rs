//! Runtime configuration
//!
//! Read from environment variables (a `.env` file is loaded first by the
//! binary):
//!
//! - `RSVP_CAPACITY` - confirmed places, default 22
//! - `RSVP_DATA_FILE` - JSONL data file, default `rsvp_roster.jsonl`;
//!   relative paths resolve against the current directory, `:memory:`
//!   disables persistence
//! - `RSVP_BIND_ADDR` - listen address, default `0.0.0.0:8000`
//! - `RSVP_ALLOWED_ORIGINS` - comma-separated CORS origins, any if unset

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::roster::DEFAULT_CAPACITY;

pub const DEFAULT_DATA_FILE: &str = "rsvp_roster.jsonl";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
/// `RSVP_DATA_FILE` value that keeps the roster in memory only
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RSVP_CAPACITY must be a positive integer, got '{0}'")]
    InvalidCapacity(String),

    #[error("RSVP_BIND_ADDR must be a socket address, got '{0}'")]
    InvalidBindAddr(String),
}

#[derive(Debug, Clone)]
pub struct RosterConfig {
    pub capacity: usize,
    /// `None` keeps the roster in memory
    pub data_file: Option<PathBuf>,
    pub bind_addr: SocketAddr,
    /// Empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            data_file: Some(PathBuf::from(DEFAULT_DATA_FILE)),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            allowed_origins: Vec::new(),
        }
    }
}

impl RosterConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::from_lookup(|key| env::var(key).ok(), &current_dir)
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F, current_dir: &Path) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let capacity = match get("RSVP_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidCapacity(raw)),
            },
            None => DEFAULT_CAPACITY,
        };

        let data_file = match get("RSVP_DATA_FILE").as_deref() {
            Some(IN_MEMORY) => None,
            Some(path) if Path::new(path).is_absolute() => Some(PathBuf::from(path)),
            Some(path) => Some(current_dir.join(path)),
            None => Some(current_dir.join(DEFAULT_DATA_FILE)),
        };

        let raw_addr = get("RSVP_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        let allowed_origins = get("RSVP_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            capacity,
            data_file,
            bind_addr,
            allowed_origins,
        })
    }
}
