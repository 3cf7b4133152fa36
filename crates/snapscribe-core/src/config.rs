//! Store configuration and simulated-latency settings.

use directories::BaseDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors returned by config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Per-operation simulated latency.
///
/// Each store operation sleeps for its configured duration before touching
/// storage, modeling a remote-service round trip. The delay is fixed and
/// unconditional; there is no jitter, retry, or cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub login: Duration,
    pub signup: Duration,
    pub list: Duration,
    pub get: Duration,
    pub create: Duration,
    pub message: Duration,
    pub update: Duration,
    pub delete: Duration,
    pub extract: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(800),
            signup: Duration::from_millis(800),
            list: Duration::from_millis(400),
            get: Duration::from_millis(300),
            create: Duration::from_millis(500),
            message: Duration::from_millis(300),
            update: Duration::from_millis(400),
            delete: Duration::from_millis(400),
            extract: Duration::from_millis(1500),
        }
    }
}

impl Latency {
    /// Zero latency everywhere; the configuration tests run with.
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            signup: Duration::ZERO,
            list: Duration::ZERO,
            get: Duration::ZERO,
            create: Duration::ZERO,
            message: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
            extract: Duration::ZERO,
        }
    }
}

/// Top-level store configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "snake_case")]
pub struct StoreConfig {
    /// Directory holding the persisted collections. Defaults to a per-user
    /// data directory when unset.
    pub data_dir: Option<PathBuf>,
    /// Whether store operations simulate remote-service latency.
    pub simulate_latency: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            simulate_latency: true,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a YAML file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("config file not found, using defaults (path={})", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(ConfigError::Io(err)),
        };
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Resolve the data directory, falling back to `~/.snapscribe`.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(".snapscribe");
        }
        PathBuf::from(".snapscribe")
    }

    /// Latency table implied by the `simulate_latency` toggle.
    pub fn latency(&self) -> Latency {
        if self.simulate_latency {
            Latency::default()
        } else {
            Latency::none()
        }
    }
}
