//! Application configuration (TOML)

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, DEFAULT_HISTORY_RETENTION};

/// Environment variable that overrides `data_dir`
pub const DATA_DIR_ENV: &str = "NEUROSCORE_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the row store files
    pub data_dir: String,
    /// Maximum number of score records kept
    pub history_retention: usize,
    /// Address for `neuroscore serve`
    pub server_addr: String,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Fixed seed for reward draws; entropy when absent
    pub rng_seed: Option<u64>,
    /// Optional TOML catalog replacing the built-in loot boxes
    pub catalog_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "./neuroscore-data".to_string(),
            history_retention: DEFAULT_HISTORY_RETENTION,
            server_addr: "127.0.0.1:3000".to_string(),
            log_filter: "info".to_string(),
            rng_seed: None,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Load from a TOML file. A missing file yields defaults; an unreadable
    /// or malformed one is an error. `NEUROSCORE_DATA_DIR` wins over the file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = match fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                config.data_dir = dir;
            }
        }

        Ok(config)
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }
}
