//! Configuration loading.
//!
//! Reads optional settings from JSON at `~/.sysport/config.json`. The file is
//! never written by the tool; a missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{Error, Result};

/// Configuration data stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Colorize terminal output.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Number of processes listed in the system overview.
    #[serde(default = "default_top_processes")]
    pub top_processes: usize,

    /// Refresh interval of the live overview, in seconds.
    #[serde(default = "default_live_interval")]
    pub live_interval_secs: u64,

    /// `ss` executable used to read the socket table on Linux.
    #[serde(default = "default_ss_path")]
    pub ss_path: PathBuf,

    /// `lsof` executable used to read the socket table on macOS.
    #[serde(default = "default_lsof_path")]
    pub lsof_path: PathBuf,

    /// `ps` executable used for process lookups on macOS.
    #[serde(default = "default_ps_path")]
    pub ps_path: PathBuf,
}

fn default_true() -> bool {
    true
}

fn default_top_processes() -> usize {
    5
}

fn default_live_interval() -> u64 {
    2
}

fn default_ss_path() -> PathBuf {
    PathBuf::from("ss")
}

fn default_lsof_path() -> PathBuf {
    PathBuf::from("lsof")
}

fn default_ps_path() -> PathBuf {
    PathBuf::from("ps")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: default_true(),
            top_processes: default_top_processes(),
            live_interval_secs: default_live_interval(),
            ss_path: default_ss_path(),
            lsof_path: default_lsof_path(),
            ps_path: default_ps_path(),
        }
    }
}

/// Location of the configuration file.
pub struct ConfigStore {
    /// Path to the configuration file.
    config_path: PathBuf,
}

impl ConfigStore {
    /// Create a config store with the default path.
    ///
    /// Default path: `~/.sysport/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            config_path: home.join(".sysport").join("config.json"),
        })
    }

    /// Create a config store with a custom path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from disk.
    ///
    /// Returns default config if the file doesn't exist.
    pub async fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }
}
