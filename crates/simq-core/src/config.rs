//! Configuration types for simq

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Dispatcher configuration
///
/// The host list itself is not configuration; it is the external
/// `<hostName> <capacity>` interface loaded by `HostPool`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Path to the plain-text host list
    pub hosts_file: PathBuf,
    /// Shared directory holding load markers
    pub status_dir: PathBuf,
    /// Sleep interval while all hosts are full, in milliseconds
    pub poll_interval_ms: u64,
    /// Pause after each launch, in milliseconds
    ///
    /// Gives the remote side a window to surface its load marker before
    /// the next capacity probe.
    pub pause_after_launch_ms: u64,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            hosts_file: PathBuf::from("hostList.txt"),
            status_dir: PathBuf::from("runningJobs"),
            poll_interval_ms: 500,
            pause_after_launch_ms: 600,
            logging: LoggingConfig::default(),
        }
    }
}

impl DispatcherConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, crate::SimqError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::SimqError::Config(format!("Failed to read config file: {}", e))
        })?;
        toml::from_str(&content)
            .map_err(|e| crate::SimqError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Sleep interval for the WAITING state
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Pause applied after each launch
    pub fn pause_after_launch(&self) -> Duration {
        Duration::from_millis(self.pause_after_launch_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
