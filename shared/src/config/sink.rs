//! Sink configuration.
//!
//! Defines `SinkConfig`, the explicit configuration handed to the logging
//! sink's constructor: base log path, rotation interval, backup count and the
//! source name stamped into every line. There is no hidden global state; the
//! sink owns exactly what it is given here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

/// Default base path of the active log segment.
pub const DEFAULT_LOG_PATH: &str = "./log/vehicle";

/// Default rotation interval in seconds.
pub const DEFAULT_ROTATION_SECS: u64 = 60;

/// Default number of retired segments kept on disk.
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Default source name written into each log line.
pub const DEFAULT_SOURCE_NAME: &str = "VehicleSafetyLogger";

/// Errors that can occur while validating a sink configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rotation interval is zero.
    #[error("Rotation interval must be at least one second")]
    ZeroInterval,

    /// The backup count is zero.
    #[error("Backup count must be at least one")]
    ZeroBackupCount,

    /// The source name is empty.
    #[error("Source name cannot be empty")]
    EmptySourceName,

    /// The log path has no file-name component to derive segment names from.
    #[error("Log path '{0}' has no file name")]
    InvalidLogPath(String),

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

/// Configuration for the rotating logging sink.
///
/// # Example
///
/// ```
/// use shared::config::SinkConfig;
///
/// let config = SinkConfig::new("./log/vehicle")
///     .with_rotation_interval_secs(30)
///     .with_backup_count(3);
///
/// assert_eq!(config.rotation_interval_secs, 30);
/// assert!(config.validate_config().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct SinkConfig {
    /// Base path of the active segment; retired segments get a timestamp
    /// suffix appended to this path.
    pub log_path: PathBuf,

    /// Wall-clock age (seconds) after which the active segment is rotated.
    #[validate(range(min = 1, message = "Rotation interval must be at least one second"))]
    pub rotation_interval_secs: u64,

    /// Maximum number of retired segments kept on disk; the oldest beyond
    /// this count is deleted after each rotation.
    #[validate(range(min = 1, message = "Backup count must be at least one"))]
    pub backup_count: usize,

    /// Name written into the `[<name>]` field of every log line.
    #[validate(length(min = 1, message = "Source name cannot be empty"))]
    pub source_name: String,
}

impl SinkConfig {
    /// Creates a configuration with the given base path and default rotation
    /// interval, backup count and source name.
    #[must_use]
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            rotation_interval_secs: DEFAULT_ROTATION_SECS,
            backup_count: DEFAULT_BACKUP_COUNT,
            source_name: DEFAULT_SOURCE_NAME.to_string(),
        }
    }

    /// Sets the rotation interval in seconds.
    #[must_use]
    pub fn with_rotation_interval_secs(mut self, secs: u64) -> Self {
        self.rotation_interval_secs = secs;
        self
    }

    /// Sets the number of retired segments kept on disk.
    #[must_use]
    pub fn with_backup_count(mut self, count: usize) -> Self {
        self.backup_count = count;
        self
    }

    /// Sets the source name stamped into every line.
    #[must_use]
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Returns the rotation interval as a `Duration`.
    #[must_use]
    pub fn rotation_interval(&self) -> Duration {
        Duration::from_secs(self.rotation_interval_secs)
    }

    /// Returns the directory the active segment lives in, if the path names
    /// one.
    #[must_use]
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The rotation interval is zero
    /// - The backup count is zero
    /// - The source name is empty
    /// - The log path has no file-name component
    pub fn validate_config(&self) -> Result<(), ConfigError> {
        if self.rotation_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.backup_count == 0 {
            return Err(ConfigError::ZeroBackupCount);
        }
        if self.source_name.is_empty() {
            return Err(ConfigError::EmptySourceName);
        }
        if self.log_path.file_name().is_none() {
            return Err(ConfigError::InvalidLogPath(
                self.log_path.display().to_string(),
            ));
        }
        self.validate()?;
        Ok(())
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_config_defaults() {
        let config = SinkConfig::default();
        assert_eq!(config.log_path, PathBuf::from(DEFAULT_LOG_PATH));
        assert_eq!(config.rotation_interval_secs, DEFAULT_ROTATION_SECS);
        assert_eq!(config.backup_count, DEFAULT_BACKUP_COUNT);
        assert_eq!(config.source_name, DEFAULT_SOURCE_NAME);
    }

    #[test]
    fn test_sink_config_builders() {
        let config = SinkConfig::new("/tmp/vehicle.log")
            .with_rotation_interval_secs(10)
            .with_backup_count(2)
            .with_source_name("TestLogger");

        assert_eq!(config.rotation_interval_secs, 10);
        assert_eq!(config.backup_count, 2);
        assert_eq!(config.source_name, "TestLogger");
        assert_eq!(config.rotation_interval(), Duration::from_secs(10));
    }

    #[test]
    fn test_sink_config_validate_valid() {
        let config = SinkConfig::default();
        assert!(config.validate_config().is_ok());
    }

    #[test]
    fn test_sink_config_validate_zero_interval() {
        let config = SinkConfig::default().with_rotation_interval_secs(0);
        let result = config.validate_config();
        assert!(matches!(result.unwrap_err(), ConfigError::ZeroInterval));
    }

    #[test]
    fn test_sink_config_validate_zero_backup_count() {
        let config = SinkConfig::default().with_backup_count(0);
        let result = config.validate_config();
        assert!(matches!(result.unwrap_err(), ConfigError::ZeroBackupCount));
    }

    #[test]
    fn test_sink_config_validate_empty_source_name() {
        let config = SinkConfig::default().with_source_name("");
        let result = config.validate_config();
        assert!(matches!(result.unwrap_err(), ConfigError::EmptySourceName));
    }

    #[test]
    fn test_sink_config_validate_invalid_path() {
        let config = SinkConfig::new("/");
        let result = config.validate_config();
        assert!(matches!(result.unwrap_err(), ConfigError::InvalidLogPath(_)));
    }

    #[test]
    fn test_sink_config_log_dir() {
        let config = SinkConfig::new("./log/vehicle");
        assert_eq!(config.log_dir(), Some(Path::new("./log")));

        let config = SinkConfig::new("vehicle");
        assert_eq!(config.log_dir(), None);
    }

    #[test]
    fn test_sink_config_serialization() {
        let config = SinkConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SinkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
