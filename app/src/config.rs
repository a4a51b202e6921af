//! Application configuration module.
//!
//! Handles loading configuration from environment variables with sensible
//! defaults.

use anyhow::Result;
use shared::config::SinkConfig;

/// Default emission interval of the simulated speed feed, in milliseconds.
pub const DEFAULT_SPEED_INTERVAL_MS: u64 = 1000;

/// Application configuration.
///
/// Configuration values can be set via environment variables:
/// - `VLOGGER_LOG_PATH`: base path of the active log segment (default: "./log/vehicle")
/// - `VLOGGER_ROTATION_SECS`: rotation interval in seconds (default: 60)
/// - `VLOGGER_BACKUP_COUNT`: retired segments kept on disk (default: 5)
/// - `VLOGGER_SOURCE_NAME`: source name stamped into each line (default: "VehicleSafetyLogger")
/// - `VLOGGER_SPEED_INTERVAL_MS`: simulated speed feed interval (default: 1000)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The sink configuration handed to the logging sink.
    pub sink: SinkConfig,
    /// Emission interval of the simulated speed feed, in milliseconds.
    pub speed_interval_ms: u64,
}

impl AppConfig {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let mut sink = SinkConfig::default();

        if let Ok(path) = std::env::var("VLOGGER_LOG_PATH") {
            sink.log_path = path.into();
        }
        if let Some(secs) = parse_var::<u64>("VLOGGER_ROTATION_SECS")? {
            sink.rotation_interval_secs = secs;
        }
        if let Some(count) = parse_var::<usize>("VLOGGER_BACKUP_COUNT")? {
            sink.backup_count = count;
        }
        if let Ok(name) = std::env::var("VLOGGER_SOURCE_NAME") {
            sink.source_name = name;
        }

        let speed_interval_ms = parse_var::<u64>("VLOGGER_SPEED_INTERVAL_MS")?
            .unwrap_or(DEFAULT_SPEED_INTERVAL_MS);

        Ok(Self {
            sink,
            speed_interval_ms,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sink: SinkConfig::default(),
            speed_interval_ms: DEFAULT_SPEED_INTERVAL_MS,
        }
    }
}

/// Reads and parses an optional environment variable.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::var(name)
        .ok()
        .map(|v| v.parse::<T>())
        .transpose()
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::config::{DEFAULT_BACKUP_COUNT, DEFAULT_ROTATION_SECS};

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.sink.rotation_interval_secs, DEFAULT_ROTATION_SECS);
        assert_eq!(config.sink.backup_count, DEFAULT_BACKUP_COUNT);
        assert_eq!(config.speed_interval_ms, DEFAULT_SPEED_INTERVAL_MS);
    }

    #[test]
    fn test_parse_var_missing_is_none() {
        let value: Option<u64> = parse_var("VLOGGER_TEST_UNSET_VARIABLE").unwrap();
        assert!(value.is_none());
    }
}
