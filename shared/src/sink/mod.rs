//! The logging sink.
//!
//! `LoggingSink` receives two kinds of inbound events, a structured vehicle
//! speed update and a free-form log-topic message, and appends one formatted
//! line per event to a time-rotated log file. The external collaborator that
//! performs subscription and transport invokes the sink through the
//! [`VehicleSubscriber`] capability trait.

use crate::config::{ConfigError, SinkConfig};
use crate::models::VehicleEvent;
use crate::rotation::RotatingFileWriter;
use chrono::Local;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

/// Timestamp format used in log lines.
const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Errors that can occur while operating the sink.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The log directory or file could not be created, written or rotated.
    ///
    /// Fatal to the sink and never retried internally; the host decides
    /// whether to continue running without file logging.
    #[error("Log file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The sink configuration is invalid.
    #[error("Invalid sink configuration: {0}")]
    Config(#[from] ConfigError),

    /// Failed to acquire the lock on the active segment.
    #[error("Failed to acquire lock on the logging sink")]
    LockError,
}

/// Capability interface invoked by the external event-delivery collaborator.
///
/// Implementations must be thread-safe: events for the speed signal and the
/// log topic arrive on logically independent notification channels.
pub trait VehicleSubscriber: Send + Sync {
    /// Called once when the host's startup hook fires.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscriber cannot be brought up; fatal to the
    /// subscriber but surfaced to the host rather than crashing it.
    fn start(&self) -> Result<(), SinkError>;

    /// Called for every update of the subscribed speed signal.
    ///
    /// # Errors
    ///
    /// Returns an error if handling the event fails.
    fn on_speed_event(&self, value: f64) -> Result<(), SinkError>;

    /// Called for every message published to the subscribed log topic.
    ///
    /// # Errors
    ///
    /// Returns an error if handling the event fails.
    fn on_log_topic_event(&self, text: &str) -> Result<(), SinkError>;

    /// Routes a decoded [`VehicleEvent`] to the matching handler.
    ///
    /// # Errors
    ///
    /// Returns an error if the invoked handler fails.
    fn on_event(&self, event: VehicleEvent) -> Result<(), SinkError> {
        match event {
            VehicleEvent::SpeedSample { value } => self.on_speed_event(value),
            VehicleEvent::RawMessage { text } => self.on_log_topic_event(&text),
        }
    }
}

/// A sink that appends received events to a rotating log file.
///
/// All file access (open, rotate, write) is serialized behind an internal
/// mutex, so concurrent deliveries never interleave partial lines and a
/// rotation never races a write.
///
/// # Example
///
/// ```no_run
/// use shared::config::SinkConfig;
/// use shared::sink::{LoggingSink, VehicleSubscriber};
///
/// let sink = LoggingSink::new(SinkConfig::new("./log/vehicle"))?;
/// sink.start()?;
/// sink.on_speed_event(42.5)?;
/// sink.on_log_topic_event("brake check passed")?;
/// # Ok::<(), shared::sink::SinkError>(())
/// ```
#[derive(Debug)]
pub struct LoggingSink {
    config: SinkConfig,
    writer: Mutex<RotatingFileWriter>,
}

impl LoggingSink {
    /// Creates a sink, validating the configuration and opening the active
    /// segment (creating the log directory as needed).
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the log
    /// directory/file cannot be created or opened.
    pub fn new(config: SinkConfig) -> Result<Self, SinkError> {
        config.validate_config()?;
        let writer = RotatingFileWriter::open(
            &config.log_path,
            config.rotation_interval(),
            config.backup_count,
        )?;
        Ok(Self {
            config,
            writer: Mutex::new(writer),
        })
    }

    /// Returns the sink configuration.
    #[must_use]
    pub fn config(&self) -> &SinkConfig {
        &self.config
    }

    /// Returns the retired segments currently on disk, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory cannot be read.
    pub fn retired_segments(&self) -> Result<Vec<PathBuf>, SinkError> {
        let writer = self.writer.lock().map_err(|_| SinkError::LockError)?;
        Ok(writer.retired()?)
    }

    /// Formats and appends a single message line.
    fn append(&self, message: &str) -> Result<(), SinkError> {
        let line = format_line(&self.config.source_name, message);
        let mut writer = self.writer.lock().map_err(|_| SinkError::LockError)?;
        writer.write_line(&line)?;
        Ok(())
    }
}

impl VehicleSubscriber for LoggingSink {
    fn start(&self) -> Result<(), SinkError> {
        tracing::info!(
            path = %self.config.log_path.display(),
            interval_secs = self.config.rotation_interval_secs,
            backup_count = self.config.backup_count,
            "Logging sink starting"
        );
        self.append("vehicle logger started")
    }

    fn on_speed_event(&self, value: f64) -> Result<(), SinkError> {
        self.append(&format!("speed : {value}"))
    }

    fn on_log_topic_event(&self, text: &str) -> Result<(), SinkError> {
        self.append(text)
    }
}

/// Formats one log line as `"<timestamp> [<source name>]- <message>"`.
#[must_use]
pub fn format_line(source_name: &str, message: &str) -> String {
    format!(
        "{} [{source_name}]- {message}",
        Local::now().format(LINE_TIMESTAMP_FORMAT)
    )
}
