//! Configuration module for vlogger.
//!
//! Contains the sink configuration: log path, rotation interval and the
//! retired-segment retention window.

pub mod sink;

pub use sink::{
    ConfigError, SinkConfig, DEFAULT_BACKUP_COUNT, DEFAULT_LOG_PATH, DEFAULT_ROTATION_SECS,
    DEFAULT_SOURCE_NAME,
};
