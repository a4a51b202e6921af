//! Vlogger Shared Library
//!
//! This crate contains the types and components shared across the vlogger
//! vehicle logging application.
//!
//! # Modules
//!
//! - [`models`] - Event model for inbound vehicle signal and topic data
//! - [`config`] - Sink configuration (log path, rotation, retention)
//! - [`rotation`] - Time-bounded rotating file writer with FIFO retention
//! - [`sink`] - The [`sink::LoggingSink`] component and its capability trait
//!
//! # Example
//!
//! ```no_run
//! use shared::config::SinkConfig;
//! use shared::sink::{LoggingSink, VehicleSubscriber};
//!
//! let config = SinkConfig::new("./log/vehicle");
//! let sink = LoggingSink::new(config)?;
//! sink.start()?;
//! sink.on_speed_event(42.5)?;
//! # Ok::<(), shared::sink::SinkError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod models;
pub mod rotation;
pub mod sink;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
pub use validator;
