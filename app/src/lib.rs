//! Vlogger Application
//!
//! This crate wires the vehicle data feed to the rotating logging sink. It
//! subscribes to the `Vehicle.Speed` signal and the `loggerapp/log` pub/sub
//! topic and appends every received value as one formatted line to a
//! time-rotated log file.
//!
//! # Architecture
//!
//! The external collaborator (data broker / pub/sub transport) delivers
//! [`feed::FeedMessage`]s over an mpsc channel; the [`dispatch::dispatch`]
//! loop routes
//! them to the [`shared::sink::LoggingSink`] through its
//! [`shared::sink::VehicleSubscriber`] capability trait. In the absence of a
//! real broker the binary runs a [`feed::SimulatedFeed`].
//!
//! # Example
//!
//! ```no_run
//! use app::run_app;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     run_app().await
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
pub mod dispatch;
pub mod feed;

pub use config::AppConfig;
pub use dispatch::dispatch;

use anyhow::Result;
use feed::SimulatedFeed;
use shared::sink::{LoggingSink, VehicleSubscriber};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Dotted path of the subscribed vehicle speed signal.
pub const VEHICLE_SPEED_SIGNAL: &str = "Vehicle.Speed";

/// Pub/sub topic whose messages are appended verbatim to the log.
pub const LOGGER_LOG_TOPIC: &str = "loggerapp/log";

/// Runs the vlogger application.
///
/// Loads configuration from environment variables, brings up the logging
/// sink and runs the dispatch loop until SIGTERM/Ctrl+C.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from the environment
/// - The logging sink fails to start (log directory/file cannot be created)
/// - A fatal I/O error occurs while writing to the log
pub async fn run_app() -> Result<()> {
    let config = AppConfig::from_env()?;
    run_app_with_config(config).await
}

/// Runs the vlogger application with the provided configuration.
///
/// This is useful for testing or when you want to provide configuration
/// programmatically.
///
/// # Errors
///
/// Returns an error if the sink fails to start or a fatal I/O error occurs.
pub async fn run_app_with_config(config: AppConfig) -> Result<()> {
    let sink = Arc::new(LoggingSink::new(config.sink.clone())?);
    let sink_config = sink.config();
    tracing::info!(
        log_path = %sink_config.log_path.display(),
        rotation_secs = sink_config.rotation_interval_secs,
        backup_count = sink_config.backup_count,
        "Starting vlogger"
    );
    sink.start()?;

    let (tx, rx) = mpsc::channel(64);
    let feed = SimulatedFeed::new(Duration::from_millis(config.speed_interval_ms));
    let feed_task = tokio::spawn(feed.run(tx));

    tokio::select! {
        result = dispatch(Arc::clone(&sink), rx) => result?,
        () = shutdown_signal() => {}
    }

    feed_task.abort();
    tracing::info!("Vlogger shutdown complete");
    Ok(())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
