//! Event dispatch loop.
//!
//! Consumes [`FeedMessage`]s from the collaborator channel and routes them to
//! a [`VehicleSubscriber`]: speed updates for `Vehicle.Speed` go through
//! value extraction to `on_speed_event`, messages on the log topic go to
//! `on_log_topic_event`. Anything else is ignored at debug level.
//!
//! Malformed speed samples (no value delivered) are dropped after one
//! diagnostic entry in the host's general-purpose logger; they never reach
//! the subscriber.

use crate::feed::FeedMessage;
use crate::{LOGGER_LOG_TOPIC, VEHICLE_SPEED_SIGNAL};
use shared::models::VehicleEvent;
use shared::sink::{SinkError, VehicleSubscriber};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Runs the dispatch loop until the feed channel closes.
///
/// # Errors
///
/// Returns an error if the subscriber fails to handle an event; subscriber
/// I/O failures are fatal and stop the loop.
pub async fn dispatch<S: VehicleSubscriber>(
    subscriber: Arc<S>,
    mut rx: mpsc::Receiver<FeedMessage>,
) -> Result<(), SinkError> {
    while let Some(message) = rx.recv().await {
        match message {
            FeedMessage::SignalUpdate(reply) if reply.signal == VEHICLE_SPEED_SIGNAL => {
                match reply.speed() {
                    Ok(value) => subscriber.on_event(VehicleEvent::SpeedSample { value })?,
                    Err(err) => {
                        tracing::warn!(%err, "Dropping malformed speed sample");
                    }
                }
            }
            FeedMessage::SignalUpdate(reply) => {
                tracing::debug!(signal = %reply.signal, "Ignoring unsubscribed signal update");
            }
            FeedMessage::TopicMessage { topic, payload } if topic == LOGGER_LOG_TOPIC => {
                subscriber.on_event(VehicleEvent::RawMessage { text: payload })?;
            }
            FeedMessage::TopicMessage { topic, .. } => {
                tracing::debug!(%topic, "Ignoring message on unsubscribed topic");
            }
        }
    }
    tracing::info!("Feed channel closed, dispatch loop finished");
    Ok(())
}
