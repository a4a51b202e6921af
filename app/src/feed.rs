//! Vehicle feed messages and the simulated feed.
//!
//! The real subscription transport (data broker, pub/sub broker) belongs to
//! an external collaborator; its seam with this application is an mpsc
//! channel of [`FeedMessage`]s. Any adapter that owns a
//! `mpsc::Sender<FeedMessage>` can deliver events to the dispatch loop.
//!
//! For development and testing, [`SimulatedFeed`] stands in for the missing
//! broker and emits periodic speed samples.

use crate::VEHICLE_SPEED_SIGNAL;
use shared::models::SignalReply;
use std::time::Duration;
use tokio::sync::mpsc;

/// A message delivered by the vehicle data collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// An update for a subscribed vehicle signal.
    SignalUpdate(SignalReply),
    /// A message published on a pub/sub topic.
    TopicMessage {
        /// The topic the message was published to.
        topic: String,
        /// The raw string payload.
        payload: String,
    },
}

/// A development feed that emits periodic `Vehicle.Speed` samples.
///
/// The simulated speed follows a triangle wave between 0 and 120 so the
/// resulting log is recognizably non-constant.
#[derive(Debug)]
pub struct SimulatedFeed {
    interval: Duration,
}

impl SimulatedFeed {
    /// Creates a feed emitting one sample per `interval`.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Runs the feed until the receiving side of `tx` is dropped.
    pub async fn run(self, tx: mpsc::Sender<FeedMessage>) {
        let mut ticker = tokio::time::interval(self.interval);
        let mut step: u32 = 0;
        loop {
            ticker.tick().await;
            let speed = Self::speed_at(step);
            let message =
                FeedMessage::SignalUpdate(SignalReply::new(VEHICLE_SPEED_SIGNAL, Some(speed)));
            if tx.send(message).await.is_err() {
                tracing::debug!("Feed channel closed, stopping simulated feed");
                return;
            }
            step = step.wrapping_add(1);
        }
    }

    /// Triangle wave over 0..=120 km/h with a period of 48 steps.
    fn speed_at(step: u32) -> f64 {
        let phase = step % 48;
        let level = if phase < 24 { phase } else { 48 - phase };
        f64::from(level * 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_wave_stays_in_range() {
        for step in 0..200 {
            let speed = SimulatedFeed::speed_at(step);
            assert!((0.0..=120.0).contains(&speed), "step {step} -> {speed}");
        }
    }

    #[test]
    fn test_speed_wave_rises_then_falls() {
        assert_eq!(SimulatedFeed::speed_at(0), 0.0);
        assert_eq!(SimulatedFeed::speed_at(24), 120.0);
        assert_eq!(SimulatedFeed::speed_at(47), 5.0);
        assert_eq!(SimulatedFeed::speed_at(48), 0.0);
    }

    #[tokio::test]
    async fn test_simulated_feed_emits_speed_updates() {
        let (tx, mut rx) = mpsc::channel(8);
        let feed = SimulatedFeed::new(Duration::from_millis(1));
        let handle = tokio::spawn(feed.run(tx));

        let first = rx.recv().await.unwrap();
        match first {
            FeedMessage::SignalUpdate(reply) => {
                assert_eq!(reply.signal, VEHICLE_SPEED_SIGNAL);
                assert!(reply.value.is_some());
            }
            FeedMessage::TopicMessage { .. } => panic!("unexpected topic message"),
        }

        // Dropping the receiver stops the feed.
        drop(rx);
        handle.await.unwrap();
    }
}
