//! Event model.
//!
//! Defines the `VehicleEvent` union consumed by the logging sink and the
//! `SignalReply` container the data-broker collaborator delivers for a
//! subscribed signal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An inbound event destined for the logging sink.
///
/// Events are immutable, created once per inbound notification and consumed
/// immediately; nothing beyond their formatted textual representation is
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VehicleEvent {
    /// A structured vehicle speed update.
    SpeedSample {
        /// The decoded speed value.
        value: f64,
    },
    /// A free-form message published to the log topic.
    RawMessage {
        /// The raw string payload.
        text: String,
    },
}

/// Errors raised while extracting data from a delivered event.
#[derive(Debug, Error)]
pub enum EventError {
    /// The delivered sample did not carry a value for the expected signal.
    ///
    /// Malformed events are dropped and reported once through the host's
    /// diagnostic logger; they never reach the rotating sink.
    #[error("Signal '{signal}' was delivered without a value")]
    MissingValue {
        /// The signal path the value was expected for.
        signal: String,
    },
}

/// The value container delivered for a subscribed vehicle signal.
///
/// A reply always names the signal it belongs to; the value itself may be
/// absent when the broker forwards an empty sample.
///
/// # Example
///
/// ```
/// use shared::models::SignalReply;
///
/// let reply = SignalReply::new("Vehicle.Speed", Some(88.2));
/// assert_eq!(reply.speed().unwrap(), 88.2);
///
/// let empty = SignalReply::new("Vehicle.Speed", None);
/// assert!(empty.speed().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReply {
    /// Dotted path of the signal (e.g. `Vehicle.Speed`).
    pub signal: String,

    /// The current value, if the broker delivered one.
    pub value: Option<f64>,
}

impl SignalReply {
    /// Creates a new signal reply.
    #[must_use]
    pub fn new(signal: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            signal: signal.into(),
            value,
        }
    }

    /// Extracts the speed value from the reply.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingValue`] if the reply carries no value.
    pub fn speed(&self) -> Result<f64, EventError> {
        self.value.ok_or_else(|| EventError::MissingValue {
            signal: self.signal.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_reply_speed_present() {
        let reply = SignalReply::new("Vehicle.Speed", Some(50.0));
        assert_eq!(reply.speed().unwrap(), 50.0);
    }

    #[test]
    fn test_signal_reply_speed_missing() {
        let reply = SignalReply::new("Vehicle.Speed", None);
        let err = reply.speed().unwrap_err();
        assert!(matches!(err, EventError::MissingValue { ref signal } if signal == "Vehicle.Speed"));
        assert_eq!(
            err.to_string(),
            "Signal 'Vehicle.Speed' was delivered without a value"
        );
    }

    #[test]
    fn test_vehicle_event_serialization() {
        let event = VehicleEvent::SpeedSample { value: 12.5 };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"speed_sample\""));
        assert!(json.contains("\"value\":12.5"));

        let event = VehicleEvent::RawMessage {
            text: "door open".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"kind\":\"raw_message\""));
        assert!(json.contains("\"text\":\"door open\""));
    }

    #[test]
    fn test_vehicle_event_deserialization() {
        let json = r#"{"kind":"speed_sample","value":99.9}"#;
        let event: VehicleEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, VehicleEvent::SpeedSample { value: 99.9 });
    }

    #[test]
    fn test_signal_reply_roundtrip() {
        let original = SignalReply::new("Vehicle.Speed", Some(3.25));
        let json = serde_json::to_string(&original).unwrap();
        let deserialized: SignalReply = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }
}
