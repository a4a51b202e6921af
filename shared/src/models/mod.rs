//! Data models for vlogger.
//!
//! This module contains the event types delivered by the vehicle data
//! collaborator and the errors raised while decoding them.

pub mod event;

pub use event::{EventError, SignalReply, VehicleEvent};
