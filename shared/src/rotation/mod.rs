//! Time-bounded log rotation.
//!
//! This module implements the rotating file writer behind the logging sink:
//! one active segment open for appends, rotated by wall-clock age, with a
//! bounded set of retired segments pruned oldest-first.

pub mod writer;

pub use writer::{retired_segments, RotatingFileWriter};
