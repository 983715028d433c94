//! meterlog-core — record normalizer and meter tracker.
//!
//! # Architecture
//!
//! ```text
//! raw line ──► normalizer ──► MeterReading ──► Tracker ──► LabeledEvent
//!                  │                              │
//!               (discard)                    MeterRegistry
//! ```
//!
//! Nothing in this crate touches stdin, stdout or the event log; the feed
//! crate owns the read loop and the sinks.

pub mod config;
pub mod error;
pub mod format;
pub mod normalizer;
pub mod registry;
pub mod tracker;
pub mod types;

pub use error::{Error, Result};
pub use registry::MeterRegistry;
pub use tracker::{Tracker, TrackerState};
pub use types::{LabeledEvent, MeterReading};
