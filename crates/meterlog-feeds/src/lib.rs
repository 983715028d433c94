//! meterlog-feeds — input feed and event sinks for meterlog.
//!
//! [`stdin::run`] reads the decoder's output line by line and pushes every
//! labelled event into an [`EventSink`]. The binary wires it to a [`Tee`] of
//! the console and the per-run [`LogFile`].

pub mod sink;
pub mod stdin;

pub use sink::{Console, EventSink, LogFile, Tee};
pub use stdin::StreamSummary;
