//! Core types shared by the normalizer, the tracker and the sinks.

use serde_json::{Map, Value};

/// One reading repaired out of a decoder line.
///
/// Only `meter_id` and `consumption` are interpreted. Everything else the
/// decoder emitted is carried along untouched in `time` and `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeterReading {
    /// Identity broadcast by the meter, as text. `"None"` when the record had
    /// no usable `ID`.
    pub meter_id: String,
    /// Cumulative counter value in the meter's own units.
    pub consumption: i64,
    /// Top-level `Time` value, if the decoder sent one.
    pub time: Option<Value>,
    /// Remaining fields of the `R900` record (`Leak`, `BackFlow`, ...).
    pub extra: Map<String, Value>,
}

impl MeterReading {
    pub fn new(meter_id: impl Into<String>, consumption: i64) -> Self {
        Self {
            meter_id: meter_id.into(),
            consumption,
            time: None,
            extra: Map::new(),
        }
    }
}

/// A reading attributed to a meter and annotated with its delta.
///
/// The [`Display`](std::fmt::Display) form is the exact line written to the
/// console and the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledEvent {
    pub meter_id: String,
    pub label: String,
    pub consumption: i64,
    pub delta: i64,
    /// `false` when the label was synthesised for an id missing from the registry.
    pub recognized: bool,
}

impl std::fmt::Display for LabeledEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] Consumption: {} ({})",
            self.label,
            crate::format::thousands(self.consumption),
            crate::format::signed_thousands(self.delta),
        )
    }
}
