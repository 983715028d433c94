//! Tracker — attributes readings to meters and computes usage deltas.
//!
//! The tracker owns the per-meter "last seen" state for one run. It starts
//! empty, is updated once per reading, and is never persisted, so the first
//! reading of every meter in a run has a delta of zero.

use std::collections::HashMap;

use crate::registry::MeterRegistry;
use crate::types::{LabeledEvent, MeterReading};

/// Label prefix for ids missing from the registry.
pub const UNRECOGNIZED_PREFIX: &str = "UNRECOGNIZED ID";

/// Last observed consumption per meter id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerState {
    last: HashMap<String, i64>,
}

impl TrackerState {
    pub fn last(&self, meter_id: &str) -> Option<i64> {
        self.last.get(meter_id).copied()
    }

    /// Number of distinct meters seen so far.
    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }

    /// Record `consumption` for `meter_id`, returning the previous value.
    fn record(&mut self, meter_id: &str, consumption: i64) -> Option<i64> {
        self.last.insert(meter_id.to_string(), consumption)
    }
}

/// Result of feeding one reading through the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub event: LabeledEvent,
    /// `true` when this is the first reading for the meter in this run.
    pub first_seen: bool,
}

impl Observation {
    /// First sighting of an id the registry does not know.
    pub fn is_discovery(&self) -> bool {
        self.first_seen && !self.event.recognized
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tracker {
    registry: MeterRegistry,
    state: TrackerState,
}

impl Tracker {
    pub fn new(registry: MeterRegistry) -> Self {
        Self {
            registry,
            state: TrackerState::default(),
        }
    }

    pub fn registry(&self) -> &MeterRegistry {
        &self.registry
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Label for `meter_id`, synthesised when the registry has no entry.
    pub fn resolve_label(&self, meter_id: &str) -> (String, bool) {
        match self.registry.label(meter_id) {
            Some(label) => (label.to_string(), true),
            None => (format!("{UNRECOGNIZED_PREFIX} {meter_id}"), false),
        }
    }

    /// Label the reading, compute its delta and update the state.
    ///
    /// A meter without a previous value uses the reading itself as baseline.
    /// Negative deltas (rollover, replaced meter) are reported unchanged.
    pub fn observe(&mut self, reading: &MeterReading) -> Observation {
        let (label, recognized) = self.resolve_label(&reading.meter_id);
        let previous = self.state.record(&reading.meter_id, reading.consumption);
        let first_seen = previous.is_none();
        let delta = reading
            .consumption
            .saturating_sub(previous.unwrap_or(reading.consumption));

        Observation {
            event: LabeledEvent {
                meter_id: reading.meter_id.clone(),
                label,
                consumption: reading.consumption,
                delta,
                recognized,
            },
            first_seen,
        }
    }
}
