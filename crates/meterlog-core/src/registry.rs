//! Static meter-id → label mapping.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Known meters and their human-readable labels.
///
/// Built once at startup and never mutated afterwards; the tracker only
/// borrows it for lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeterRegistry {
    labels: HashMap<String, String>,
}

impl MeterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for `meter_id`, if the meter is known.
    pub fn label(&self, meter_id: &str) -> Option<&str> {
        self.labels.get(meter_id).map(String::as_str)
    }

    pub fn contains(&self, meter_id: &str) -> bool {
        self.labels.contains_key(meter_id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Add or replace a single entry.
    pub fn insert(&mut self, meter_id: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(meter_id.into(), label.into());
    }

    /// Apply an `ID=LABEL` override as given on the command line.
    pub fn apply_override(&mut self, spec: &str) -> Result<()> {
        let (id, label) = spec
            .split_once('=')
            .map(|(id, label)| (id.trim(), label.trim()))
            .filter(|(id, label)| !id.is_empty() && !label.is_empty())
            .ok_or_else(|| Error::MeterOverride(spec.to_string()))?;
        self.insert(id, label);
        Ok(())
    }
}

impl From<HashMap<String, String>> for MeterRegistry {
    fn from(labels: HashMap<String, String>) -> Self {
        Self { labels }
    }
}

impl<K, V> FromIterator<(K, V)> for MeterRegistry
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
