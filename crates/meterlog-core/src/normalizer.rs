//! Normalizer — repairs one decoder line into a [`MeterReading`].
//!
//! The decoder prints records in a console syntax that looks like JSON but
//! leaves field names bare:
//!
//! ```text
//! {Time:1,R900:{ID:701193108,Unkn1:163,NoUse:0,BackFlow:0,Consumption:6056951,Unkn3:0,Leak:0,LeakNow:0}}
//! ```
//!
//! Normalisation runs in three steps, each of which may discard the line:
//!
//! 1. the trimmed line must open with `{` (banners and blank lines stop here);
//! 2. [`repair`] quotes every known field name that precedes a `:`;
//! 3. the repaired text is decoded as JSON and the `R900` record is read.
//!
//! Discarding is never an error. [`normalize`] returns `None`; [`parse`]
//! returns the [`Rejection`] so the feed can log why.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::types::MeterReading;

/// Field names the decoder leaves unquoted.
pub static BARE_FIELDS: phf::Set<&'static str> = phf::phf_set! {
    "Time",
    "R900",
    "ID",
    "Unkn1",
    "NoUse",
    "BackFlow",
    "Consumption",
    "Unkn3",
    "Leak",
    "LeakNow",
};

/// Key of the nested meter record.
pub const RECORD_KEY: &str = "R900";
const ID_KEY: &str = "ID";
const CONSUMPTION_KEY: &str = "Consumption";
const TIME_KEY: &str = "Time";

/// Sentinel id for records that carry no usable `ID`.
pub const MISSING_ID: &str = "None";

// A string literal is matched first so that its contents are skipped over;
// otherwise an identifier followed by a colon is a candidate field name.
static FIELD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|\b(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?P<ws>\s*):"#)
        .expect("field-name pattern is a valid regex")
});

/// Why a line produced no reading.
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    #[error("line does not open a record")]
    NotARecord,
    #[error("record is malformed after repair: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unusable Consumption value {0}")]
    Consumption(Value),
}

/// Quote every bare field name from [`BARE_FIELDS`] that sits before a `:`.
///
/// Values, already-quoted names and names outside the vocabulary are left
/// as they are, so repairing twice gives the same text as repairing once.
pub fn repair(line: &str) -> String {
    FIELD_NAME
        .replace_all(line, |caps: &Captures<'_>| match caps.name("name") {
            Some(name) if BARE_FIELDS.contains(name.as_str()) => {
                let ws = caps.name("ws").map_or("", |m| m.as_str());
                format!("\"{}\"{ws}:", name.as_str())
            }
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Repair and decode one line. See the module docs for the steps.
pub fn parse(line: &str) -> Result<MeterReading, Rejection> {
    let line = line.trim();
    if !line.starts_with('{') {
        return Err(Rejection::NotARecord);
    }

    let mut top: Map<String, Value> = serde_json::from_str(&repair(line))?;

    let mut record = match top.remove(RECORD_KEY) {
        Some(Value::Object(record)) => record,
        _ => Map::new(),
    };

    let meter_id = meter_id(record.remove(ID_KEY));
    let consumption = match record.remove(CONSUMPTION_KEY) {
        None => 0,
        Some(raw) => consumption(&raw).ok_or(Rejection::Consumption(raw))?,
    };

    Ok(MeterReading {
        meter_id,
        consumption,
        time: top.remove(TIME_KEY),
        extra: record,
    })
}

/// Repair and decode one line, discarding anything that does not fit.
pub fn normalize(line: &str) -> Option<MeterReading> {
    parse(line).ok()
}

fn meter_id(raw: Option<Value>) -> String {
    match raw {
        None | Some(Value::Null) => MISSING_ID.to_string(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

fn consumption(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
