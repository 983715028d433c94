//! Domain-specific assertion macros for meterlog harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! part of the pipeline broke.

/// Assert that a line normalises to a reading with the given id and consumption.
///
/// ```rust
/// assert_reading!("{R900:{ID:1,Consumption:2}}", "1", 2);
/// ```
#[macro_export]
macro_rules! assert_reading {
    ($line:expr, $id:expr, $consumption:expr) => {{
        let line: &str = $line;
        match meterlog_core::normalizer::parse(line) {
            Ok(reading) => {
                pretty_assertions::assert_eq!(
                    (reading.meter_id.as_str(), reading.consumption),
                    ($id, $consumption),
                    "wrong reading for line {:?}",
                    line
                );
            }
            Err(reason) => panic!(
                "assert_reading! failed: line was discarded ({})\n  line: {:?}",
                reason, line
            ),
        }
    }};
}

/// Assert that a line is discarded by the normalizer.
#[macro_export]
macro_rules! assert_discarded {
    ($line:expr) => {{
        let line: &str = $line;
        if let Some(reading) = meterlog_core::normalizer::normalize(line) {
            panic!(
                "assert_discarded! failed: line produced a reading\n  line:    {:?}\n  reading: {:?}",
                line, reading
            );
        }
    }};
}

/// Assert that text holds exactly the expected lines, each newline-terminated.
pub fn assert_lines(text: &str, expected: &[&str]) {
    let mut want = expected.join("\n");
    if !want.is_empty() {
        want.push('\n');
    }
    pretty_assertions::assert_eq!(text, want);
}
