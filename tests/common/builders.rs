//! Test builders — ergonomic constructors for trackers and sessions.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::path::{Path, PathBuf};

use meterlog::Session;
use meterlog_core::{MeterRegistry, Tracker};
use meterlog_feeds::LogFile;

use super::fixtures::{POTABLE, POTABLE_ID};

/// Registry holding only the potable meter.
pub fn potable_registry() -> MeterRegistry {
    [(POTABLE_ID, POTABLE)].into_iter().collect()
}

/// Tracker over [`potable_registry`] with empty state.
pub fn potable_tracker() -> Tracker {
    Tracker::new(potable_registry())
}

/// A session writing its event log to `dir/run.log`.
pub fn session_in(dir: &Path) -> (Session, PathBuf) {
    let path = dir.join("run.log");
    let log = LogFile::create_at(path.clone()).expect("create event log");
    (
        Session {
            tracker: potable_tracker(),
            log,
        },
        path,
    )
}
