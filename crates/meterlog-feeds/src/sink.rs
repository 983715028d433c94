//! Event sinks — where labelled events end up.
//!
//! A run writes every event twice: to the console for the live view, then to
//! the per-run event log. [`Tee`] keeps that order for each event so the log
//! never holds an event the console has not shown.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use meterlog_core::{Error, LabeledEvent};

/// Destination for labelled events.
pub trait EventSink {
    /// Write one event as a single newline-terminated line.
    fn emit(&mut self, event: &LabeledEvent) -> io::Result<()>;

    /// Flush and release whatever the sink holds.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Live view: one line per event on any writer (stdout in the binary).
#[derive(Debug)]
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventSink for Console<W> {
    fn emit(&mut self, event: &LabeledEvent) -> io::Result<()> {
        writeln!(self.out, "{event}")?;
        self.out.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

// ---------------------------------------------------------------------------
// Event log
// ---------------------------------------------------------------------------

/// Append-only event log, created fresh for each run.
///
/// Every event is written with one `write_all` and flushed before `emit`
/// returns, so a reader tailing the file never sees half a line.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl LogFile {
    /// Create `<dir>/<prefix>-<YYYY-MM-DD_HH-MM-SS>.log` for a run started at
    /// `started`. Fails if the file already exists or `dir` is missing.
    pub fn create(dir: &Path, prefix: &str, started: DateTime<Local>) -> Result<Self, Error> {
        let name = format!("{prefix}-{}.log", started.format("%Y-%m-%d_%H-%M-%S"));
        Self::create_at(dir.join(name))
    }

    /// [`create`](Self::create) for a run starting now.
    pub fn create_now(dir: &Path, prefix: &str) -> Result<Self, Error> {
        Self::create(dir, prefix, Local::now())
    }

    /// Create the log at exactly `path`.
    pub fn create_at(path: PathBuf) -> Result<Self, Error> {
        match OpenOptions::new().append(true).create_new(true).open(&path) {
            Ok(file) => Ok(Self {
                path,
                writer: BufWriter::new(file),
            }),
            Err(source) => Err(Error::LogFile { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for LogFile {
    fn emit(&mut self, event: &LabeledEvent) -> io::Result<()> {
        let line = format!("{event}\n");
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()
    }
}

// ---------------------------------------------------------------------------
// Tee
// ---------------------------------------------------------------------------

/// Writes each event to `first`, then to `second`.
#[derive(Debug)]
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: EventSink, B: EventSink> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn emit(&mut self, event: &LabeledEvent) -> io::Result<()> {
        self.first.emit(event)?;
        self.second.emit(event)
    }

    /// Both halves are closed even if the first one fails.
    fn close(&mut self) -> io::Result<()> {
        let first = self.first.close();
        let second = self.second.close();
        first.and(second)
    }
}
