//! meterlog — water meter logger.
//!
//! Reads the radio decoder's record stream on stdin, repairs each record,
//! labels it with the meter it came from and logs consumption deltas to the
//! console and to a fresh per-run event log.
//!
//! # Architecture
//!
//! ```text
//! stdin ──► feeds::stdin ──► core::normalizer ──► core::Tracker ──► Tee ──► console
//!                                                                    └────► event log
//! ```
//!
//! Everything runs on one thread. The only await point is the next line of
//! input, which is also where Ctrl+C is noticed.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use meterlog_core::config::Config;
use meterlog_core::Tracker;
use meterlog_feeds::{stdin, Console, EventSink, LogFile, StreamSummary, Tee};
use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;

/// Default destination for `--debug` diagnostics.
pub const DEBUG_LOG: &str = "/tmp/meterlog-debug.log";

#[derive(Debug, Parser)]
#[command(name = "meterlog", about = "Label water meter readings and log usage deltas")]
pub struct Cli {
    /// Config file (defaults to ~/.config/meterlog/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for the event log, overriding `[log] dir`.
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Add or replace a registry entry. Repeatable.
    #[arg(long = "meter", value_name = "ID=LABEL")]
    pub meters: Vec<String>,

    /// Write debug logs to /tmp/meterlog-debug.log (tail -f to inspect).
    #[arg(long)]
    pub debug: bool,
}

/// Everything acquired before the first line is read.
#[derive(Debug)]
pub struct Session {
    pub tracker: Tracker,
    pub log: LogFile,
}

impl Session {
    /// Load configuration, build the registry and create the event log.
    ///
    /// Any failure here is fatal: no input has been consumed yet.
    pub fn open(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load(cli.config.as_deref()).context("loading configuration")?;
        let mut registry = config.registry();
        for spec in &cli.meters {
            registry.apply_override(spec)?;
        }

        let dir = cli.log_dir.as_deref().unwrap_or(&config.log.dir);
        let log = LogFile::create_now(dir, &config.log.prefix)?;

        tracing::info!(
            meters = registry.len(),
            log = %log.path().display(),
            "session opened"
        );
        Ok(Self {
            tracker: Tracker::new(registry),
            log,
        })
    }
}

/// Pump `input` through the tracker into `console` and the session's log.
///
/// The log is flushed and closed on every path out of the loop: end of
/// input, cancellation, or a read/write failure.
pub async fn pump<R, W>(
    input: R,
    session: Session,
    console: W,
    cancel: &CancellationToken,
) -> anyhow::Result<StreamSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let Session { mut tracker, log } = session;
    let mut sinks = Tee::new(Console::new(console), log);

    let result = stdin::run(input, &mut tracker, &mut sinks, cancel).await;
    let closed = sinks.close();

    let summary = result.context("processing input")?;
    closed.with_context(|| format!("closing {}", sinks.second.path().display()))?;
    Ok(summary)
}
