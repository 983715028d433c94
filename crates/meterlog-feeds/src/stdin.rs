//! Line feed — the cooperative read loop over the decoder's output.
//!
//! Lines are read one at a time in arrival order, normalised, attributed by
//! the [`Tracker`] and handed to an [`EventSink`]. The loop waits on exactly
//! one thing at a time: the next line or the cancellation token, whichever
//! comes first. Cancellation is therefore only observed between lines and
//! never interrupts an event half-way through the sinks.

use std::collections::HashSet;
use std::io;

use meterlog_core::normalizer;
use meterlog_core::Tracker;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::sink::EventSink;

/// Counters for one run of [`run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Lines read from the input.
    pub lines: u64,
    /// Events written to the sink.
    pub events: u64,
    /// Lines discarded by the normalizer.
    pub skipped: u64,
    /// Distinct ids seen that the registry does not know.
    pub unrecognized: HashSet<String>,
    /// `true` when the loop stopped on cancellation rather than end of input.
    pub interrupted: bool,
}

/// Consume `input` until end of stream or until `cancel` fires.
///
/// Malformed lines are skipped. An error is returned only when reading the
/// input or writing to the sink fails; the sink is not closed here, that is
/// left to the caller on every path.
pub async fn run<R, S>(
    input: R,
    tracker: &mut Tracker,
    sink: &mut S,
    cancel: &CancellationToken,
) -> io::Result<StreamSummary>
where
    R: AsyncBufRead + Unpin,
    S: EventSink + ?Sized,
{
    let mut segments = input.split(b'\n');
    let mut summary = StreamSummary::default();

    loop {
        let segment = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                info!(lines = summary.lines, "input interrupted");
                summary.interrupted = true;
                break;
            }
            segment = segments.next_segment() => segment?,
        };
        let Some(bytes) = segment else {
            info!(lines = summary.lines, "end of input");
            break;
        };

        summary.lines += 1;
        let line = String::from_utf8_lossy(&bytes);

        let reading = match normalizer::parse(&line) {
            Ok(reading) => reading,
            Err(reason) => {
                summary.skipped += 1;
                debug!(%reason, line = %line.trim_end(), "skipped line");
                continue;
            }
        };

        let observation = tracker.observe(&reading);
        if observation.is_discovery() {
            warn!(meter_id = %reading.meter_id, "unrecognized meter id");
        }
        if !observation.event.recognized {
            summary.unrecognized.insert(reading.meter_id.clone());
        }

        sink.emit(&observation.event)?;
        summary.events += 1;
    }

    Ok(summary)
}
