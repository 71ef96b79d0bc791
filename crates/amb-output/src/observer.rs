//! `LogObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use amb_core::time::SECS_PER_MINUTE;
use amb_core::{Minute, SimConfig};
use amb_sim::{RunReport, SimObserver, TickRecord};
use tracing::warn;

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams every minute and the closing report to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct LogObserver<W: OutputWriter> {
    writer:          W,
    start_unix_secs: i64,
    last_error:      Option<OutputError>,
}

impl<W: OutputWriter> LogObserver<W> {
    /// Create an observer backed by `writer`, using `config` for wall-clock
    /// conversion.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self { writer, start_unix_secs: config.start_unix_secs, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn unix_time(&self, minute: Minute) -> i64 {
        self.start_unix_secs + minute.0 as i64 * SECS_PER_MINUTE
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "event log write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for LogObserver<W> {
    fn on_tick_end(&mut self, record: &TickRecord) {
        let unix = self.unix_time(record.minute);
        let result = self.writer.write_tick(record, unix);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, report: &RunReport) {
        let result = self.writer.write_report(report);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
