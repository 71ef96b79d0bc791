//! The `OutputWriter` trait implemented by all backend writers.

use amb_sim::{RunReport, TickRecord};

use crate::OutputResult;

/// Trait implemented by the JSON-lines, CSV, and SQLite writers.
///
/// Errors are stored by [`LogObserver`][crate::LogObserver] and retrieved
/// with `take_error`, since observer callbacks cannot fail.
pub trait OutputWriter {
    /// Write everything recorded for one minute.
    fn write_tick(&mut self, record: &TickRecord, unix_time_secs: i64) -> OutputResult<()>;

    /// Write the closing report.
    fn write_report(&mut self, report: &RunReport) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
