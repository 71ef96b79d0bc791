//! Simulation observer trait for progress reporting and data collection.

use amb_core::Minute;

use crate::{RunReport, TickRecord};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// minute loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust
/// use amb_sim::{SimObserver, TickRecord};
///
/// struct RejectionCounter { rejected: usize }
///
/// impl SimObserver for RejectionCounter {
///     fn on_tick_end(&mut self, record: &TickRecord) {
///         self.rejected += record.rejected();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each minute, before calls are injected.
    fn on_minute_start(&mut self, _minute: Minute) {}

    /// Called once the minute is fully processed.
    fn on_tick_end(&mut self, _record: &TickRecord) {}

    /// Called once after the loop stops.
    fn on_sim_end(&mut self, _report: &RunReport) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// In-memory event log: keeps every [`TickRecord`] and the closing report.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub records: Vec<TickRecord>,
    pub report:  Option<RunReport>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The log as JSON lines: one line per minute, then the report.
    pub fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&serde_json::to_string(record)?);
            out.push('\n');
        }
        if let Some(report) = &self.report {
            out.push_str(&serde_json::to_string(report)?);
            out.push('\n');
        }
        Ok(out)
    }
}

impl SimObserver for EventLog {
    fn on_tick_end(&mut self, record: &TickRecord) {
        self.records.push(record.clone());
    }

    fn on_sim_end(&mut self, report: &RunReport) {
        self.report = Some(report.clone());
    }
}
