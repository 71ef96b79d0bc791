//! CSV output backend.
//!
//! Creates four files in the configured output directory:
//! - `ambulance_snapshots.csv`
//! - `minute_summaries.csv`
//! - `decisions.csv`
//! - `run_report.csv` (one row, written at the end)

use std::fs::File;
use std::path::{Path, PathBuf};

use amb_sim::{RunReport, TickRecord};
use csv::Writer;

use crate::row::{AmbulanceRow, DecisionRow, MinuteSummaryRow, ReportRow};
use crate::OutputResult;
use crate::writer::OutputWriter;

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes a run's event log to CSV files.
pub struct CsvWriter {
    dir:        PathBuf,
    ambulances: Writer<File>,
    summaries:  Writer<File>,
    decisions:  Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Open (or create) the per-minute CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut ambulances = Writer::from_path(dir.join("ambulance_snapshots.csv"))?;
        ambulances.write_record([
            "minute",
            "ambulance",
            "lat",
            "lng",
            "status",
            "assigned_emergency",
            "assigned_hospital",
            "patient_onboard",
            "eta",
        ])?;

        let mut summaries = Writer::from_path(dir.join("minute_summaries.csv"))?;
        summaries.write_record(["minute", "unix_time_secs", "injected", "applied", "rejected", "events"])?;

        let mut decisions = Writer::from_path(dir.join("decisions.csv"))?;
        decisions.write_record(["minute", "kind", "ambulance", "applied", "reason", "degraded_route"])?;

        Ok(Self { dir: dir.to_path_buf(), ambulances, summaries, decisions, finished: false })
    }

    fn write_ambulances(&mut self, rows: &[AmbulanceRow]) -> OutputResult<()> {
        for row in rows {
            self.ambulances.write_record(&[
                row.minute.to_string(),
                row.ambulance.to_string(),
                row.lat.to_string(),
                row.lng.to_string(),
                row.status.to_owned(),
                opt(row.assigned_emergency),
                opt(row.assigned_hospital),
                (row.patient_onboard as u8).to_string(),
                row.eta.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_summary(&mut self, row: &MinuteSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.minute.to_string(),
            row.unix_time_secs.to_string(),
            row.injected.to_string(),
            row.applied.to_string(),
            row.rejected.to_string(),
            row.events.to_string(),
        ])?;
        Ok(())
    }

    fn write_decisions(&mut self, rows: &[DecisionRow]) -> OutputResult<()> {
        for row in rows {
            self.decisions.write_record(&[
                row.minute.to_string(),
                row.kind.to_owned(),
                opt(row.ambulance),
                (row.applied as u8).to_string(),
                row.reason.clone().unwrap_or_default(),
                (row.degraded_route as u8).to_string(),
            ])?;
        }
        Ok(())
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick(&mut self, record: &TickRecord, unix_time_secs: i64) -> OutputResult<()> {
        self.write_ambulances(&AmbulanceRow::from_record(record))?;
        self.write_summary(&MinuteSummaryRow::from_record(record, unix_time_secs))?;
        self.write_decisions(&DecisionRow::from_record(record))
    }

    fn write_report(&mut self, report: &RunReport) -> OutputResult<()> {
        let row = ReportRow::from(report);
        let mut w = Writer::from_path(self.dir.join("run_report.csv"))?;
        w.write_record([
            "outcome",
            "final_minute",
            "unresolved",
            "pending_calls",
            "decisions_applied",
            "decisions_rejected",
            "degraded_routes",
            "overflow_admissions",
            "resolved",
            "transported",
            "score",
        ])?;
        w.write_record(&[
            row.outcome.to_owned(),
            row.final_minute.to_string(),
            row.unresolved.to_string(),
            row.pending_calls.to_string(),
            row.decisions_applied.to_string(),
            row.decisions_rejected.to_string(),
            row.degraded_routes.to_string(),
            row.overflow_admissions.to_string(),
            row.resolved.to_string(),
            row.transported.to_string(),
            opt(row.score),
        ])?;
        w.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ambulances.flush()?;
        self.summaries.flush()?;
        self.decisions.flush()?;
        Ok(())
    }
}
