//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! four tables: `ambulance_snapshots`, `minute_summaries`, `decisions`, and
//! `run_report`.

use std::path::Path;

use amb_sim::{RunReport, TickRecord};
use rusqlite::Connection;

use crate::row::{AmbulanceRow, DecisionRow, MinuteSummaryRow, ReportRow};
use crate::OutputResult;
use crate::writer::OutputWriter;

/// Writes a run's event log to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS ambulance_snapshots (
                 minute             INTEGER NOT NULL,
                 ambulance          INTEGER NOT NULL,
                 lat                REAL    NOT NULL,
                 lng                REAL    NOT NULL,
                 status             TEXT    NOT NULL,
                 assigned_emergency INTEGER,
                 assigned_hospital  INTEGER,
                 patient_onboard    INTEGER NOT NULL,
                 eta                INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS minute_summaries (
                 minute         INTEGER PRIMARY KEY,
                 unix_time_secs INTEGER NOT NULL,
                 injected       INTEGER NOT NULL,
                 applied        INTEGER NOT NULL,
                 rejected       INTEGER NOT NULL,
                 events         INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS decisions (
                 minute         INTEGER NOT NULL,
                 kind           TEXT    NOT NULL,
                 ambulance      INTEGER,
                 applied        INTEGER NOT NULL,
                 reason         TEXT,
                 degraded_route INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS run_report (
                 outcome             TEXT    NOT NULL,
                 final_minute        INTEGER NOT NULL,
                 unresolved          INTEGER NOT NULL,
                 pending_calls       INTEGER NOT NULL,
                 decisions_applied   INTEGER NOT NULL,
                 decisions_rejected  INTEGER NOT NULL,
                 degraded_routes     INTEGER NOT NULL,
                 overflow_admissions INTEGER NOT NULL,
                 resolved            INTEGER NOT NULL,
                 transported         INTEGER NOT NULL,
                 score               REAL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }

    fn write_ambulances(&mut self, rows: &[AmbulanceRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO ambulance_snapshots \
                 (minute, ambulance, lat, lng, status, assigned_emergency, assigned_hospital, patient_onboard, eta) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.minute,
                    row.ambulance,
                    row.lat,
                    row.lng,
                    row.status,
                    row.assigned_emergency,
                    row.assigned_hospital,
                    row.patient_onboard as i64,
                    row.eta,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_decisions(&mut self, rows: &[DecisionRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO decisions (minute, kind, ambulance, applied, reason, degraded_route) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.minute,
                    row.kind,
                    row.ambulance,
                    row.applied as i64,
                    row.reason,
                    row.degraded_route as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick(&mut self, record: &TickRecord, unix_time_secs: i64) -> OutputResult<()> {
        self.write_ambulances(&AmbulanceRow::from_record(record))?;
        self.write_decisions(&DecisionRow::from_record(record))?;

        let row = MinuteSummaryRow::from_record(record, unix_time_secs);
        self.conn.execute(
            "INSERT INTO minute_summaries (minute, unix_time_secs, injected, applied, rejected, events) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![row.minute, row.unix_time_secs, row.injected, row.applied, row.rejected, row.events],
        )?;
        Ok(())
    }

    fn write_report(&mut self, report: &RunReport) -> OutputResult<()> {
        let row = ReportRow::from(report);
        self.conn.execute(
            "INSERT INTO run_report \
             (outcome, final_minute, unresolved, pending_calls, decisions_applied, decisions_rejected, \
              degraded_routes, overflow_admissions, resolved, transported, score) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                row.outcome,
                row.final_minute,
                row.unresolved,
                row.pending_calls,
                row.decisions_applied,
                row.decisions_rejected,
                row.degraded_routes,
                row.overflow_admissions,
                row.resolved,
                row.transported,
                row.score,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
