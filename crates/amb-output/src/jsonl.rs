//! JSON-lines output backend.
//!
//! Writes `events.jsonl`: one [`TickRecord`] per line, then the
//! [`RunReport`] as the last line.  The content matches
//! `amb_sim::EventLog::to_json_lines` for the same run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use amb_sim::{RunReport, TickRecord};

use crate::OutputResult;
use crate::writer::OutputWriter;

pub const FILE_NAME: &str = "events.jsonl";

/// Streams the event log to a JSON-lines file.
pub struct JsonLinesWriter {
    out:      BufWriter<File>,
    finished: bool,
}

impl JsonLinesWriter {
    /// Create (or truncate) `events.jsonl` in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let file = File::create(dir.join(FILE_NAME))?;
        Ok(Self { out: BufWriter::new(file), finished: false })
    }

    fn write_line<T: serde::Serialize>(&mut self, value: &T) -> OutputResult<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl OutputWriter for JsonLinesWriter {
    fn write_tick(&mut self, record: &TickRecord, _unix_time_secs: i64) -> OutputResult<()> {
        self.write_line(record)
    }

    fn write_report(&mut self, report: &RunReport) -> OutputResult<()> {
        self.write_line(report)
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
