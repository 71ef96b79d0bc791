//! `amb-output`: event log writers for ambusim runs.
//!
//! | Feature   | Backend     | Files created                                                     |
//! |-----------|-------------|-------------------------------------------------------------------|
//! | *(none)*  | JSON lines  | `events.jsonl`                                                    |
//! | *(none)*  | CSV         | `ambulance_snapshots.csv`, `minute_summaries.csv`, `decisions.csv`, `run_report.csv` |
//! | `sqlite`  | SQLite      | `output.db`                                                       |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`LogObserver`], which implements `amb_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use amb_output::{JsonLinesWriter, LogObserver};
//!
//! let writer = JsonLinesWriter::new(Path::new("./output"))?;
//! let mut obs = LogObserver::new(writer, &config);
//! sim.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod jsonl;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use jsonl::JsonLinesWriter;
pub use observer::LogObserver;
pub use row::{AmbulanceRow, DecisionRow, MinuteSummaryRow, ReportRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
