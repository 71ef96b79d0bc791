//! dispatch: runs one ambulance dispatch scenario end to end.
//!
//! Four ambulances, three hospitals, and a dozen calls around downtown
//! Mobile, Alabama, dispatched by the nearest-available heuristic.  The event
//! log is written to `output/dispatch/events.jsonl` (plus `output.db` with
//! `--features sqlite`), then the scenario is repeated with fresh seeds.
//!
//! ```text
//! cargo run -p dispatch                     # embedded scenario
//! cargo run -p dispatch -- my_scenario.json # same shape as SCENARIO_JSON
//! RUST_LOG=debug cargo run -p dispatch      # every rejection and fallback
//! ```

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use amb_agent::NearestAgent;
use amb_core::{DispatchConfig, MinuteRange, SimConfig};
use amb_output::{JsonLinesWriter, LogObserver, OutputWriter};
use amb_sim::{ExperimentSummary, RunReport, Scenario, SimBuilder, SimObserver, TickRecord, run_repetitions};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:        u64 = 42;
const MAX_MINUTES: u64 = 12 * 60;
const REPETITIONS: u64 = 8;
const OUTPUT_DIR:  &str = "output/dispatch";

// ── Scenario ──────────────────────────────────────────────────────────────────

const SCENARIO_JSON: &str = r#"{
  "ambulances": [
    { "location": { "lat": 30.6954, "lng": -88.0399 } },
    { "location": { "lat": 30.6720, "lng": -88.1010 } },
    { "location": { "lat": 30.7330, "lng": -88.0720 } },
    { "location": { "lat": 30.6500, "lng": -88.0600 }, "broken": true }
  ],
  "hospitals": [
    { "location": { "lat": 30.6870, "lng": -88.0450 }, "capacity": 4, "occupied": 2 },
    { "location": { "lat": 30.6790, "lng": -88.1180 }, "capacity": 6 },
    { "location": { "lat": 30.7270, "lng": -88.0830 }, "capacity": 2, "occupied": 2 }
  ],
  "stations": [
    { "lat": 30.6954, "lng": -88.0399 },
    { "lat": 30.6720, "lng": -88.1010 },
    { "lat": 30.7330, "lng": -88.0720 }
  ],
  "calls": [
    { "call_minute": 0,   "location": { "lat": 30.6910, "lng": -88.0480 } },
    { "call_minute": 4,   "location": { "lat": 30.7050, "lng": -88.0900 } },
    { "call_minute": 9,   "location": { "lat": 30.6650, "lng": -88.0750 }, "possible_hospitals": [1] },
    { "call_minute": 15,  "location": { "lat": 30.7200, "lng": -88.0600 } },
    { "call_minute": 22,  "location": { "lat": 30.6800, "lng": -88.1100 } },
    { "call_minute": 30,  "location": { "lat": 30.6990, "lng": -88.0410 } },
    { "call_minute": 31,  "location": { "lat": 30.7410, "lng": -88.0850 }, "possible_hospitals": [2, 0] },
    { "call_minute": 45,  "location": { "lat": 30.6580, "lng": -88.0900 } },
    { "call_minute": 60,  "location": { "lat": 30.6930, "lng": -88.0700 } },
    { "call_minute": 72,  "location": { "lat": 30.7100, "lng": -88.0450 } },
    { "call_minute": 90,  "location": { "lat": 30.6750, "lng": -88.0550 } },
    { "call_minute": 120, "location": { "lat": 30.7300, "lng": -88.1000 } }
  ]
}"#;

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:     LogObserver<W>,
    minutes:   usize,
    decisions: usize,
    events:    usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: LogObserver<W>) -> Self {
        Self { inner, minutes: 0, decisions: 0, events: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, record: &TickRecord) {
        self.minutes += 1;
        self.decisions += record.decisions.len();
        self.events += record.events.len();
        self.inner.on_tick_end(record);
    }

    fn on_sim_end(&mut self, report: &RunReport) {
        self.inner.on_sim_end(report);
    }
}

fn fmt_minutes(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.1} min"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Scenario: a JSON file from the command line, or the embedded one.
    let scenario: Scenario = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => serde_json::from_str(SCENARIO_JSON).context("parsing embedded scenario")?,
    };
    info!(
        ambulances = scenario.map.ambulances.len(),
        hospitals = scenario.map.hospitals.len(),
        calls = scenario.calls.len(),
        "scenario loaded"
    );

    // 2. Configuration.
    let config = SimConfig {
        start_unix_secs:   1_700_000_000,
        max_minutes:       MAX_MINUTES,
        seed:              SEED,
        snapshot_interval: 1,
    };
    let dispatch = DispatchConfig {
        average_speed_kmh: 45.0,
        dwell_minutes:     MinuteRange::new(5, 15),
        cleaning_minutes:  MinuteRange::new(5, 10),
        bed_stay_minutes:  Some(180),
        ..DispatchConfig::default()
    };

    // 3. Build sim.
    let mut sim = SimBuilder::new(config.clone(), scenario.clone(), NearestAgent::new().with_return_to_station())
        .dispatch(dispatch.clone())
        .build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = JsonLinesWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(LogObserver::new(writer, &config));

    #[cfg(feature = "sqlite")]
    let mut db = LogObserver::new(amb_output::SqliteWriter::new(Path::new(OUTPUT_DIR))?, &config);

    // 5. Run.
    let t0 = Instant::now();
    let report = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    #[cfg(feature = "sqlite")]
    {
        // Replay the same seed into the database.
        let mut again = SimBuilder::new(config.clone(), scenario.clone(), NearestAgent::new().with_return_to_station())
            .dispatch(dispatch.clone())
            .build()?;
        again.run(&mut db);
        if let Some(e) = db.take_error() {
            eprintln!("sqlite output error: {e}");
        }
    }

    // 6. Summary.
    println!("Simulation {:?} at minute {} in {:.3} s", report.outcome, report.final_minute.0, elapsed.as_secs_f64());
    println!("  events.jsonl : {} minutes, {} decisions, {} events", obs.minutes, obs.decisions, obs.events);
    println!(
        "  decisions    : {} applied, {} rejected, {} degraded routes",
        report.decisions_applied, report.decisions_rejected, report.degraded_routes
    );
    println!(
        "  emergencies  : {} resolved, {} transported, {} unresolved, {} overflow admissions",
        report.stats.resolved,
        report.stats.transported,
        report.unresolved.len(),
        report.overflow_admissions
    );
    println!("  ambulance wait (avg) : {}", fmt_minutes(report.stats.avg_ambulance_wait));
    println!("  total wait (avg)     : {}", fmt_minutes(report.stats.avg_total_wait));
    println!("  total wait (median)  : {}", fmt_minutes(report.stats.median_total_wait));
    println!();

    // 7. Final hospital table.
    println!("{:<12} {:<10} {:<10} {:<10}", "Hospital", "Capacity", "Occupied", "Overflow");
    println!("{}", "-".repeat(44));
    for h in &sim.registry.hospitals {
        println!("{:<12} {:<10} {:<10} {:<10}", h.id.0, h.capacity, h.occupied, h.overflow_admissions);
    }
    println!();

    // 8. Repetitions with independent seeds.
    let reps = run_repetitions(&config, &dispatch, &scenario, REPETITIONS, |_| {
        NearestAgent::new().with_return_to_station()
    })?;
    for rep in &reps {
        println!(
            "  rep {:>2}  seed {:>20}  {:?}  score {}",
            rep.index,
            rep.seed,
            rep.report.outcome,
            fmt_minutes(rep.report.score())
        );
    }
    let summary = ExperimentSummary::from_repetitions(&reps);
    println!(
        "{} runs, {} completed, mean score {}",
        summary.runs,
        summary.completed,
        fmt_minutes(summary.mean_score)
    );

    Ok(())
}
