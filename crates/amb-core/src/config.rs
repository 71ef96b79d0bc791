//! Run configuration.
//!
//! Both structs are plain serde types with defaults so an application can load
//! them from JSON (or TOML) and override only what it needs:
//!
//! ```json
//! { "seed": 7, "max_minutes": 720 }
//! ```

use serde::{Deserialize, Serialize};

use crate::time::Minute;
use crate::{CoreError, CoreResult};

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Unix timestamp of minute 0.
    pub start_unix_secs: i64,

    /// Hard stop.  Reaching it ends the run as `TimedOut`, not as an error.
    pub max_minutes: u64,

    /// Master RNG seed.  The same seed and agent always produce identical logs.
    pub seed: u64,

    /// Forward full entity snapshots to the observer every N minutes.
    /// 1 = every minute; 0 disables snapshots (tick records are still logged).
    pub snapshot_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_unix_secs:   0,
            max_minutes:       24 * 60,
            seed:              42,
            snapshot_interval: 1,
        }
    }
}

impl SimConfig {
    /// The minute at which the run times out (exclusive upper bound).
    #[inline]
    pub fn end_minute(&self) -> Minute {
        Minute(self.max_minutes)
    }
}

// ── DispatchConfig ────────────────────────────────────────────────────────────

/// Inclusive integer range of minutes, e.g. on-scene dwell of 2–10 minutes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteRange {
    pub min: u32,
    pub max: u32,
}

impl MinuteRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Which travel-time method the routing estimator uses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutingMethod {
    /// Great-circle distance at the configured average speed.  No I/O.
    #[default]
    Haversine,
    /// OSRM HTTP endpoint (e.g. `"http://localhost:5000"`).  Needs the
    /// `osrm` feature of `amb-routing`; without it building the estimator
    /// fails.
    Osrm { endpoint: String },
}

/// Stochastic and kinematic parameters of the dispatch model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Average ambulance speed used by the haversine estimator, km/h.
    pub average_speed_kmh: f64,

    /// Probability that a moving ambulance makes no progress in a minute.
    pub prob_delay: f64,

    /// On-scene dwell time.
    pub dwell_minutes: MinuteRange,

    /// Cleaning time after a hospital delivery.
    pub cleaning_minutes: MinuteRange,

    /// Probability that a served patient needs hospital transport.
    pub transport_probability: f64,

    /// Minutes an admitted patient keeps a bed.  `None`: until the run ends.
    pub bed_stay_minutes: Option<u64>,

    pub routing: RoutingMethod,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh:     40.0,
            prob_delay:            0.1,
            dwell_minutes:         MinuteRange::new(2, 10),
            cleaning_minutes:      MinuteRange::new(2, 5),
            transport_probability: 0.8,
            bed_stay_minutes:      None,
            routing:               RoutingMethod::Haversine,
        }
    }
}

impl DispatchConfig {
    /// Reject values the model cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(CoreError::Config(format!(
                "average_speed_kmh must be positive, got {}",
                self.average_speed_kmh
            )));
        }
        for (name, p) in [
            ("prob_delay", self.prob_delay),
            ("transport_probability", self.transport_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(CoreError::Config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        for (name, range) in [
            ("dwell_minutes", self.dwell_minutes),
            ("cleaning_minutes", self.cleaning_minutes),
        ] {
            if range.min == 0 || range.min > range.max {
                return Err(CoreError::Config(format!(
                    "{name} must satisfy 1 <= min <= max, got {}..={}",
                    range.min, range.max
                )));
            }
        }
        if self.bed_stay_minutes == Some(0) {
            return Err(CoreError::Config("bed_stay_minutes must be at least 1".into()));
        }
        Ok(())
    }
}
