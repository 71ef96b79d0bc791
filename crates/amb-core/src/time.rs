//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Minute` counter.  One tick of the
//! simulation is exactly one minute; there is no sub-minute resolution.  The
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_secs + minute * 60
//!
//! Using an integer minute as the canonical unit keeps all timer arithmetic
//! exact and makes the event log replayable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Seconds in one simulated minute.
pub const SECS_PER_MINUTE: i64 = 60;

// ── Minute ────────────────────────────────────────────────────────────────────

/// An absolute simulation minute.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minute(pub u64);

impl Minute {
    pub const ZERO: Minute = Minute(0);

    /// Return the minute `n` steps after `self`, saturating at `u64::MAX`.
    #[inline]
    pub fn offset(self, n: u64) -> Minute {
        Minute(self.0.saturating_add(n))
    }

    /// Minutes elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Minute) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Minute {
    type Output = Minute;
    #[inline]
    fn add(self, rhs: u64) -> Minute {
        self.offset(rhs)
    }
}

impl std::ops::Sub for Minute {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Minute) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Minute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between minute counts and Unix wall-clock seconds.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of minute 0.
    pub start_unix_secs: i64,
    /// The current minute, advanced by `SimClock::advance()` each tick.
    pub current: Minute,
}

impl SimClock {
    pub fn new(start_unix_secs: i64) -> Self {
        Self { start_unix_secs, current: Minute::ZERO }
    }

    /// Advance the clock by one minute.
    #[inline]
    pub fn advance(&mut self) {
        self.current = Minute(self.current.0 + 1);
    }

    /// Elapsed simulated seconds since minute 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current.0 as i64 * SECS_PER_MINUTE
    }

    /// Current Unix timestamp corresponding to `current`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.start_unix_secs + self.elapsed_secs()
    }

    /// Unix timestamp of an arbitrary minute of this run.
    #[inline]
    pub fn unix_secs_at(&self, minute: Minute) -> i64 {
        self.start_unix_secs + minute.0 as i64 * SECS_PER_MINUTE
    }

    /// Break elapsed time into (day, hour, minute) components from sim start.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total = self.current.0;
        let days = total / 1_440;
        let hours = ((total % 1_440) / 60) as u32;
        let minutes = (total % 60) as u32;
        (days, hours, minutes)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current, d, h, m)
    }
}
