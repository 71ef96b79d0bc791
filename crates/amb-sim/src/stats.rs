//! Wait-time statistics over a finished (or timed-out) run.

use amb_fleet::{Emergency, EmergencyStatus};
use serde::{Deserialize, Serialize};

/// Summary of how long callers waited, in minutes.
///
/// Ambulance wait is call → ambulance on scene, over every emergency an
/// ambulance reached.  Total wait is call → hospital admission, over
/// transported emergencies only.  Fields are `None` when there is nothing to
/// average.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitTimeStats {
    pub resolved:           usize,
    pub transported:        usize,
    pub avg_ambulance_wait: Option<f64>,
    pub avg_total_wait:     Option<f64>,
    pub median_total_wait:  Option<f64>,
    pub min_total_wait:     Option<u64>,
    pub max_total_wait:     Option<u64>,
}

impl WaitTimeStats {
    pub fn from_emergencies(emergencies: &[Emergency]) -> Self {
        let ambulance_waits: Vec<u64> = emergencies
            .iter()
            .filter_map(|e| e.ambulance_arrival.map(|m| m.since(e.call_minute)))
            .collect();

        let mut total_waits: Vec<u64> = emergencies
            .iter()
            .filter(|e| e.status == EmergencyStatus::ResolvedTransported)
            .filter_map(|e| e.hospital_arrival.map(|m| m.since(e.call_minute)))
            .collect();
        total_waits.sort_unstable();

        Self {
            resolved:           emergencies.iter().filter(|e| e.is_resolved()).count(),
            transported:        total_waits.len(),
            avg_ambulance_wait: mean(&ambulance_waits),
            avg_total_wait:     mean(&total_waits),
            median_total_wait:  median(&total_waits),
            min_total_wait:     total_waits.first().copied(),
            max_total_wait:     total_waits.last().copied(),
        }
    }

    /// The score of a run: average call → admission time.  Lower is better.
    #[inline]
    pub fn score(&self) -> Option<f64> {
        self.avg_total_wait
    }
}

fn mean(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<u64>() as f64 / values.len() as f64)
}

/// Median of an already sorted slice.
fn median(sorted: &[u64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2] as f64),
        _ => Some((sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0),
    }
}
