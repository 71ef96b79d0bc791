//! Time-ordered queue of calls that have not yet reached the simulation.

use std::collections::BTreeMap;

use amb_core::{EmergencyId, Minute};

use crate::builder::check_point;
use crate::{EmergencyCall, FleetError, FleetResult};

/// Pending emergency calls keyed by call minute.
///
/// Calls sharing a minute keep their input order, so draining yields calls
/// sorted by `(call_minute, input position)`, which is the order emergency
/// ids are handed out in.
#[derive(Clone, Debug, Default)]
pub struct CallQueue {
    inner: BTreeMap<Minute, Vec<EmergencyCall>>,
    len:   usize,
}

impl CallQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a call stream against a map with `hospital_count` hospitals
    /// and queue it.
    ///
    /// Rejects calls with out-of-range coordinates or unknown hospitals, and
    /// streams too long for 32-bit emergency ids.
    pub fn from_calls(calls: Vec<EmergencyCall>, hospital_count: usize) -> FleetResult<Self> {
        if EmergencyId::try_from(calls.len()).is_err() {
            return Err(FleetError::TooMany("emergency calls"));
        }
        let mut queue = Self::new();
        for (i, call) in calls.into_iter().enumerate() {
            check_point(call.location, || format!("call #{i}"))?;
            if let Some(&hospital) = call.possible_hospitals.iter().find(|h| h.index() >= hospital_count) {
                return Err(FleetError::UnknownHospital { call: i, hospital });
            }
            queue.push(call);
        }
        Ok(queue)
    }

    pub fn push(&mut self, call: EmergencyCall) {
        self.inner.entry(call.call_minute).or_default().push(call);
        self.len += 1;
    }

    /// Remove and return every call with `call_minute <= now`, oldest first.
    pub fn drain_due(&mut self, now: Minute) -> Vec<EmergencyCall> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let calls: Vec<EmergencyCall> = due.into_values().flatten().collect();
        self.len -= calls.len();
        calls
    }

    /// Minute of the earliest pending call.
    pub fn next_minute(&self) -> Option<Minute> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
