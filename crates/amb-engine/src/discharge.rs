//! Scheduled bed releases.

use std::collections::BTreeMap;

use amb_core::{HospitalId, Minute};

/// Beds to free, keyed by the minute they become free.
///
/// Internally a `BTreeMap<Minute, Vec<HospitalId>>`; draining is O(k log n)
/// for k due entries.
#[derive(Clone, Debug, Default)]
pub struct DischargeQueue {
    inner: BTreeMap<Minute, Vec<HospitalId>>,
    len:   usize,
}

impl DischargeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: Minute, hospital: HospitalId) {
        self.inner.entry(at).or_default().push(hospital);
        self.len += 1;
    }

    /// Remove and return every release due at or before `now`.
    pub fn drain_due(&mut self, now: Minute) -> Vec<HospitalId> {
        let later = self.inner.split_off(&now.offset(1));
        let due = std::mem::replace(&mut self.inner, later);
        let hospitals: Vec<HospitalId> = due.into_values().flatten().collect();
        self.len -= hospitals.len();
        hospitals
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
