//! Hospitals and their bed ledger.
//!
//! A hospital's beds are in one of three states: free, reserved by an
//! ambulance en route, or occupied by an admitted patient.  The counters are
//! only changed through [`Registry`][crate::Registry] so that every
//! reservation is released exactly once (by re-targeting or by admission).

use amb_core::{GeoPoint, HospitalId};
use serde::{Deserialize, Serialize};

/// Result of converting a reservation into an admission.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    /// The patient got a bed; `occupied` went up by one.
    Bed,
    /// Every bed was occupied on arrival.  The patient is still handed over
    /// but no bed is taken, so `occupied` never exceeds `capacity`.
    Overflow,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    pub id:                  HospitalId,
    pub location:            GeoPoint,
    pub capacity:            u32,
    pub occupied:            u32,
    /// Beds held for ambulances currently en route here.
    pub reserved:            u32,
    pub overflow_admissions: u32,
}

impl Hospital {
    pub fn new(id: HospitalId, location: GeoPoint, capacity: u32, occupied: u32) -> Self {
        Self { id, location, capacity, occupied, reserved: 0, overflow_admissions: 0 }
    }

    /// Beds neither occupied nor reserved.
    #[inline]
    pub fn free_beds(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied + self.reserved)
    }

    #[inline]
    pub fn has_free_bed(&self) -> bool {
        self.free_beds() > 0
    }

    pub(crate) fn reserve(&mut self) {
        self.reserved += 1;
    }

    pub(crate) fn release_reservation(&mut self) {
        debug_assert!(self.reserved > 0, "release without reservation at {}", self.id);
        self.reserved = self.reserved.saturating_sub(1);
    }

    /// Convert one reservation into an occupied bed (or an overflow).
    pub(crate) fn admit(&mut self) -> Admission {
        self.release_reservation();
        if self.occupied < self.capacity {
            self.occupied += 1;
            Admission::Bed
        } else {
            self.overflow_admissions += 1;
            Admission::Overflow
        }
    }

    pub(crate) fn discharge(&mut self) {
        debug_assert!(self.occupied > 0, "discharge from empty hospital {}", self.id);
        self.occupied = self.occupied.saturating_sub(1);
    }
}
