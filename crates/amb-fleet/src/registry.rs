//! The `Registry`: arenas of every entity in a run.

use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId, Minute};
use serde::Serialize;

use crate::{Admission, Ambulance, Emergency, EmergencyCall, Hospital};

/// Arena storage for all entities.
///
/// Each `Vec` is indexed by the matching typed id.  Ambulances and hospitals
/// are fixed at build time; emergencies are appended as calls arrive and stay
/// in the arena after they are resolved (for statistics), but drop out of
/// [`active_emergencies`][Self::active_emergencies].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Registry {
    pub ambulances:  Vec<Ambulance>,
    pub emergencies: Vec<Emergency>,
    pub hospitals:   Vec<Hospital>,
    /// Rescue stations: read-only relocation targets for agents.
    pub stations:    Vec<GeoPoint>,
}

impl Registry {
    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn ambulance(&self, id: AmbulanceId) -> Option<&Ambulance> {
        self.ambulances.get(id.index())
    }

    #[inline]
    pub fn ambulance_mut(&mut self, id: AmbulanceId) -> Option<&mut Ambulance> {
        self.ambulances.get_mut(id.index())
    }

    #[inline]
    pub fn emergency(&self, id: EmergencyId) -> Option<&Emergency> {
        self.emergencies.get(id.index())
    }

    #[inline]
    pub fn emergency_mut(&mut self, id: EmergencyId) -> Option<&mut Emergency> {
        self.emergencies.get_mut(id.index())
    }

    #[inline]
    pub fn hospital(&self, id: HospitalId) -> Option<&Hospital> {
        self.hospitals.get(id.index())
    }

    // ── Emergencies ───────────────────────────────────────────────────────

    /// Register an incoming call and return its new id.
    ///
    /// Ids are handed out in arrival order.  The builder bounds the number of
    /// calls, so the id always fits.
    pub fn admit_call(&mut self, call: EmergencyCall) -> EmergencyId {
        let id = EmergencyId(self.emergencies.len() as u32);
        self.emergencies.push(Emergency::from_call(id, call));
        id
    }

    /// Emergencies not yet resolved, in ascending id order.
    pub fn active_emergencies(&self) -> impl Iterator<Item = &Emergency> {
        self.emergencies.iter().filter(|e| !e.is_resolved())
    }

    pub fn all_resolved(&self) -> bool {
        self.emergencies.iter().all(Emergency::is_resolved)
    }

    // ── Bed ledger ────────────────────────────────────────────────────────
    //
    // The only code paths that touch hospital counters.

    /// Point `ambulance` at `hospital`, moving its bed reservation.
    ///
    /// Releases the reservation at the previously assigned hospital (if any)
    /// and reserves one at `hospital`.  Returns `false` and changes nothing if
    /// either id is unknown.
    pub fn assign_hospital(&mut self, ambulance: AmbulanceId, hospital: HospitalId) -> bool {
        if self.hospitals.get(hospital.index()).is_none() {
            return false;
        }
        let Some(amb) = self.ambulances.get_mut(ambulance.index()) else {
            return false;
        };
        if amb.assigned_hospital == Some(hospital) {
            return true;
        }
        let previous = amb.assigned_hospital.replace(hospital);
        if let Some(prev) = previous.and_then(|p| self.hospitals.get_mut(p.index())) {
            prev.release_reservation();
        }
        self.hospitals[hospital.index()].reserve();
        true
    }

    /// Turn `ambulance`'s reservation into an admission at its hospital.
    ///
    /// Clears `assigned_hospital`.  Returns `None` if the ambulance holds no
    /// reservation.
    pub fn admit_patient(&mut self, ambulance: AmbulanceId) -> Option<(HospitalId, Admission)> {
        let amb = self.ambulances.get_mut(ambulance.index())?;
        let hospital = amb.assigned_hospital.take()?;
        let admission = self.hospitals.get_mut(hospital.index())?.admit();
        Some((hospital, admission))
    }

    /// Free one occupied bed at `hospital`.
    pub fn discharge_patient(&mut self, hospital: HospitalId) {
        if let Some(h) = self.hospitals.get_mut(hospital.index()) {
            h.discharge();
        }
    }

    /// `true` when every hospital's `reserved` equals the number of
    /// ambulances assigned to it and no hospital is over capacity.
    pub fn bed_ledger_balanced(&self) -> bool {
        self.hospitals.iter().all(|h| {
            let holders = self
                .ambulances
                .iter()
                .filter(|a| a.assigned_hospital == Some(h.id))
                .count() as u32;
            h.reserved == holders && h.occupied <= h.capacity
        })
    }

    /// Latest call minute among registered emergencies.
    pub fn last_call(&self) -> Option<Minute> {
        self.emergencies.iter().map(|e| e.call_minute).max()
    }
}
