//! Read-only state handed to the agent once per minute.

use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId, Minute};
use amb_fleet::{Ambulance, AmbulanceStatus, Emergency, EmergencyStatus, Hospital, Registry};
use serde::{Deserialize, Serialize};

/// An owned copy of the simulation state at the start of a minute's decision
/// phase.
///
/// `ambulances` and `hospitals` hold every entity, indexed by id.
/// `emergencies` holds only the unresolved ones, in ascending id order, so
/// ids are not indices there; use [`emergency`](Self::emergency).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub minute:        Minute,
    pub ambulances:    Vec<Ambulance>,
    pub emergencies:   Vec<Emergency>,
    pub hospitals:     Vec<Hospital>,
    pub stations:      Vec<GeoPoint>,
    /// Calls not yet injected.  Their contents are not revealed.
    pub pending_calls: usize,
}

impl Snapshot {
    pub fn capture(minute: Minute, registry: &Registry, pending_calls: usize) -> Self {
        Self {
            minute,
            ambulances: registry.ambulances.clone(),
            emergencies: registry.active_emergencies().cloned().collect(),
            hospitals: registry.hospitals.clone(),
            stations: registry.stations.clone(),
            pending_calls,
        }
    }

    #[inline]
    pub fn ambulance(&self, id: AmbulanceId) -> Option<&Ambulance> {
        self.ambulances.get(id.index())
    }

    #[inline]
    pub fn hospital(&self, id: HospitalId) -> Option<&Hospital> {
        self.hospitals.get(id.index())
    }

    /// Look up an active emergency.
    pub fn emergency(&self, id: EmergencyId) -> Option<&Emergency> {
        self.emergencies
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.emergencies[i])
    }

    /// Emergencies no ambulance has been sent to yet.
    pub fn waiting_emergencies(&self) -> impl Iterator<Item = &Emergency> {
        self.emergencies
            .iter()
            .filter(|e| e.status == EmergencyStatus::WaitingForAssignment)
    }

    /// Ambulances that can accept `SendToEmergency` or `Relocate`.
    pub fn available_ambulances(&self) -> impl Iterator<Item = &Ambulance> {
        self.ambulances.iter().filter(|a| a.status.is_available())
    }

    /// Ambulances on scene with a patient, waiting to leave for a hospital.
    pub fn awaiting_hospital(&self) -> impl Iterator<Item = &Ambulance> {
        self.ambulances
            .iter()
            .filter(|a| a.status == AmbulanceStatus::AtEmergency && a.patient_onboard())
    }
}
