//! Emergencies and their forward-only status machine.

use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId, Minute};
use serde::{Deserialize, Serialize};

// ── EmergencyStatus ───────────────────────────────────────────────────────────

/// Lifecycle of an emergency call.  Transitions only move forward:
///
/// ```text
/// waiting_for_assignment → waiting_for_ambulance → being_served
///                                                   ├→ resolved_no_transport
///                                                   └→ resolved_transported
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyStatus {
    WaitingForAssignment,
    WaitingForAmbulance,
    BeingServed,
    ResolvedNoTransport,
    ResolvedTransported,
}

impl EmergencyStatus {
    /// Position in the lifecycle.  Both resolved states share the last rank.
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            EmergencyStatus::WaitingForAssignment => 0,
            EmergencyStatus::WaitingForAmbulance  => 1,
            EmergencyStatus::BeingServed          => 2,
            EmergencyStatus::ResolvedNoTransport
            | EmergencyStatus::ResolvedTransported => 3,
        }
    }

    #[inline]
    pub fn is_resolved(self) -> bool {
        self.rank() == 3
    }

    /// The single transition table for emergencies: exactly one step forward.
    pub fn can_advance_to(self, to: EmergencyStatus) -> bool {
        !self.is_resolved() && to.rank() == self.rank() + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EmergencyStatus::WaitingForAssignment => "waiting_for_assignment",
            EmergencyStatus::WaitingForAmbulance  => "waiting_for_ambulance",
            EmergencyStatus::BeingServed          => "being_served",
            EmergencyStatus::ResolvedNoTransport  => "resolved_no_transport",
            EmergencyStatus::ResolvedTransported  => "resolved_transported",
        }
    }
}

impl std::fmt::Display for EmergencyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── EmergencyCall ─────────────────────────────────────────────────────────────

/// One incoming call of the scenario stream, as supplied by the loader.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmergencyCall {
    pub call_minute:        Minute,
    pub location:           GeoPoint,
    /// Hospitals the patient may be taken to.  Empty means "any".
    #[serde(default)]
    pub possible_hospitals: Vec<HospitalId>,
}

// ── Emergency ─────────────────────────────────────────────────────────────────

/// An emergency that has been called in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Emergency {
    pub id:                 EmergencyId,
    pub location:           GeoPoint,
    pub call_minute:        Minute,
    pub status:             EmergencyStatus,
    pub assigned_ambulance: Option<AmbulanceId>,
    /// `None` until the on-scene dwell ends and the outcome is drawn.
    pub needs_transport:    Option<bool>,
    pub possible_hospitals: Vec<HospitalId>,
    pub ambulance_arrival:  Option<Minute>,
    pub hospital_arrival:   Option<Minute>,
    pub resolved_at:        Option<Minute>,
}

impl Emergency {
    pub fn from_call(id: EmergencyId, call: EmergencyCall) -> Self {
        Self {
            id,
            location:           call.location,
            call_minute:        call.call_minute,
            status:             EmergencyStatus::WaitingForAssignment,
            assigned_ambulance: None,
            needs_transport:    None,
            possible_hospitals: call.possible_hospitals,
            ambulance_arrival:  None,
            hospital_arrival:   None,
            resolved_at:        None,
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        self.status.is_resolved()
    }

    /// Step the status forward.  A backwards or skipping move is a bug.
    pub fn advance(&mut self, to: EmergencyStatus) {
        debug_assert!(
            self.status.can_advance_to(to),
            "illegal emergency transition {} -> {} for {}",
            self.status,
            to,
            self.id,
        );
        self.status = to;
    }
}
