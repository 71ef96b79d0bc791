//! Agent decisions: the only actions an agent can request.

use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId};
use serde::{Deserialize, Serialize};

/// One instruction from the agent to the simulator.
///
/// Decisions are transient: the simulator validates each one against the
/// current state, applies or rejects it, and records the outcome in the log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Dispatch an available ambulance to a waiting emergency.
    SendToEmergency {
        ambulance: AmbulanceId,
        emergency: EmergencyId,
    },

    /// Take the patient on board to `hospital`, reserving a bed there.
    SendToHospital {
        ambulance: AmbulanceId,
        hospital:  HospitalId,
    },

    /// Move an available ambulance to `destination`.
    Relocate {
        ambulance:   AmbulanceId,
        destination: GeoPoint,
    },

    /// Move an existing bed reservation to another hospital.
    ChangeTargetHospital {
        ambulance: AmbulanceId,
        hospital:  HospitalId,
    },
}

impl Decision {
    /// The ambulance this decision addresses.
    pub fn ambulance(&self) -> AmbulanceId {
        match *self {
            Decision::SendToEmergency { ambulance, .. }
            | Decision::SendToHospital { ambulance, .. }
            | Decision::Relocate { ambulance, .. }
            | Decision::ChangeTargetHospital { ambulance, .. } => ambulance,
        }
    }

    /// Wire-format name, as used in the first element of a JSON tuple.
    pub fn kind(&self) -> &'static str {
        match self {
            Decision::SendToEmergency { .. }      => crate::wire::SEND_TO_EMERGENCY,
            Decision::SendToHospital { .. }       => crate::wire::SEND_TO_HOSPITAL,
            Decision::Relocate { .. }             => crate::wire::RELOCATE,
            Decision::ChangeTargetHospital { .. } => crate::wire::CHANGE_TARGET_HOSPITAL,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::SendToEmergency { ambulance, emergency } => {
                write!(f, "{ambulance} -> {emergency}")
            }
            Decision::SendToHospital { ambulance, hospital } => {
                write!(f, "{ambulance} -> {hospital}")
            }
            Decision::Relocate { ambulance, destination } => {
                write!(f, "{ambulance} -> {destination}")
            }
            Decision::ChangeTargetHospital { ambulance, hospital } => {
                write!(f, "{ambulance} retarget {hospital}")
            }
        }
    }
}
