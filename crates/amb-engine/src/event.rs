use amb_core::{AmbulanceId, EmergencyId, HospitalId};
use amb_fleet::Admission;
use serde::{Deserialize, Serialize};

/// One state change made by [`TransitionEngine::advance`][crate::TransitionEngine::advance].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A moving ambulance made no progress this minute.
    Delayed { ambulance: AmbulanceId },
    RelocationDone { ambulance: AmbulanceId },
    ArrivedAtEmergency {
        ambulance: AmbulanceId,
        emergency: EmergencyId,
        dwell:     u32,
    },
    /// Dwell ended and the patient needs a hospital.
    PatientOnboard {
        ambulance: AmbulanceId,
        emergency: EmergencyId,
    },
    ResolvedOnScene {
        ambulance: AmbulanceId,
        emergency: EmergencyId,
    },
    ArrivedAtHospital {
        ambulance: AmbulanceId,
        emergency: EmergencyId,
        hospital:  HospitalId,
        admission: Admission,
        cleaning:  u32,
    },
    CleaningDone { ambulance: AmbulanceId },
    Discharged { hospital: HospitalId },
}
