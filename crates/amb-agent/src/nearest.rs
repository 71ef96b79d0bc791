//! Nearest-first reference strategy.

use amb_core::{AmbulanceId, GeoPoint, HospitalId};
use amb_fleet::{AmbulanceStatus, Hospital};

use crate::{Decision, DispatchAgent, Snapshot};

/// Ambulances closer than this to a station count as "at" it.
const AT_STATION_KM: f64 = 0.05;

/// Greedy nearest-first dispatcher.
///
/// Each minute, in this order:
///
/// 1. every waiting emergency (ascending id) gets the nearest available
///    ambulance not already claimed this minute;
/// 2. every ambulance with a patient on scene is sent to the hospital it
///    already holds a bed at, else the nearest hospital with a free bed among
///    the patient's `possible_hospitals`, else the nearest with a free bed
///    anywhere, else the nearest allowed hospital;
/// 3. ambulances en route to a hospital whose beds are all occupied are
///    re-targeted to the nearest hospital with a free bed, if there is one;
/// 4. with [`return_to_station`](Self::return_to_station), idle ambulances
///    away from any station are relocated to the nearest one.
///
/// Distance ties go to the lower id.
#[derive(Clone, Debug, Default)]
pub struct NearestAgent {
    pub return_to_station: bool,
}

impl NearestAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_return_to_station(mut self) -> Self {
        self.return_to_station = true;
        self
    }
}

impl DispatchAgent for NearestAgent {
    fn decide(&mut self, snapshot: &Snapshot) -> Vec<Decision> {
        let mut decisions = Vec::new();
        let mut claimed = vec![false; snapshot.ambulances.len()];

        // 1. dispatch
        for emergency in snapshot.waiting_emergencies() {
            let nearest = snapshot
                .available_ambulances()
                .filter(|a| !claimed[a.id.index()])
                .map(|a| (a.id, a.position.distance_km(emergency.location)))
                .min_by(closest);
            if let Some((ambulance, _)) = nearest {
                claimed[ambulance.index()] = true;
                decisions.push(Decision::SendToEmergency { ambulance, emergency: emergency.id });
            }
        }

        // 2. transport
        for amb in snapshot.awaiting_hospital() {
            if let Some(hospital) = amb.assigned_hospital {
                decisions.push(Decision::SendToHospital { ambulance: amb.id, hospital });
                continue;
            }
            let allowed = amb
                .patient
                .and_then(|e| snapshot.emergency(e))
                .map(|e| e.possible_hospitals.as_slice())
                .unwrap_or_default();
            if let Some(hospital) = choose_hospital(snapshot, amb.position, allowed) {
                decisions.push(Decision::SendToHospital { ambulance: amb.id, hospital });
            }
        }

        // 3. re-target away from full hospitals
        for amb in &snapshot.ambulances {
            if amb.status != AmbulanceStatus::EnRouteToHospital {
                continue;
            }
            let Some(current) = amb.assigned_hospital.and_then(|h| snapshot.hospital(h)) else {
                continue;
            };
            if current.occupied < current.capacity {
                continue;
            }
            let better = nearest_hospital(
                snapshot.hospitals.iter().filter(|h| h.id != current.id && h.has_free_bed()),
                amb.position,
            );
            if let Some(hospital) = better {
                decisions.push(Decision::ChangeTargetHospital { ambulance: amb.id, hospital });
            }
        }

        // 4. return to station
        if self.return_to_station && !snapshot.stations.is_empty() {
            for amb in &snapshot.ambulances {
                if amb.status != AmbulanceStatus::Idle || claimed[amb.id.index()] {
                    continue;
                }
                let station = snapshot
                    .stations
                    .iter()
                    .map(|&s| (s, amb.position.distance_km(s)))
                    .min_by(|a, b| a.1.total_cmp(&b.1));
                match station {
                    Some((destination, d)) if d > AT_STATION_KM => {
                        decisions.push(Decision::Relocate { ambulance: amb.id, destination });
                    }
                    _ => {}
                }
            }
        }

        decisions
    }
}

fn closest(a: &(AmbulanceId, f64), b: &(AmbulanceId, f64)) -> std::cmp::Ordering {
    a.1.total_cmp(&b.1).then(a.0.cmp(&b.0))
}

fn nearest_hospital<'a>(
    candidates: impl Iterator<Item = &'a Hospital>,
    from: GeoPoint,
) -> Option<HospitalId> {
    candidates
        .map(|h| (h.id, from.distance_km(h.location)))
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(id, _)| id)
}

/// Pick a hospital for a patient at `from`.  `allowed` empty means any.
fn choose_hospital(snapshot: &Snapshot, from: GeoPoint, allowed: &[HospitalId]) -> Option<HospitalId> {
    let is_allowed = |h: &&Hospital| allowed.is_empty() || allowed.contains(&h.id);
    let all = || snapshot.hospitals.iter();

    nearest_hospital(all().filter(is_allowed).filter(|h| h.has_free_bed()), from)
        .or_else(|| nearest_hospital(all().filter(|h| h.has_free_bed()), from))
        .or_else(|| nearest_hospital(all().filter(is_allowed), from))
        .or_else(|| nearest_hospital(all(), from))
}
