//! Decision validation and application.
//!
//! [`apply_decision`] checks every precondition before touching the
//! registry, so a rejected decision leaves the state exactly as it was.
//! Re-issuing a decision whose effect already holds is accepted as a no-op.

use amb_agent::Decision;
use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId};
use amb_fleet::{AmbulanceStatus, EmergencyStatus, Registry, Trip};
use amb_routing::RoutingEstimator;

use crate::{DecisionRecord, RejectReason};

/// Validate `decision` against `registry` and apply it if valid.
pub fn apply_decision(registry: &mut Registry, router: &RoutingEstimator, decision: &Decision) -> DecisionRecord {
    let result = match *decision {
        Decision::SendToEmergency { ambulance, emergency } => {
            send_to_emergency(registry, router, ambulance, emergency)
        }
        Decision::SendToHospital { ambulance, hospital } => {
            send_to_hospital(registry, router, ambulance, hospital)
        }
        Decision::Relocate { ambulance, destination } => relocate(registry, router, ambulance, destination),
        Decision::ChangeTargetHospital { ambulance, hospital } => {
            change_target_hospital(registry, router, ambulance, hospital)
        }
    };
    match result {
        Ok(degraded) => DecisionRecord::applied(decision, degraded),
        Err(reason) => DecisionRecord::rejected(decision, reason),
    }
}

/// `Ok(degraded_route)` on success.
type Applied = Result<bool, RejectReason>;

fn send_to_emergency(
    registry:  &mut Registry,
    router:    &RoutingEstimator,
    ambulance: AmbulanceId,
    emergency: EmergencyId,
) -> Applied {
    let amb = registry.ambulance(ambulance).ok_or(RejectReason::UnknownAmbulance)?;
    let em = registry.emergency(emergency).ok_or(RejectReason::UnknownEmergency)?;

    if amb.status == AmbulanceStatus::EnRouteToEmergency && amb.assigned_emergency == Some(emergency) {
        return Ok(false);
    }
    check_not_broken(amb.status)?;
    if !amb.status.is_available() {
        return Err(RejectReason::AmbulanceBusy { status: amb.status });
    }
    if em.status != EmergencyStatus::WaitingForAssignment {
        return Err(RejectReason::EmergencyNotWaiting { status: em.status });
    }

    let estimate = router.estimate(amb.position, em.location);
    let trip = Trip::new(amb.position, em.location, estimate.minutes, estimate.distance_km);

    // ── mutate ────────────────────────────────────────────────────────────
    if let Some(amb) = registry.ambulance_mut(ambulance) {
        amb.transition(AmbulanceStatus::EnRouteToEmergency);
        amb.assigned_emergency = Some(emergency);
        amb.trip = Some(trip);
    }
    if let Some(em) = registry.emergency_mut(emergency) {
        em.advance(EmergencyStatus::WaitingForAmbulance);
        em.assigned_ambulance = Some(ambulance);
    }
    Ok(estimate.degraded)
}

fn send_to_hospital(
    registry:  &mut Registry,
    router:    &RoutingEstimator,
    ambulance: AmbulanceId,
    hospital:  HospitalId,
) -> Applied {
    let amb = registry.ambulance(ambulance).ok_or(RejectReason::UnknownAmbulance)?;
    let target = registry.hospital(hospital).ok_or(RejectReason::UnknownHospital)?;

    if amb.status == AmbulanceStatus::EnRouteToHospital && amb.assigned_hospital == Some(hospital) {
        return Ok(false);
    }
    check_not_broken(amb.status)?;
    if !amb.patient_onboard() {
        return Err(RejectReason::NoPatient);
    }
    if !matches!(amb.status, AmbulanceStatus::AtEmergency | AmbulanceStatus::EnRouteToHospital) {
        return Err(RejectReason::AmbulanceBusy { status: amb.status });
    }

    let estimate = router.estimate(amb.position, target.location);
    let trip = Trip::new(amb.position, target.location, estimate.minutes, estimate.distance_km);

    // ── mutate ────────────────────────────────────────────────────────────
    registry.assign_hospital(ambulance, hospital);
    if let Some(amb) = registry.ambulance_mut(ambulance) {
        amb.transition(AmbulanceStatus::EnRouteToHospital);
        amb.assigned_emergency = None;
        amb.timer = 0;
        amb.trip = Some(trip);
    }
    Ok(estimate.degraded)
}

fn relocate(
    registry:    &mut Registry,
    router:      &RoutingEstimator,
    ambulance:   AmbulanceId,
    destination: GeoPoint,
) -> Applied {
    let amb = registry.ambulance(ambulance).ok_or(RejectReason::UnknownAmbulance)?;
    if !destination.is_valid() {
        return Err(RejectReason::InvalidCoordinates);
    }

    let already_there = match amb.status {
        AmbulanceStatus::Relocating => amb.destination() == Some(destination),
        AmbulanceStatus::Idle => amb.position == destination,
        _ => false,
    };
    if already_there {
        return Ok(false);
    }
    check_not_broken(amb.status)?;
    if !amb.status.is_available() {
        return Err(RejectReason::AmbulanceBusy { status: amb.status });
    }

    let estimate = router.estimate(amb.position, destination);
    let trip = Trip::new(amb.position, destination, estimate.minutes, estimate.distance_km);

    // ── mutate ────────────────────────────────────────────────────────────
    if let Some(amb) = registry.ambulance_mut(ambulance) {
        amb.transition(AmbulanceStatus::Relocating);
        amb.trip = Some(trip);
    }
    Ok(estimate.degraded)
}

fn change_target_hospital(
    registry:  &mut Registry,
    router:    &RoutingEstimator,
    ambulance: AmbulanceId,
    hospital:  HospitalId,
) -> Applied {
    let amb = registry.ambulance(ambulance).ok_or(RejectReason::UnknownAmbulance)?;
    let target = registry.hospital(hospital).ok_or(RejectReason::UnknownHospital)?;

    check_not_broken(amb.status)?;
    if !matches!(amb.status, AmbulanceStatus::EnRouteToHospital | AmbulanceStatus::AtEmergency) {
        return Err(RejectReason::AmbulanceBusy { status: amb.status });
    }
    if amb.assigned_hospital == Some(hospital) {
        return Ok(false);
    }
    // On scene a bed is only reserved for a patient already aboard.
    if amb.status == AmbulanceStatus::AtEmergency && !amb.patient_onboard() {
        return Err(RejectReason::NoPatient);
    }
    if amb.status == AmbulanceStatus::EnRouteToHospital && amb.assigned_hospital.is_none() {
        return Err(RejectReason::NoCurrentTarget);
    }
    if !target.has_free_bed() {
        return Err(RejectReason::NoFreeBed);
    }

    // Only a moving ambulance needs a new trip.
    let retrip = (amb.status == AmbulanceStatus::EnRouteToHospital).then(|| {
        let estimate = router.estimate(amb.position, target.location);
        (Trip::new(amb.position, target.location, estimate.minutes, estimate.distance_km), estimate.degraded)
    });

    // ── mutate ────────────────────────────────────────────────────────────
    registry.assign_hospital(ambulance, hospital);
    let Some((trip, degraded)) = retrip else {
        return Ok(false);
    };
    if let Some(amb) = registry.ambulance_mut(ambulance) {
        amb.transition(AmbulanceStatus::EnRouteToHospital);
        amb.trip = Some(trip);
    }
    Ok(degraded)
}

fn check_not_broken(status: AmbulanceStatus) -> Result<(), RejectReason> {
    if status == AmbulanceStatus::Broken {
        Err(RejectReason::AmbulanceBroken)
    } else {
        Ok(())
    }
}
