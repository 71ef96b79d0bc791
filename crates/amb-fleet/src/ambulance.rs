//! Ambulances, their status machine, and the journey they are on.

use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId};
use serde::{Deserialize, Serialize};

// ── AmbulanceStatus ───────────────────────────────────────────────────────────

/// Where an ambulance is in its duty cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbulanceStatus {
    Idle,
    Relocating,
    EnRouteToEmergency,
    AtEmergency,
    EnRouteToHospital,
    BeingCleaned,
    /// Out of service for the whole run.  Accepts no decisions.
    Broken,
}

impl AmbulanceStatus {
    /// The single transition table for ambulances.
    ///
    /// Self-loops are listed only where a decision may legitimately redirect
    /// a moving ambulance (a new relocation target, a new hospital).
    pub fn can_transition_to(self, to: AmbulanceStatus) -> bool {
        use AmbulanceStatus::*;
        matches!(
            (self, to),
            (Idle, Relocating)
                | (Idle, EnRouteToEmergency)
                | (Relocating, Relocating)
                | (Relocating, Idle)
                | (Relocating, EnRouteToEmergency)
                | (EnRouteToEmergency, AtEmergency)
                | (AtEmergency, Idle)
                | (AtEmergency, EnRouteToHospital)
                | (EnRouteToHospital, EnRouteToHospital)
                | (EnRouteToHospital, BeingCleaned)
                | (BeingCleaned, Idle)
        )
    }

    /// Can be sent to an emergency or relocated.
    #[inline]
    pub fn is_available(self) -> bool {
        matches!(self, AmbulanceStatus::Idle | AmbulanceStatus::Relocating)
    }

    /// Has an active [`Trip`] that the engine advances each minute.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(
            self,
            AmbulanceStatus::Relocating
                | AmbulanceStatus::EnRouteToEmergency
                | AmbulanceStatus::EnRouteToHospital
        )
    }

    /// Label used in CSV columns and log messages.
    pub fn as_str(self) -> &'static str {
        match self {
            AmbulanceStatus::Idle               => "idle",
            AmbulanceStatus::Relocating         => "relocating",
            AmbulanceStatus::EnRouteToEmergency => "en_route_to_emergency",
            AmbulanceStatus::AtEmergency        => "at_emergency",
            AmbulanceStatus::EnRouteToHospital  => "en_route_to_hospital",
            AmbulanceStatus::BeingCleaned       => "being_cleaned",
            AmbulanceStatus::Broken             => "broken",
        }
    }
}

impl std::fmt::Display for AmbulanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Trip ──────────────────────────────────────────────────────────────────────

/// A straight-line journey measured in whole minutes.
///
/// `total_minutes` is fixed when the journey starts (from the routing
/// estimate).  Every minute without a delay adds one to `elapsed_minutes`;
/// the position is the linear interpolation at `elapsed / total`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub origin:          GeoPoint,
    pub destination:     GeoPoint,
    pub total_minutes:   u32,
    pub elapsed_minutes: u32,
    pub distance_km:     f64,
}

impl Trip {
    pub fn new(origin: GeoPoint, destination: GeoPoint, total_minutes: u32, distance_km: f64) -> Self {
        Self { origin, destination, total_minutes, elapsed_minutes: 0, distance_km }
    }

    /// Minutes still to travel, assuming no further delays.
    #[inline]
    pub fn remaining_minutes(&self) -> u32 {
        self.total_minutes.saturating_sub(self.elapsed_minutes)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed_minutes >= self.total_minutes
    }

    /// Fraction of the journey completed, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        if self.total_minutes == 0 {
            return 1.0;
        }
        (self.elapsed_minutes as f64 / self.total_minutes as f64).min(1.0)
    }

    /// Interpolated position at the current progress.
    pub fn position(&self) -> GeoPoint {
        self.origin.lerp(self.destination, self.progress())
    }

    /// Make one minute of progress.
    #[inline]
    pub fn advance(&mut self) {
        self.elapsed_minutes = (self.elapsed_minutes + 1).min(self.total_minutes);
    }
}

// ── Ambulance ─────────────────────────────────────────────────────────────────

/// One vehicle of the fleet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ambulance {
    pub id:                 AmbulanceId,
    pub position:           GeoPoint,
    pub status:             AmbulanceStatus,
    /// Set only while `EnRouteToEmergency` or `AtEmergency`.
    pub assigned_emergency: Option<EmergencyId>,
    /// Hospital this ambulance holds a bed reservation at.
    pub assigned_hospital:  Option<HospitalId>,
    /// The emergency whose patient is on board.
    pub patient:            Option<EmergencyId>,
    /// Dwell or cleaning countdown, in minutes.
    pub timer:              u32,
    pub trip:               Option<Trip>,
}

impl Ambulance {
    pub fn new(id: AmbulanceId, position: GeoPoint, broken: bool) -> Self {
        Self {
            id,
            position,
            status: if broken { AmbulanceStatus::Broken } else { AmbulanceStatus::Idle },
            assigned_emergency: None,
            assigned_hospital:  None,
            patient:            None,
            timer:              0,
            trip:               None,
        }
    }

    #[inline]
    pub fn patient_onboard(&self) -> bool {
        self.patient.is_some()
    }

    /// Where the current trip ends, if moving.
    pub fn destination(&self) -> Option<GeoPoint> {
        self.trip.as_ref().map(|t| t.destination)
    }

    /// Estimated minutes to the current destination (0 when not moving).
    pub fn eta(&self) -> u32 {
        self.trip.as_ref().map_or(0, Trip::remaining_minutes)
    }

    /// Move to `to` through the transition table.
    ///
    /// Callers check [`AmbulanceStatus::can_transition_to`] first; an illegal
    /// transition here is a simulator bug.
    pub fn transition(&mut self, to: AmbulanceStatus) {
        debug_assert!(
            self.status.can_transition_to(to),
            "illegal ambulance transition {} -> {} for {}",
            self.status,
            to,
            self.id,
        );
        self.status = to;
    }
}
