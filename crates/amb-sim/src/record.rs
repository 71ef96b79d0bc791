//! Event-log record types.
//!
//! One [`TickRecord`] is produced per simulated minute and one [`RunReport`]
//! per run.  All types serialize with serde; writing them as JSON lines in
//! order gives the canonical event log.

use std::fmt;

use amb_agent::{Decision, MalformedDecision};
use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId, Minute};
use amb_engine::EngineEvent;
use amb_fleet::{Ambulance, AmbulanceStatus, Emergency, EmergencyStatus, Hospital};
use serde::{Deserialize, Serialize};

use crate::WaitTimeStats;

// ── Decisions ─────────────────────────────────────────────────────────────────

/// Why a decision was not applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnknownAmbulance,
    UnknownEmergency,
    UnknownHospital,
    InvalidCoordinates,
    AmbulanceBroken,
    /// The ambulance's status does not allow this decision.
    AmbulanceBusy { status: AmbulanceStatus },
    EmergencyNotWaiting { status: EmergencyStatus },
    NoPatient,
    NoCurrentTarget,
    NoFreeBed,
    /// The agent's wire entry could not be decoded.
    Malformed { reason: String },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UnknownAmbulance            => f.write_str("unknown ambulance"),
            RejectReason::UnknownEmergency            => f.write_str("unknown emergency"),
            RejectReason::UnknownHospital             => f.write_str("unknown hospital"),
            RejectReason::InvalidCoordinates          => f.write_str("invalid coordinates"),
            RejectReason::AmbulanceBroken             => f.write_str("ambulance is broken"),
            RejectReason::AmbulanceBusy { status }    => write!(f, "ambulance is {status}"),
            RejectReason::EmergencyNotWaiting { status } => write!(f, "emergency is {status}"),
            RejectReason::NoPatient                   => f.write_str("no patient on board"),
            RejectReason::NoCurrentTarget             => f.write_str("no current target hospital"),
            RejectReason::NoFreeBed                   => f.write_str("target hospital has no free bed"),
            RejectReason::Malformed { reason }        => write!(f, "malformed: {reason}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum DecisionOutcome {
    Applied,
    Rejected(RejectReason),
}

impl DecisionOutcome {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, DecisionOutcome::Applied)
    }
}

/// What the agent issued: a decoded decision or an undecodable entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Issued {
    Decision(Decision),
    Malformed(MalformedDecision),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub issued:         Issued,
    pub outcome:        DecisionOutcome,
    /// The trip estimate for this decision came from the haversine fallback.
    #[serde(default)]
    pub degraded_route: bool,
}

impl DecisionRecord {
    pub fn applied(decision: &Decision, degraded_route: bool) -> Self {
        Self { issued: Issued::Decision(decision.clone()), outcome: DecisionOutcome::Applied, degraded_route }
    }

    pub fn rejected(decision: &Decision, reason: RejectReason) -> Self {
        Self {
            issued:         Issued::Decision(decision.clone()),
            outcome:        DecisionOutcome::Rejected(reason),
            degraded_route: false,
        }
    }

    pub fn malformed(entry: MalformedDecision) -> Self {
        let reason = RejectReason::Malformed { reason: entry.reason.clone() };
        Self { issued: Issued::Malformed(entry), outcome: DecisionOutcome::Rejected(reason), degraded_route: false }
    }
}

// ── Entity rows ───────────────────────────────────────────────────────────────

/// Flat per-minute view of one ambulance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AmbulanceState {
    pub id:                 AmbulanceId,
    pub position:           GeoPoint,
    pub status:             AmbulanceStatus,
    pub assigned_emergency: Option<EmergencyId>,
    pub assigned_hospital:  Option<HospitalId>,
    pub patient_onboard:    bool,
    pub timer:              u32,
    pub destination:        Option<GeoPoint>,
    pub eta:                u32,
}

impl From<&Ambulance> for AmbulanceState {
    fn from(a: &Ambulance) -> Self {
        Self {
            id:                 a.id,
            position:           a.position,
            status:             a.status,
            assigned_emergency: a.assigned_emergency,
            assigned_hospital:  a.assigned_hospital,
            patient_onboard:    a.patient_onboard(),
            timer:              a.timer,
            destination:        a.destination(),
            eta:                a.eta(),
        }
    }
}

// ── TickRecord ────────────────────────────────────────────────────────────────

/// Everything that happened in one simulated minute.
///
/// Entity vectors hold the state at the end of the minute.  They are empty
/// on minutes skipped by `SimConfig::snapshot_interval`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub minute:      Minute,
    /// Emergencies created from calls this minute.
    pub injected:    Vec<EmergencyId>,
    pub decisions:   Vec<DecisionRecord>,
    pub events:      Vec<EngineEvent>,
    pub ambulances:  Vec<AmbulanceState>,
    /// Emergencies that were active at some point during the minute.
    pub emergencies: Vec<Emergency>,
    pub hospitals:   Vec<Hospital>,
}

impl TickRecord {
    pub fn applied(&self) -> usize {
        self.decisions.iter().filter(|d| d.outcome.is_applied()).count()
    }

    pub fn rejected(&self) -> usize {
        self.decisions.len() - self.applied()
    }

    pub fn has_snapshot(&self) -> bool {
        !self.ambulances.is_empty() || !self.hospitals.is_empty()
    }
}

// ── RunReport ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every emergency resolved and no calls left.
    Completed,
    /// `max_minutes` reached first.
    TimedOut,
}

/// Closing record of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome:             RunOutcome,
    /// The minute the loop stopped at (= number of minutes simulated).
    pub final_minute:        Minute,
    /// Unresolved emergencies at the end, ascending.
    pub unresolved:          Vec<EmergencyId>,
    /// Calls never injected because the run timed out first.
    pub pending_calls:       usize,
    pub decisions_applied:   u64,
    pub decisions_rejected:  u64,
    pub degraded_routes:     u64,
    pub overflow_admissions: u32,
    pub stats:               WaitTimeStats,
}

impl RunReport {
    /// Average call → hospital admission time, the score of a run.
    pub fn score(&self) -> Option<f64> {
        self.stats.score()
    }
}
