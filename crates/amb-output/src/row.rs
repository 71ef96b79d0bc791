//! Flat row types for the tabular backends (CSV, SQLite).

use amb_core::Minute;
use amb_sim::{AmbulanceState, DecisionRecord, Issued, RunOutcome, RunReport, TickRecord};

/// One ambulance at the end of one minute.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbulanceRow {
    pub minute:             u64,
    pub ambulance:          u32,
    pub lat:                f64,
    pub lng:                f64,
    pub status:             &'static str,
    pub assigned_emergency: Option<u32>,
    pub assigned_hospital:  Option<u32>,
    pub patient_onboard:    bool,
    /// Minutes left on the current trip; 0 when not moving.
    pub eta:                u32,
}

impl AmbulanceRow {
    pub fn from_state(minute: Minute, state: &AmbulanceState) -> Self {
        Self {
            minute:             minute.0,
            ambulance:          state.id.0,
            lat:                state.position.lat,
            lng:                state.position.lng,
            status:             state.status.as_str(),
            assigned_emergency: state.assigned_emergency.map(|e| e.0),
            assigned_hospital:  state.assigned_hospital.map(|h| h.0),
            patient_onboard:    state.patient_onboard,
            eta:                state.eta,
        }
    }

    /// Rows for every ambulance in `record`; empty on minutes without a snapshot.
    pub fn from_record(record: &TickRecord) -> Vec<Self> {
        record.ambulances.iter().map(|s| Self::from_state(record.minute, s)).collect()
    }
}

/// Counters for one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinuteSummaryRow {
    pub minute:         u64,
    pub unix_time_secs: i64,
    pub injected:       u64,
    pub applied:        u64,
    pub rejected:       u64,
    pub events:         u64,
}

impl MinuteSummaryRow {
    pub fn from_record(record: &TickRecord, unix_time_secs: i64) -> Self {
        Self {
            minute:   record.minute.0,
            unix_time_secs,
            injected: record.injected.len() as u64,
            applied:  record.applied() as u64,
            rejected: record.rejected() as u64,
            events:   record.events.len() as u64,
        }
    }
}

/// One decision and what became of it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionRow {
    pub minute:         u64,
    /// Wire name of the decision, or `"malformed"`.
    pub kind:           &'static str,
    /// `None` for malformed entries.
    pub ambulance:      Option<u32>,
    pub applied:        bool,
    /// Rejection reason, `None` when applied.
    pub reason:         Option<String>,
    pub degraded_route: bool,
}

impl DecisionRow {
    pub fn from_decision(minute: Minute, record: &DecisionRecord) -> Self {
        let (kind, ambulance) = match &record.issued {
            Issued::Decision(d)  => (d.kind(), Some(d.ambulance().0)),
            Issued::Malformed(_) => ("malformed", None),
        };
        let reason = match &record.outcome {
            amb_sim::DecisionOutcome::Applied          => None,
            amb_sim::DecisionOutcome::Rejected(reason) => Some(reason.to_string()),
        };
        Self {
            minute: minute.0,
            kind,
            ambulance,
            applied: reason.is_none(),
            reason,
            degraded_route: record.degraded_route,
        }
    }

    pub fn from_record(record: &TickRecord) -> Vec<Self> {
        record.decisions.iter().map(|d| Self::from_decision(record.minute, d)).collect()
    }
}

/// The closing report, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub outcome:             &'static str,
    pub final_minute:        u64,
    pub unresolved:          u64,
    pub pending_calls:       u64,
    pub decisions_applied:   u64,
    pub decisions_rejected:  u64,
    pub degraded_routes:     u64,
    pub overflow_admissions: u32,
    pub resolved:            u64,
    pub transported:         u64,
    /// Average call → admission minutes; `None` when nobody was transported.
    pub score:               Option<f64>,
}

impl From<&RunReport> for ReportRow {
    fn from(r: &RunReport) -> Self {
        Self {
            outcome: match r.outcome {
                RunOutcome::Completed => "completed",
                RunOutcome::TimedOut  => "timed_out",
            },
            final_minute:        r.final_minute.0,
            unresolved:          r.unresolved.len() as u64,
            pending_calls:       r.pending_calls as u64,
            decisions_applied:   r.decisions_applied,
            decisions_rejected:  r.decisions_rejected,
            degraded_routes:     r.degraded_routes,
            overflow_admissions: r.overflow_admissions,
            resolved:            r.stats.resolved as u64,
            transported:         r.stats.transported as u64,
            score:               r.score(),
        }
    }
}
