//! JSON tuple wire format for agents living outside the process.
//!
//! A decision is a JSON array whose first element names the kind:
//!
//! ```text
//! ["SendAmbulanceToEmergency", ambulance, emergency]
//! ["SendAmbulanceToHospital",  ambulance, hospital]
//! ["RelocateAmbulance",        ambulance, lat, lng]
//! ["ChangeTargetHospital",     ambulance, hospital]
//! ```
//!
//! An agent reply is an array of such entries.  Each entry is decoded on its
//! own; a bad entry becomes a [`MalformedDecision`] and the rest still apply.

use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId};
use serde_json::{Value, json};
use tracing::warn;

use crate::{Decision, DecodeError, DecodeResult, DispatchAgent, MalformedDecision, Snapshot};

pub const SEND_TO_EMERGENCY: &str = "SendAmbulanceToEmergency";
pub const SEND_TO_HOSPITAL: &str = "SendAmbulanceToHospital";
pub const RELOCATE: &str = "RelocateAmbulance";
pub const CHANGE_TARGET_HOSPITAL: &str = "ChangeTargetHospital";

// ── RawDecision ───────────────────────────────────────────────────────────────

/// One undecoded wire entry.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDecision(pub Value);

impl RawDecision {
    pub fn decode(&self) -> DecodeResult<Decision> {
        let items = self.0.as_array().ok_or(DecodeError::NotAnArray)?;
        let kind = match items.first() {
            None => return Err(DecodeError::Empty),
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(DecodeError::UnknownKind(other.to_string())),
        };

        let (kind, arity): (&'static str, usize) = match kind {
            SEND_TO_EMERGENCY      => (SEND_TO_EMERGENCY, 3),
            SEND_TO_HOSPITAL       => (SEND_TO_HOSPITAL, 3),
            RELOCATE               => (RELOCATE, 4),
            CHANGE_TARGET_HOSPITAL => (CHANGE_TARGET_HOSPITAL, 3),
            other => return Err(DecodeError::UnknownKind(other.to_owned())),
        };
        if items.len() != arity {
            return Err(DecodeError::Arity { kind, expected: arity, found: items.len() });
        }

        let ambulance = AmbulanceId(id_at(items, 1, kind)?);
        let decision = match kind {
            SEND_TO_EMERGENCY => Decision::SendToEmergency {
                ambulance,
                emergency: EmergencyId(id_at(items, 2, kind)?),
            },
            SEND_TO_HOSPITAL => Decision::SendToHospital {
                ambulance,
                hospital: HospitalId(id_at(items, 2, kind)?),
            },
            RELOCATE => Decision::Relocate {
                ambulance,
                destination: GeoPoint::new(coord_at(items, 2, kind)?, coord_at(items, 3, kind)?),
            },
            _ => Decision::ChangeTargetHospital {
                ambulance,
                hospital: HospitalId(id_at(items, 2, kind)?),
            },
        };
        Ok(decision)
    }
}

fn id_at(items: &[Value], position: usize, kind: &'static str) -> DecodeResult<u32> {
    items[position]
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(DecodeError::BadId { kind, position })
}

fn coord_at(items: &[Value], position: usize, kind: &'static str) -> DecodeResult<f64> {
    items[position].as_f64().ok_or(DecodeError::BadCoordinate { kind, position })
}

impl Decision {
    /// Encode as a wire tuple.
    pub fn to_wire(&self) -> Value {
        match *self {
            Decision::SendToEmergency { ambulance, emergency } => {
                json!([SEND_TO_EMERGENCY, ambulance.0, emergency.0])
            }
            Decision::SendToHospital { ambulance, hospital } => {
                json!([SEND_TO_HOSPITAL, ambulance.0, hospital.0])
            }
            Decision::Relocate { ambulance, destination } => {
                json!([RELOCATE, ambulance.0, destination.lat, destination.lng])
            }
            Decision::ChangeTargetHospital { ambulance, hospital } => {
                json!([CHANGE_TARGET_HOSPITAL, ambulance.0, hospital.0])
            }
        }
    }
}

/// Decode a whole agent reply.  Good entries keep their order.
pub fn decode_batch(reply: &Value) -> (Vec<Decision>, Vec<MalformedDecision>) {
    let Some(entries) = reply.as_array() else {
        return (Vec::new(), vec![MalformedDecision::new(reply, &DecodeError::BadBatch)]);
    };
    let mut decisions = Vec::with_capacity(entries.len());
    let mut malformed = Vec::new();
    for entry in entries {
        match RawDecision(entry.clone()).decode() {
            Ok(d) => decisions.push(d),
            Err(e) => malformed.push(MalformedDecision::new(entry, &e)),
        }
    }
    (decisions, malformed)
}

// ── WireAgent ─────────────────────────────────────────────────────────────────

/// Adapts a JSON-speaking strategy to [`DispatchAgent`].
///
/// Each minute the snapshot is serialized to a `serde_json::Value` and passed
/// to `respond`; its reply is decoded with [`decode_batch`].  Entries that
/// fail to decode are held until the simulator calls
/// [`take_malformed`](DispatchAgent::take_malformed).
pub struct WireAgent<F> {
    respond:   F,
    malformed: Vec<MalformedDecision>,
}

impl<F> WireAgent<F>
where
    F: FnMut(&Value) -> Value,
{
    pub fn new(respond: F) -> Self {
        Self { respond, malformed: Vec::new() }
    }
}

impl<F> DispatchAgent for WireAgent<F>
where
    F: FnMut(&Value) -> Value,
{
    fn decide(&mut self, snapshot: &Snapshot) -> Vec<Decision> {
        let request = match serde_json::to_value(snapshot) {
            Ok(v) => v,
            Err(e) => {
                warn!(minute = snapshot.minute.0, error = %e, "snapshot serialization failed");
                return Vec::new();
            }
        };
        let reply = (self.respond)(&request);
        let (decisions, malformed) = decode_batch(&reply);
        self.malformed.extend(malformed);
        decisions
    }

    fn take_malformed(&mut self) -> Vec<MalformedDecision> {
        std::mem::take(&mut self.malformed)
    }
}
