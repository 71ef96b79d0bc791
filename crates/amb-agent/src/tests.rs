//! Unit tests for amb-agent.

use amb_core::{AmbulanceId, EmergencyId, GeoPoint, HospitalId, Minute};
use amb_fleet::{AmbulanceStatus, EmergencyCall, EmergencyStatus, Registry, RegistryBuilder};

use crate::{Decision, DispatchAgent, NearestAgent, NoopAgent, Snapshot};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pt(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng)
}

fn call(lat: f64, lng: f64, possible: Vec<HospitalId>) -> EmergencyCall {
    EmergencyCall { call_minute: Minute(0), location: pt(lat, lng), possible_hospitals: possible }
}

/// Three ambulances on a line, two hospitals at either end.
fn line_registry() -> Registry {
    RegistryBuilder::new()
        .ambulance(pt(0.0, 0.0))
        .ambulance(pt(0.0, 0.1))
        .ambulance(pt(0.0, 0.2))
        .hospital(pt(0.0, -0.05), 1)
        .hospital(pt(0.0, 0.25), 2)
        .station(pt(0.0, 0.1))
        .build()
        .unwrap()
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use super::*;

    #[test]
    fn only_active_emergencies_are_visible() {
        let mut reg = line_registry();
        reg.admit_call(call(0.0, 0.0, vec![]));
        reg.admit_call(call(0.0, 0.0, vec![]));
        reg.emergencies[0].status = EmergencyStatus::ResolvedNoTransport;

        let snap = Snapshot::capture(Minute(4), &reg, 3);
        assert_eq!(snap.emergencies.len(), 1);
        assert!(snap.emergency(EmergencyId(0)).is_none());
        assert_eq!(snap.emergency(EmergencyId(1)).map(|e| e.id), Some(EmergencyId(1)));
        assert_eq!(snap.pending_calls, 3);
        assert_eq!(snap.ambulances.len(), 3);
    }

    #[test]
    fn snapshot_is_detached_from_registry() {
        let reg = line_registry();
        let mut snap = Snapshot::capture(Minute(0), &reg, 0);
        snap.ambulances[0].status = AmbulanceStatus::Broken;
        assert_eq!(reg.ambulances[0].status, AmbulanceStatus::Idle);
    }
}

// ── Decision ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod decision_tests {
    use super::*;

    #[test]
    fn ambulance_accessor() {
        let d = Decision::Relocate { ambulance: AmbulanceId(4), destination: pt(1.0, 1.0) };
        assert_eq!(d.ambulance(), AmbulanceId(4));
        assert_eq!(d.kind(), "RelocateAmbulance");
    }

    #[test]
    fn log_serialization_is_tagged() {
        let d = Decision::SendToHospital { ambulance: AmbulanceId(1), hospital: HospitalId(2) };
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"kind":"send_to_hospital","ambulance":1,"hospital":2}"#);
    }
}

// ── Wire format ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod wire_tests {
    use serde_json::json;

    use super::*;
    use crate::wire::decode_batch;
    use crate::{DecodeError, RawDecision, WireAgent};

    #[test]
    fn decodes_every_kind() {
        let cases = [
            (
                json!(["SendAmbulanceToEmergency", 1, 101]),
                Decision::SendToEmergency { ambulance: AmbulanceId(1), emergency: EmergencyId(101) },
            ),
            (
                json!(["SendAmbulanceToHospital", 2, 0]),
                Decision::SendToHospital { ambulance: AmbulanceId(2), hospital: HospitalId(0) },
            ),
            (
                json!(["RelocateAmbulance", 3, 40.1, -75.2]),
                Decision::Relocate { ambulance: AmbulanceId(3), destination: pt(40.1, -75.2) },
            ),
            (
                json!(["ChangeTargetHospital", 0, 5]),
                Decision::ChangeTargetHospital { ambulance: AmbulanceId(0), hospital: HospitalId(5) },
            ),
        ];
        for (raw, expected) in cases {
            assert_eq!(RawDecision(raw.clone()).decode().unwrap(), expected);
            assert_eq!(expected.to_wire(), raw);
        }
    }

    #[test]
    fn integer_coordinates_are_accepted() {
        let d = RawDecision(json!(["RelocateAmbulance", 0, 40, -75])).decode().unwrap();
        assert_eq!(d, Decision::Relocate { ambulance: AmbulanceId(0), destination: pt(40.0, -75.0) });
    }

    #[test]
    fn rejects_malformed_entries() {
        let err = |v| RawDecision(v).decode().unwrap_err();
        assert_eq!(err(json!({"kind": "x"})), DecodeError::NotAnArray);
        assert_eq!(err(json!([])), DecodeError::Empty);
        assert!(matches!(err(json!(["Teleport", 1])), DecodeError::UnknownKind(k) if k == "Teleport"));
        assert!(matches!(
            err(json!(["SendAmbulanceToEmergency", 1])),
            DecodeError::Arity { expected: 3, found: 2, .. }
        ));
        assert!(matches!(
            err(json!(["SendAmbulanceToHospital", -1, 0])),
            DecodeError::BadId { position: 1, .. }
        ));
        assert!(matches!(
            err(json!(["SendAmbulanceToHospital", 0, "h1"])),
            DecodeError::BadId { position: 2, .. }
        ));
        assert!(matches!(
            err(json!(["RelocateAmbulance", 0, "north", 1.0])),
            DecodeError::BadCoordinate { position: 2, .. }
        ));
    }

    #[test]
    fn batch_keeps_good_entries_in_order() {
        let reply = json!([
            ["SendAmbulanceToEmergency", 0, 0],
            ["Bogus"],
            ["SendAmbulanceToEmergency", 1, 1],
        ]);
        let (decisions, malformed) = decode_batch(&reply);
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[1].ambulance(), AmbulanceId(1));
        assert_eq!(malformed.len(), 1);
        assert_eq!(malformed[0].raw, r#"["Bogus"]"#);

        let (decisions, malformed) = decode_batch(&json!("nope"));
        assert!(decisions.is_empty());
        assert_eq!(malformed.len(), 1);
    }

    #[test]
    fn wire_agent_sees_snapshot_and_reports_malformed() {
        let mut reg = line_registry();
        reg.admit_call(call(0.0, 0.0, vec![]));
        let snap = Snapshot::capture(Minute(7), &reg, 0);

        let mut agent = WireAgent::new(|req: &serde_json::Value| {
            assert_eq!(req["minute"], json!(7));
            assert_eq!(req["emergencies"][0]["status"], json!("waiting_for_assignment"));
            json!([["SendAmbulanceToEmergency", 0, 0], [1, 2, 3]])
        });
        let decisions = agent.decide(&snap);
        assert_eq!(decisions.len(), 1);
        assert_eq!(agent.take_malformed().len(), 1);
        assert!(agent.take_malformed().is_empty());
    }
}

// ── Agents ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_tests {
    use super::*;

    #[test]
    fn noop_never_decides() {
        let mut reg = line_registry();
        reg.admit_call(call(0.0, 0.0, vec![]));
        assert!(NoopAgent.decide(&Snapshot::capture(Minute(0), &reg, 0)).is_empty());
    }

    #[test]
    fn boxed_agent_delegates() {
        let mut reg = line_registry();
        reg.admit_call(call(0.0, 0.0, vec![]));
        let mut agent: Box<dyn DispatchAgent> = Box::new(NearestAgent::new());
        assert_eq!(agent.decide(&Snapshot::capture(Minute(0), &reg, 0)).len(), 1);
    }

    #[test]
    fn nearest_dispatch_claims_each_ambulance_once() {
        let mut reg = line_registry();
        reg.admit_call(call(0.0, 0.19, vec![]));
        reg.admit_call(call(0.0, 0.21, vec![]));
        reg.ambulances[1].status = AmbulanceStatus::Broken;

        let decisions = NearestAgent::new().decide(&Snapshot::capture(Minute(0), &reg, 0));
        assert_eq!(
            decisions,
            vec![
                Decision::SendToEmergency { ambulance: AmbulanceId(2), emergency: EmergencyId(0) },
                Decision::SendToEmergency { ambulance: AmbulanceId(0), emergency: EmergencyId(1) },
            ]
        );
    }

    #[test]
    fn transport_prefers_allowed_hospital_with_free_bed() {
        let mut reg = line_registry();
        let e = reg.admit_call(call(0.0, 0.0, vec![HospitalId(1)]));
        reg.emergencies[0].status = EmergencyStatus::BeingServed;
        let amb = &mut reg.ambulances[0];
        amb.status = AmbulanceStatus::AtEmergency;
        amb.assigned_emergency = Some(e);
        amb.patient = Some(e);

        let decisions = NearestAgent::new().decide(&Snapshot::capture(Minute(0), &reg, 0));
        assert_eq!(
            decisions,
            vec![Decision::SendToHospital { ambulance: AmbulanceId(0), hospital: HospitalId(1) }]
        );

        // Allowed hospital full: fall back to the nearest one with a bed.
        reg.hospitals[1].occupied = 2;
        let decisions = NearestAgent::new().decide(&Snapshot::capture(Minute(0), &reg, 0));
        assert_eq!(
            decisions,
            vec![Decision::SendToHospital { ambulance: AmbulanceId(0), hospital: HospitalId(0) }]
        );
    }

    #[test]
    fn transport_honours_bed_reserved_on_scene() {
        let mut reg = line_registry();
        let e = reg.admit_call(call(0.0, 0.0, vec![HospitalId(1)]));
        reg.emergencies[0].status = EmergencyStatus::BeingServed;
        let amb = &mut reg.ambulances[0];
        amb.status = AmbulanceStatus::AtEmergency;
        amb.assigned_emergency = Some(e);
        amb.patient = Some(e);
        assert!(reg.assign_hospital(AmbulanceId(0), HospitalId(0)));

        let decisions = NearestAgent::new().decide(&Snapshot::capture(Minute(0), &reg, 0));
        assert_eq!(
            decisions,
            vec![Decision::SendToHospital { ambulance: AmbulanceId(0), hospital: HospitalId(0) }]
        );
    }

    #[test]
    fn retargets_away_from_full_hospital() {
        let mut reg = line_registry();
        reg.ambulances[0].status = AmbulanceStatus::EnRouteToHospital;
        reg.ambulances[0].patient = Some(EmergencyId(0));
        assert!(reg.assign_hospital(AmbulanceId(0), HospitalId(0)));
        reg.hospitals[0].occupied = 1;

        let decisions = NearestAgent::new().decide(&Snapshot::capture(Minute(0), &reg, 0));
        assert_eq!(
            decisions,
            vec![Decision::ChangeTargetHospital { ambulance: AmbulanceId(0), hospital: HospitalId(1) }]
        );
    }

    #[test]
    fn return_to_station_skips_ambulances_already_there() {
        let reg = line_registry();
        let decisions =
            NearestAgent::new().with_return_to_station().decide(&Snapshot::capture(Minute(0), &reg, 0));
        let relocated: Vec<AmbulanceId> = decisions.iter().map(Decision::ambulance).collect();
        assert_eq!(relocated, vec![AmbulanceId(0), AmbulanceId(2)]);
        assert!(NearestAgent::new().decide(&Snapshot::capture(Minute(0), &reg, 0)).is_empty());
    }
}
