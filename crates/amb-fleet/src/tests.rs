//! Unit tests for amb-fleet.

#[cfg(test)]
mod ambulance_status {
    use crate::AmbulanceStatus::{self, *};

    const ALL: [AmbulanceStatus; 7] =
        [Idle, Relocating, EnRouteToEmergency, AtEmergency, EnRouteToHospital, BeingCleaned, Broken];

    #[test]
    fn broken_is_terminal_both_ways() {
        for s in ALL {
            assert!(!Broken.can_transition_to(s));
            assert!(!s.can_transition_to(Broken));
        }
    }

    #[test]
    fn dispatch_cycle_is_legal() {
        let cycle = [Idle, EnRouteToEmergency, AtEmergency, EnRouteToHospital, BeingCleaned, Idle];
        for pair in cycle.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn no_shortcuts() {
        assert!(!Idle.can_transition_to(AtEmergency));
        assert!(!EnRouteToEmergency.can_transition_to(Idle));
        assert!(!EnRouteToHospital.can_transition_to(Idle));
        assert!(!BeingCleaned.can_transition_to(EnRouteToEmergency));
        assert!(!Idle.can_transition_to(Idle));
    }

    #[test]
    fn availability() {
        assert!(Idle.is_available());
        assert!(Relocating.is_available());
        assert!(!AtEmergency.is_available());
        assert!(!Broken.is_available());
        assert!(EnRouteToHospital.is_moving());
        assert!(!BeingCleaned.is_moving());
    }

    #[test]
    fn serde_names_match_labels() {
        for s in ALL {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.as_str()));
        }
    }
}

#[cfg(test)]
mod trip {
    use amb_core::GeoPoint;

    use crate::Trip;

    #[test]
    fn advances_to_destination() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let mut trip = Trip::new(a, b, 4, 111.0);
        assert_eq!(trip.remaining_minutes(), 4);
        trip.advance();
        trip.advance();
        assert!((trip.position().lng - 0.5).abs() < 1e-9);
        trip.advance();
        trip.advance();
        trip.advance();
        assert!(trip.is_complete());
        assert_eq!(trip.elapsed_minutes, 4);
        assert_eq!(trip.position(), b);
    }

    #[test]
    fn zero_minute_trip_is_complete() {
        let p = GeoPoint::new(10.0, 10.0);
        let trip = Trip::new(p, p, 0, 0.0);
        assert!(trip.is_complete());
        assert_eq!(trip.progress(), 1.0);
    }
}

#[cfg(test)]
mod emergency_status {
    use crate::EmergencyStatus::*;

    #[test]
    fn forward_one_step_only() {
        assert!(WaitingForAssignment.can_advance_to(WaitingForAmbulance));
        assert!(WaitingForAmbulance.can_advance_to(BeingServed));
        assert!(BeingServed.can_advance_to(ResolvedNoTransport));
        assert!(BeingServed.can_advance_to(ResolvedTransported));

        assert!(!WaitingForAssignment.can_advance_to(BeingServed));
        assert!(!BeingServed.can_advance_to(WaitingForAmbulance));
        assert!(!ResolvedNoTransport.can_advance_to(ResolvedTransported));
    }
}

#[cfg(test)]
mod builder {
    use amb_core::{GeoPoint, HospitalId};

    use crate::{AmbulanceStatus, FleetError, MapInput, RegistryBuilder};

    fn p() -> GeoPoint {
        GeoPoint::new(48.1, 11.5)
    }

    #[test]
    fn ids_follow_input_order() {
        let reg = RegistryBuilder::new()
            .ambulance(p())
            .broken_ambulance(p())
            .hospital(p(), 3)
            .hospital_with_occupancy(p(), 2, 2)
            .build()
            .unwrap();
        assert_eq!(reg.ambulances[1].id.0, 1);
        assert_eq!(reg.ambulances[1].status, AmbulanceStatus::Broken);
        assert_eq!(reg.hospitals[1].free_beds(), 0);
        assert!(reg.emergencies.is_empty());
    }

    #[test]
    fn rejects_bad_coordinates() {
        let err = RegistryBuilder::new().ambulance(GeoPoint::new(95.0, 0.0)).build().unwrap_err();
        assert!(matches!(err, FleetError::InvalidCoordinates { .. }));
        let err = RegistryBuilder::new().station(GeoPoint::new(0.0, 181.0)).build().unwrap_err();
        assert!(matches!(err, FleetError::InvalidCoordinates { .. }));
    }

    #[test]
    fn rejects_bad_capacity() {
        let err = RegistryBuilder::new().hospital(p(), 0).build().unwrap_err();
        assert!(matches!(err, FleetError::ZeroCapacity(HospitalId(0))));
        let err = RegistryBuilder::new().hospital_with_occupancy(p(), 2, 3).build().unwrap_err();
        assert!(matches!(err, FleetError::OverOccupied { occupied: 3, capacity: 2, .. }));
    }

    #[test]
    fn map_from_json() {
        let json = r#"{
            "ambulances": [{"location": {"lat": 1.0, "lng": 2.0}}],
            "hospitals":  [{"location": {"lat": 1.5, "lng": 2.5}, "capacity": 5, "occupied": 1}]
        }"#;
        let map: MapInput = serde_json::from_str(json).unwrap();
        let reg = RegistryBuilder::from_map(map).build().unwrap();
        assert_eq!(reg.ambulances[0].status, AmbulanceStatus::Idle);
        assert_eq!(reg.hospitals[0].free_beds(), 4);
        assert!(reg.stations.is_empty());
    }
}

#[cfg(test)]
mod calls {
    use amb_core::{GeoPoint, HospitalId, Minute};

    use crate::{CallQueue, EmergencyCall, FleetError};

    fn call(minute: u64, lat: f64) -> EmergencyCall {
        EmergencyCall {
            call_minute:        Minute(minute),
            location:           GeoPoint::new(lat, 0.0),
            possible_hospitals: Vec::new(),
        }
    }

    #[test]
    fn drains_in_minute_then_input_order() {
        let mut q =
            CallQueue::from_calls(vec![call(5, 1.0), call(0, 2.0), call(5, 3.0), call(9, 4.0)], 0).unwrap();
        assert_eq!(q.len(), 4);
        assert_eq!(q.next_minute(), Some(Minute(0)));

        let due = q.drain_due(Minute(5));
        let lats: Vec<f64> = due.iter().map(|c| c.location.lat).collect();
        assert_eq!(lats, vec![2.0, 1.0, 3.0]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_minute(), Some(Minute(9)));

        assert!(q.drain_due(Minute(8)).is_empty());
        assert_eq!(q.drain_due(Minute(100)).len(), 1);
        assert!(q.is_empty());
    }

    #[test]
    fn rejects_unknown_hospital() {
        let mut c = call(0, 0.0);
        c.possible_hospitals = vec![HospitalId(0), HospitalId(2)];
        let err = CallQueue::from_calls(vec![c], 2).unwrap_err();
        assert!(matches!(err, FleetError::UnknownHospital { call: 0, hospital: HospitalId(2) }));
    }

    #[test]
    fn rejects_bad_location() {
        let err = CallQueue::from_calls(vec![call(0, -91.0)], 0).unwrap_err();
        assert!(matches!(err, FleetError::InvalidCoordinates { .. }));
    }
}

#[cfg(test)]
mod registry {
    use amb_core::{AmbulanceId, GeoPoint, HospitalId, Minute};

    use crate::{Admission, EmergencyCall, EmergencyStatus, Registry, RegistryBuilder};

    fn two_hospitals() -> Registry {
        let p = GeoPoint::new(0.0, 0.0);
        RegistryBuilder::new()
            .ambulance(p)
            .ambulance(p)
            .hospital(p, 1)
            .hospital(p, 2)
            .build()
            .unwrap()
    }

    #[test]
    fn admit_call_assigns_sequential_ids() {
        let mut reg = two_hospitals();
        let c = EmergencyCall {
            call_minute:        Minute(3),
            location:           GeoPoint::new(1.0, 1.0),
            possible_hospitals: vec![],
        };
        assert_eq!(reg.admit_call(c.clone()).0, 0);
        assert_eq!(reg.admit_call(c).0, 1);
        assert_eq!(reg.emergencies[1].status, EmergencyStatus::WaitingForAssignment);
        assert!(!reg.all_resolved());
        assert_eq!(reg.active_emergencies().count(), 2);
        assert_eq!(reg.last_call(), Some(Minute(3)));
    }

    #[test]
    fn retarget_moves_reservation() {
        let mut reg = two_hospitals();
        assert!(reg.assign_hospital(AmbulanceId(0), HospitalId(0)));
        assert_eq!(reg.hospitals[0].reserved, 1);
        assert!(reg.bed_ledger_balanced());

        assert!(reg.assign_hospital(AmbulanceId(0), HospitalId(1)));
        assert_eq!(reg.hospitals[0].reserved, 0);
        assert_eq!(reg.hospitals[1].reserved, 1);
        assert!(reg.bed_ledger_balanced());

        // Same target again changes nothing.
        assert!(reg.assign_hospital(AmbulanceId(0), HospitalId(1)));
        assert_eq!(reg.hospitals[1].reserved, 1);
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut reg = two_hospitals();
        let before = reg.clone();
        assert!(!reg.assign_hospital(AmbulanceId(9), HospitalId(0)));
        assert!(!reg.assign_hospital(AmbulanceId(0), HospitalId(9)));
        assert_eq!(reg, before);
    }

    #[test]
    fn admission_overflows_when_full() {
        let mut reg = two_hospitals();
        reg.assign_hospital(AmbulanceId(0), HospitalId(0));
        reg.assign_hospital(AmbulanceId(1), HospitalId(0));
        assert_eq!(reg.hospitals[0].free_beds(), 0);

        assert_eq!(reg.admit_patient(AmbulanceId(0)), Some((HospitalId(0), Admission::Bed)));
        assert_eq!(reg.admit_patient(AmbulanceId(1)), Some((HospitalId(0), Admission::Overflow)));
        let h = &reg.hospitals[0];
        assert_eq!((h.occupied, h.reserved, h.overflow_admissions), (1, 0, 1));
        assert!(reg.bed_ledger_balanced());
        assert_eq!(reg.ambulances[0].assigned_hospital, None);

        assert_eq!(reg.admit_patient(AmbulanceId(0)), None);

        reg.discharge_patient(HospitalId(0));
        assert_eq!(reg.hospitals[0].free_beds(), 1);
    }
}
