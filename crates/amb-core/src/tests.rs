//! Unit tests for amb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AmbulanceId, EmergencyId, HospitalId};

    #[test]
    fn index_roundtrip() {
        let id = AmbulanceId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AmbulanceId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(EmergencyId(0) < EmergencyId(1));
        assert!(HospitalId(100) > HospitalId(99));
    }

    #[test]
    fn display() {
        assert_eq!(AmbulanceId(7).to_string(), "AmbulanceId(7)");
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&HospitalId(3)).unwrap(), "3");
        let id: EmergencyId = serde_json::from_str("12").unwrap();
        assert_eq!(id, EmergencyId(12));
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(40.15, -75.30);
        assert!(p.distance_km(p) < 1e-9);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111.2 km
        let a = GeoPoint::new(40.0, -75.0);
        let b = GeoPoint::new(41.0, -75.0);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.5, "got {d}");
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), GeoPoint::new(0.0, 0.5));
        // clamped
        assert_eq!(a.lerp(b, 3.0), b);
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(40.0, -75.0).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, -181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}

#[cfg(test)]
mod time {
    use crate::{Minute, SimClock};

    #[test]
    fn minute_arithmetic() {
        let t = Minute(10);
        assert_eq!(t + 5, Minute(15));
        assert_eq!(t.offset(3), Minute(13));
        assert_eq!(Minute(15) - Minute(10), 5u64);
        assert_eq!(Minute(3).since(Minute(10)), 0);
    }

    #[test]
    fn offset_saturates() {
        let last = Minute(u64::MAX);
        assert_eq!(Minute(u64::MAX - 1).offset(5), last);
        assert_eq!(Minute(7) + u64::MAX, last);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(1_000);
        assert_eq!(clock.current_unix_secs(), 1_000);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 120);
        assert_eq!(clock.unix_secs_at(Minute(10)), 1_600);
    }

    #[test]
    fn clock_dhm() {
        let mut clock = SimClock::new(0);
        for _ in 0..(1_440 + 61) {
            clock.advance();
        }
        assert_eq!(clock.elapsed_dhm(), (1, 1, 1));
        assert_eq!(clock.to_string(), "M1501 (day 1 01:01)");
    }
}

#[cfg(test)]
mod config {
    use crate::{DispatchConfig, MinuteRange, RoutingMethod, SimConfig};

    #[test]
    fn defaults_validate() {
        assert!(DispatchConfig::default().validate().is_ok());
    }

    #[test]
    fn bad_probability_rejected() {
        let cfg = DispatchConfig { prob_delay: 1.5, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn inverted_range_rejected() {
        let cfg = DispatchConfig {
            dwell_minutes: MinuteRange::new(5, 2),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SimConfig = serde_json::from_str(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.max_minutes, SimConfig::default().max_minutes);

        let cfg: DispatchConfig = serde_json::from_str(
            r#"{ "routing": { "kind": "osrm", "endpoint": "http://localhost:5000" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.routing, RoutingMethod::Osrm { endpoint: "http://localhost:5000".into() });
        assert_eq!(cfg.dwell_minutes, MinuteRange::new(2, 10));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f64 = r1.random();
            let b: f64 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn repetition_seeds_diverge() {
        assert_eq!(SimRng::repetition_seed(9, 0), 9);
        assert_ne!(SimRng::repetition_seed(9, 1), SimRng::repetition_seed(9, 2));
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod sampler {
    use crate::{DispatchConfig, DurationSampler, MinuteRange, SimRng};

    #[test]
    fn draws_stay_in_configured_ranges() {
        let sampler = DurationSampler::from_config(&DispatchConfig::default());
        let mut rng = SimRng::new(3);
        for _ in 0..500 {
            let dwell = sampler.dwell_minutes(&mut rng);
            let clean = sampler.cleaning_minutes(&mut rng);
            assert!((2..=10).contains(&dwell), "dwell {dwell}");
            assert!((2..=5).contains(&clean), "cleaning {clean}");
        }
    }

    #[test]
    fn degenerate_range_is_constant() {
        let cfg = DispatchConfig {
            dwell_minutes: MinuteRange::new(4, 4),
            ..Default::default()
        };
        let sampler = DurationSampler::from_config(&cfg);
        let mut rng = SimRng::new(0);
        assert_eq!(sampler.dwell_minutes(&mut rng), 4);
    }

    #[test]
    fn certain_outcomes() {
        let cfg = DispatchConfig {
            prob_delay:            0.0,
            transport_probability: 1.0,
            ..Default::default()
        };
        let sampler = DurationSampler::from_config(&cfg);
        let mut rng = SimRng::new(0);
        for _ in 0..50 {
            assert!(!sampler.delayed(&mut rng));
            assert!(sampler.transport_needed(&mut rng));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let sampler = DurationSampler::from_config(&DispatchConfig::default());
        let mut a = SimRng::new(77);
        let mut b = SimRng::new(77);
        let xs: Vec<u32> = (0..20).map(|_| sampler.dwell_minutes(&mut a)).collect();
        let ys: Vec<u32> = (0..20).map(|_| sampler.dwell_minutes(&mut b)).collect();
        assert_eq!(xs, ys);
    }
}
