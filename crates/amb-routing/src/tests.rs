//! Unit tests for amb-routing.

use std::sync::atomic::{AtomicUsize, Ordering};

use amb_core::{DispatchConfig, GeoPoint, RoutingMethod};

use crate::{
    Estimate, HaversineProvider, RouteEstimate, RouteProvider, RoutingError, RoutingEstimator,
    RoutingResult, linear_route,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Provider that always fails and counts how often it was asked.
struct FailingProvider(AtomicUsize);

impl RouteProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn query(&self, _o: GeoPoint, _d: GeoPoint) -> RoutingResult<RouteEstimate> {
        self.0.fetch_add(1, Ordering::Relaxed);
        Err(RoutingError::Status("NoSegment".into()))
    }
}

/// Provider that answers with a fixed estimate.
struct FixedProvider(RouteEstimate);

impl RouteProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn query(&self, _o: GeoPoint, _d: GeoPoint) -> RoutingResult<RouteEstimate> {
        Ok(self.0)
    }
}

// ── HaversineProvider ─────────────────────────────────────────────────────────

#[cfg(test)]
mod haversine_tests {
    use super::*;

    #[test]
    fn minutes_follow_speed() {
        // ~111.2 km at 60 km/h ≈ 111.2 minutes
        let p = HaversineProvider::new(60.0);
        let est = p.estimate(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((est.minutes - est.distance_km).abs() < 1e-9);
        assert!((est.distance_km - 111.195).abs() < 0.5);
    }

    #[test]
    fn same_point_is_free() {
        let p = HaversineProvider::new(40.0);
        let a = GeoPoint::new(40.0, -75.0);
        let est = p.query(a, a).unwrap();
        assert_eq!(est.minutes, 0.0);
        assert_eq!(est.distance_km, 0.0);
    }
}

// ── RoutingEstimator ──────────────────────────────────────────────────────────

#[cfg(test)]
mod estimator_tests {
    use super::*;

    #[test]
    fn rounds_minutes_up() {
        let est = RoutingEstimator::with_provider(
            Box::new(FixedProvider(RouteEstimate { minutes: 3.2, distance_km: 2.0 })),
            40.0,
        );
        let e = est.estimate(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.1));
        assert_eq!(e, Estimate { minutes: 4, distance_km: 2.0, degraded: false });
        assert_eq!(est.method_name(), "fixed");
    }

    #[test]
    fn failure_falls_back_and_flags_degraded() {
        let est = RoutingEstimator::with_provider(
            Box::new(FailingProvider(AtomicUsize::new(0))),
            60.0,
        );
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.1);
        let e = est.estimate(a, b);
        let expected = HaversineProvider::new(60.0).estimate(a, b);
        assert!(e.degraded);
        assert_eq!(e.minutes, expected.minutes.ceil() as u32);
        assert_eq!(e.distance_km, expected.distance_km);
    }

    #[test]
    fn nonsensical_answer_is_treated_as_failure() {
        let est = RoutingEstimator::with_provider(
            Box::new(FixedProvider(RouteEstimate { minutes: f64::NAN, distance_km: 1.0 })),
            40.0,
        );
        let e = est.estimate(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.1));
        assert!(e.degraded);
    }

    #[test]
    fn haversine_is_never_degraded() {
        let est = RoutingEstimator::haversine(40.0);
        let e = est.estimate(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!(!e.degraded);
        assert!(e.minutes > 0);
    }

    #[test]
    fn from_config_default_is_haversine() {
        let est = RoutingEstimator::from_config(&DispatchConfig::default()).unwrap();
        assert_eq!(est.method_name(), "haversine");
    }

    #[cfg(not(feature = "osrm"))]
    #[test]
    fn osrm_without_feature_is_unavailable() {
        let cfg = DispatchConfig {
            routing: RoutingMethod::Osrm { endpoint: "http://localhost:5000".into() },
            ..Default::default()
        };
        assert!(matches!(
            RoutingEstimator::from_config(&cfg),
            Err(RoutingError::Unavailable(_))
        ));
    }
}

// ── linear_route ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod linear_route_tests {
    use super::*;

    #[test]
    fn starts_at_origin_ends_at_destination() {
        let start = GeoPoint::new(40.0, -75.0);
        let end = GeoPoint::new(40.1, -75.1);
        let route = linear_route(start, end, 10);
        assert_eq!(route.len(), 11);
        assert_eq!(route[0], (0, start));
        let (last_offset, last) = route[route.len() - 1];
        assert_eq!(last_offset, 10);
        assert!((last.lat - end.lat).abs() < 1e-12);
        assert!((last.lng - end.lng).abs() < 1e-12);
    }

    #[test]
    fn zero_minutes_is_destination_only() {
        let end = GeoPoint::new(1.0, 1.0);
        assert_eq!(linear_route(GeoPoint::new(0.0, 0.0), end, 0), vec![(0, end)]);
    }
}

// ── OSRM response handling ────────────────────────────────────────────────────

#[cfg(all(test, feature = "osrm"))]
mod osrm_tests {
    use super::*;
    use crate::osrm::OsrmResponse;

    fn parse(json: &str) -> RoutingResult<RouteEstimate> {
        serde_json::from_str::<OsrmResponse>(json).unwrap().into_estimate()
    }

    #[test]
    fn ok_response_converts_units() {
        let est = parse(r#"{"code":"Ok","routes":[{"distance":12500.0,"duration":900.0,"weight":900.0}]}"#).unwrap();
        assert!((est.minutes - 15.0).abs() < 1e-9);
        assert!((est.distance_km - 12.5).abs() < 1e-9);
    }

    #[test]
    fn error_code_is_status() {
        let err = parse(r#"{"code":"NoSegment","message":"Could not find a matching segment"}"#).unwrap_err();
        assert!(matches!(err, RoutingError::Status(code) if code == "NoSegment"));
    }

    #[test]
    fn empty_routes_is_no_route() {
        assert!(matches!(parse(r#"{"code":"Ok","routes":[]}"#), Err(RoutingError::NoRoute)));
    }
}
