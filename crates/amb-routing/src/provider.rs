//! Route provider trait and the default haversine implementation.
//!
//! # Pluggability
//!
//! The estimator calls providers through the [`RouteProvider`] trait, so an
//! application can plug in a routing service, a precomputed travel-time table
//! or a test double without touching the simulation core.

use amb_core::GeoPoint;

use crate::RoutingResult;

/// Raw answer from a provider: fractional minutes and road distance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RouteEstimate {
    pub minutes:     f64,
    pub distance_km: f64,
}

/// A travel-time/distance oracle.
///
/// Implementations must be `Send + Sync` so independent runs can share one
/// provider across Rayon workers.
pub trait RouteProvider: Send + Sync {
    /// Short name used in log fields.
    fn name(&self) -> &str;

    /// Travel time and distance from `origin` to `destination`.
    fn query(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteEstimate>;
}

/// Great-circle distance at a constant average speed.  Deterministic, no I/O.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HaversineProvider {
    pub speed_kmh: f64,
}

impl HaversineProvider {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Infallible form of [`RouteProvider::query`].
    pub fn estimate(&self, origin: GeoPoint, destination: GeoPoint) -> RouteEstimate {
        let distance_km = origin.distance_km(destination);
        RouteEstimate {
            minutes: distance_km / self.speed_kmh * 60.0,
            distance_km,
        }
    }
}

impl RouteProvider for HaversineProvider {
    fn name(&self) -> &str {
        "haversine"
    }

    fn query(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteEstimate> {
        Ok(self.estimate(origin, destination))
    }
}
