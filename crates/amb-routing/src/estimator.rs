//! The routing estimator used by the decision applier.

use amb_core::{DispatchConfig, GeoPoint, RoutingMethod};
use tracing::warn;

use crate::{HaversineProvider, RouteEstimate, RouteProvider, RoutingError, RoutingResult};

/// Whole-minute travel estimate handed to the simulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Estimate {
    /// Travel time rounded up, so an ambulance never arrives early.
    pub minutes:     u32,
    pub distance_km: f64,
    /// `true` when the configured provider failed and haversine was used.
    pub degraded:    bool,
}

impl Estimate {
    fn from_route(route: RouteEstimate, degraded: bool) -> Self {
        Self {
            minutes: route.minutes.max(0.0).ceil() as u32,
            distance_km: route.distance_km,
            degraded,
        }
    }
}

/// Wraps an optional primary [`RouteProvider`] with a haversine fallback.
///
/// `estimate` never fails: a provider error (or a nonsensical answer) is
/// logged at `warn` and replaced by the haversine estimate, flagged
/// `degraded` so the caller can record it.
pub struct RoutingEstimator {
    primary:  Option<Box<dyn RouteProvider>>,
    fallback: HaversineProvider,
}

impl RoutingEstimator {
    /// Haversine only.
    pub fn haversine(speed_kmh: f64) -> Self {
        Self { primary: None, fallback: HaversineProvider::new(speed_kmh) }
    }

    /// Use `provider` first, haversine at `fallback_speed_kmh` on failure.
    pub fn with_provider(provider: Box<dyn RouteProvider>, fallback_speed_kmh: f64) -> Self {
        Self { primary: Some(provider), fallback: HaversineProvider::new(fallback_speed_kmh) }
    }

    /// Build the estimator described by `config.routing`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::Unavailable`] when the method needs a Cargo feature
    /// this build was compiled without, or its client cannot be constructed.
    pub fn from_config(config: &DispatchConfig) -> RoutingResult<Self> {
        match &config.routing {
            RoutingMethod::Haversine => Ok(Self::haversine(config.average_speed_kmh)),

            #[cfg(feature = "osrm")]
            RoutingMethod::Osrm { endpoint } => {
                let provider = crate::OsrmProvider::new(endpoint)?;
                Ok(Self::with_provider(Box::new(provider), config.average_speed_kmh))
            }

            #[cfg(not(feature = "osrm"))]
            RoutingMethod::Osrm { .. } => Err(RoutingError::Unavailable(
                "OSRM routing requires the `osrm` feature of amb-routing".into(),
            )),
        }
    }

    /// Name of the provider consulted first.
    pub fn method_name(&self) -> &str {
        self.primary.as_deref().map_or("haversine", |p| p.name())
    }

    /// Travel estimate from `origin` to `destination`.
    pub fn estimate(&self, origin: GeoPoint, destination: GeoPoint) -> Estimate {
        let Some(primary) = self.primary.as_deref() else {
            return Estimate::from_route(self.fallback.estimate(origin, destination), false);
        };

        let result = primary.query(origin, destination).and_then(|route| {
            if route.minutes.is_finite() && route.minutes >= 0.0 && route.distance_km.is_finite() {
                Ok(route)
            } else {
                Err(RoutingError::InvalidResponse(format!(
                    "{} min / {} km",
                    route.minutes, route.distance_km
                )))
            }
        });

        match result {
            Ok(route) => Estimate::from_route(route, false),
            Err(err) => {
                warn!(
                    provider = primary.name(),
                    %origin,
                    %destination,
                    %err,
                    "route provider failed; falling back to haversine"
                );
                Estimate::from_route(self.fallback.estimate(origin, destination), true)
            }
        }
    }
}

/// Per-minute waypoints for a straight-line trip of `minutes` minutes.
///
/// Returns `(minute_offset, point)` pairs starting at `(0, origin)` and ending
/// at `(minutes, destination)`.  A zero-minute trip yields the destination
/// alone.  Used by log consumers to replay movement.
pub fn linear_route(origin: GeoPoint, destination: GeoPoint, minutes: u32) -> Vec<(u32, GeoPoint)> {
    if minutes == 0 {
        return vec![(0, destination)];
    }
    (0..=minutes)
        .map(|m| (m, origin.lerp(destination, m as f64 / minutes as f64)))
        .collect()
}
