//! OSRM HTTP route provider (feature `osrm`).

use std::time::Duration;

use amb_core::GeoPoint;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::{RouteEstimate, RouteProvider, RoutingError, RoutingResult};

/// Routes via an OSRM `route/v1/driving` endpoint.
pub struct OsrmProvider {
    client:   Client,
    endpoint: String,
}

impl OsrmProvider {
    /// Build a provider for `endpoint` (e.g. `"http://localhost:5000"`).
    pub fn new(endpoint: &str) -> RoutingResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| RoutingError::Unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }
}

/// Minimal OSRM JSON response structures.
#[derive(Deserialize)]
pub(crate) struct OsrmResponse {
    code:   String,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64, // metres
    duration: f64, // seconds
}

impl RouteProvider for OsrmProvider {
    fn name(&self) -> &str {
        "osrm"
    }

    fn query(&self, origin: GeoPoint, destination: GeoPoint) -> RoutingResult<RouteEstimate> {
        // OSRM takes lng,lat pairs.
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=false",
            self.endpoint, origin.lng, origin.lat, destination.lng, destination.lat,
        );

        let resp: OsrmResponse = self.client.get(&url).send()?.error_for_status()?.json()?;
        resp.into_estimate()
    }
}

impl OsrmResponse {
    /// First route of an `"Ok"` response, converted to minutes and km.
    pub(crate) fn into_estimate(self) -> RoutingResult<RouteEstimate> {
        if self.code != "Ok" {
            return Err(RoutingError::Status(self.code));
        }

        let route = self
            .routes
            .and_then(|r| r.into_iter().next())
            .ok_or(RoutingError::NoRoute)?;

        Ok(RouteEstimate {
            minutes:     route.duration / 60.0,
            distance_km: route.distance / 1000.0,
        })
    }
}
