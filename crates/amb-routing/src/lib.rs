//! `amb-routing`: travel-time and distance estimation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`provider`]  | `RouteProvider` trait, `RouteEstimate`, `HaversineProvider`|
//! | [`estimator`] | `RoutingEstimator` (fallback wrapper), `Estimate`, `linear_route` |
//! | [`osrm`]      | `OsrmProvider` (feature = `"osrm"` only)                   |
//! | [`error`]     | `RoutingError`, `RoutingResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag   | Effect                                                  |
//! |--------|---------------------------------------------------------|
//! | `osrm` | Enables the OSRM HTTP provider via blocking `reqwest`.  |

pub mod error;
pub mod estimator;
pub mod provider;

#[cfg(feature = "osrm")]
pub mod osrm;

#[cfg(test)]
mod tests;

pub use error::{RoutingError, RoutingResult};
pub use estimator::{Estimate, RoutingEstimator, linear_route};
pub use provider::{HaversineProvider, RouteEstimate, RouteProvider};

#[cfg(feature = "osrm")]
pub use osrm::OsrmProvider;
