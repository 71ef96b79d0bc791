//! `amb-core`: foundational types for the `ambusim` dispatch simulator.
//!
//! This crate is a dependency of every other `amb-*` crate.  It has no `amb-*`
//! dependencies and minimal external ones (`rand`, `thiserror`, `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `AmbulanceId`, `EmergencyId`, `HospitalId`              |
//! | [`geo`]       | `GeoPoint`, haversine distance, interpolation           |
//! | [`time`]      | `Minute`, `SimClock`                                    |
//! | [`config`]    | `SimConfig`, `DispatchConfig`, `RoutingMethod`          |
//! | [`rng`]       | `SimRng` (one per run)                                  |
//! | [`sampler`]   | `DurationSampler`: dwell, cleaning, transport, delay   |
//! | [`error`]     | `CoreError`, `CoreResult`                               |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod sampler;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DispatchConfig, MinuteRange, RoutingMethod, SimConfig};
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{AmbulanceId, EmergencyId, HospitalId};
pub use rng::SimRng;
pub use sampler::DurationSampler;
pub use time::{Minute, SimClock};
