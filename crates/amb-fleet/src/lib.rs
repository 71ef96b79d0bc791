//! `amb-fleet`: the entity registry and data model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`ambulance`] | `Ambulance`, `AmbulanceStatus` (+ transition table), `Trip`    |
//! | [`emergency`] | `Emergency`, `EmergencyStatus` (forward-only), `EmergencyCall` |
//! | [`hospital`]  | `Hospital` bed ledger (reserve / release / admit / discharge)  |
//! | [`registry`]  | `Registry`: arenas indexed by typed ids                       |
//! | [`builder`]   | `MapInput`, `RegistryBuilder`: validated initial state        |
//! | [`calls`]     | `CallQueue`: time-ordered pending emergency calls             |
//! | [`error`]     | `FleetError`, `FleetResult<T>`                                 |
//!
//! # Identity
//!
//! Every entity lives in a `Vec` and its id is its index.  Entities refer to
//! each other only by id, never by reference, so the whole registry can be
//! cloned into an agent snapshot without aliasing live state.

pub mod ambulance;
pub mod builder;
pub mod calls;
pub mod emergency;
pub mod error;
pub mod hospital;
pub mod registry;

#[cfg(test)]
mod tests;

pub use ambulance::{Ambulance, AmbulanceStatus, Trip};
pub use builder::{AmbulanceSpec, HospitalSpec, MapInput, RegistryBuilder};
pub use calls::CallQueue;
pub use emergency::{Emergency, EmergencyCall, EmergencyStatus};
pub use error::{FleetError, FleetResult};
pub use hospital::{Admission, Hospital};
pub use registry::Registry;
