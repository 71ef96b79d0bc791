//! `amb-agent`: the boundary between the simulator and a dispatch strategy.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`decision`] | `Decision` enum (`SendToEmergency`, `SendToHospital`, …)          |
//! | [`snapshot`] | `Snapshot`: owned, read-only copy of the state for one minute    |
//! | [`model`]    | `DispatchAgent` trait                                             |
//! | [`wire`]     | `RawDecision`, `WireAgent`: JSON tuple wire format               |
//! | [`noop`]     | `NoopAgent`: never decides                                       |
//! | [`nearest`]  | `NearestAgent`: nearest-first reference strategy                 |
//! | [`error`]    | `DecodeError`, `MalformedDecision`                                |
//!
//! # Design notes
//!
//! Each minute the simulator hands the agent a [`Snapshot`] it owns outright.
//! Nothing the agent does to it can reach the live registry; the only way to
//! influence the run is the returned `Vec<Decision>`, which the simulator
//! validates one decision at a time.

pub mod decision;
pub mod error;
pub mod model;
pub mod nearest;
pub mod noop;
pub mod snapshot;
pub mod wire;

#[cfg(test)]
mod tests;

pub use decision::Decision;
pub use error::{DecodeError, DecodeResult, MalformedDecision};
pub use model::DispatchAgent;
pub use nearest::NearestAgent;
pub use noop::NoopAgent;
pub use snapshot::Snapshot;
pub use wire::{RawDecision, WireAgent};
