//! `amb-engine`: advances every entity by one simulated minute.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`engine`]    | `TransitionEngine`: the one-minute advance                   |
//! | [`event`]     | `EngineEvent`: what happened during the advance              |
//! | [`discharge`] | `DischargeQueue`: time-ordered bed releases                  |
//!
//! # Movement model
//!
//! Ambulances move in a straight line at a constant number of minutes per
//! trip, fixed when the trip starts:
//!
//! 1. The applier in `amb-sim` creates a [`Trip`][amb_fleet::Trip] with
//!    `total_minutes` from the routing estimate.
//! 2. Each minute the engine draws a delay; without one the trip gains a
//!    minute and the position is interpolated along origin → destination.
//! 3. When `elapsed == total` the ambulance snaps to the destination and the
//!    arrival transition fires.
//!
//! The engine is the only code that touches positions and timers.  All
//! events are stamped with the *end* of the minute being advanced
//! (`now + 1`), so a trip of `n` minutes started at minute `s` with no
//! delays arrives at `s + n`.

pub mod discharge;
pub mod engine;
pub mod event;


pub use discharge::DischargeQueue;
pub use engine::TransitionEngine;
pub use event::EngineEvent;
