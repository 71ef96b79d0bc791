//! `amb-sim`: minute loop orchestrator for the ambusim dispatch simulator.
//!
//! # The minute loop
//!
//! ```text
//! while not (all resolved and no calls pending) and minute < max_minutes:
//!   ① Inject  : calls with call_minute <= now become emergencies.
//!   ② Snapshot: owned copy of the registry for the agent.
//!   ③ Decide  : DispatchAgent::decide, exactly once.
//!   ④ Apply   : each decision validated and applied (or rejected) in order.
//!   ⑤ Advance : TransitionEngine moves everything by one minute.
//!   ⑥ Record  : TickRecord to the observer.
//!   ⑦ Tick    : minute += 1.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs independent repetitions on Rayon's thread pool.   |
//! | `osrm`     | Enables `RoutingMethod::Osrm` via `amb-routing`.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use amb_agent::NearestAgent;
//! use amb_core::SimConfig;
//! use amb_sim::{NoopObserver, Scenario, SimBuilder};
//!
//! let scenario: Scenario = serde_json::from_str(json)?;
//! let mut sim = SimBuilder::new(SimConfig::default(), scenario, NearestAgent::new()).build()?;
//! let report = sim.run(&mut NoopObserver);
//! println!("score: {:?}", report.score());
//! ```

pub mod apply;
pub mod builder;
pub mod error;
pub mod experiments;
pub mod observer;
pub mod record;
pub mod sim;
pub mod stats;


pub use apply::apply_decision;
pub use builder::{Scenario, SimBuilder};
pub use error::{SimError, SimResult};
pub use experiments::{ExperimentSummary, Repetition, run_repetitions};
pub use observer::{EventLog, NoopObserver, SimObserver};
pub use record::{
    AmbulanceState, DecisionOutcome, DecisionRecord, Issued, RejectReason, RunOutcome, RunReport,
    TickRecord,
};
pub use sim::Sim;
pub use stats::WaitTimeStats;
