//! The `DispatchAgent` trait: the main extension point for user code.

use crate::{Decision, MalformedDecision, Snapshot};

/// Pluggable dispatch strategy.
///
/// The simulator calls [`decide`][Self::decide] exactly once per minute, after
/// new calls are injected and before entities move.  Decisions are applied in
/// the returned order; each is validated independently, so a rejected
/// decision does not affect the ones after it.
///
/// # Determinism
///
/// Runs are reproducible only if the agent is: given equal snapshots it must
/// return equal decision lists.  An agent that needs randomness should own a
/// seeded RNG.
///
/// # Example
///
/// ```rust
/// use amb_agent::{Decision, DispatchAgent, Snapshot};
///
/// /// Sends the lowest-numbered available ambulance to each new call.
/// struct FirstFree;
///
/// impl DispatchAgent for FirstFree {
///     fn decide(&mut self, snapshot: &Snapshot) -> Vec<Decision> {
///         snapshot
///             .waiting_emergencies()
///             .zip(snapshot.available_ambulances())
///             .map(|(e, a)| Decision::SendToEmergency { ambulance: a.id, emergency: e.id })
///             .collect()
///     }
/// }
/// ```
pub trait DispatchAgent {
    /// Return the decisions for this minute.  An empty `Vec` means "wait".
    fn decide(&mut self, snapshot: &Snapshot) -> Vec<Decision>;

    /// Entries from the last [`decide`][Self::decide] call that could not be
    /// turned into a [`Decision`].
    ///
    /// Only wire adapters produce these.  Default: none.
    fn take_malformed(&mut self) -> Vec<MalformedDecision> {
        Vec::new()
    }
}

impl<A: DispatchAgent + ?Sized> DispatchAgent for Box<A> {
    fn decide(&mut self, snapshot: &Snapshot) -> Vec<Decision> {
        (**self).decide(snapshot)
    }

    fn take_malformed(&mut self) -> Vec<MalformedDecision> {
        (**self).take_malformed()
    }
}
