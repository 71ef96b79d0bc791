//! An agent that never acts.

use crate::{Decision, DispatchAgent, Snapshot};

/// A [`DispatchAgent`] that always returns an empty decision list.
///
/// Useful in tests and as a baseline: with it every call eventually times
/// out.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopAgent;

impl DispatchAgent for NoopAgent {
    fn decide(&mut self, _snapshot: &Snapshot) -> Vec<Decision> {
        vec![]
    }
}
