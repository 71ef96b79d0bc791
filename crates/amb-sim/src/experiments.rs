//! Independent repetitions of one scenario.
//!
//! Each repetition builds its own [`Sim`][crate::Sim] from scratch, seeded
//! with [`SimRng::repetition_seed`], so runs share nothing and the result of
//! repetition `i` does not depend on how many others run beside it.  With the
//! `parallel` feature the repetitions run on Rayon's thread pool; results are
//! returned in index order either way.

use amb_agent::DispatchAgent;
use amb_core::{DispatchConfig, SimConfig, SimRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{NoopObserver, RunOutcome, RunReport, Scenario, SimBuilder, SimResult};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Repetition {
    pub index:  u64,
    pub seed:   u64,
    pub report: RunReport,
}

/// Aggregate over a set of repetitions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSummary {
    pub runs:       usize,
    pub completed:  usize,
    /// Mean of the per-run scores, over runs that have one.
    pub mean_score: Option<f64>,
}

impl ExperimentSummary {
    pub fn from_repetitions(reps: &[Repetition]) -> Self {
        let scores: Vec<f64> = reps.iter().filter_map(|r| r.report.score()).collect();
        Self {
            runs:       reps.len(),
            completed:  reps.iter().filter(|r| r.report.outcome == RunOutcome::Completed).count(),
            mean_score: (!scores.is_empty()).then(|| scores.iter().sum::<f64>() / scores.len() as f64),
        }
    }
}

/// Run `count` independent repetitions of `scenario`.
///
/// `make_agent(i)` supplies a fresh agent for repetition `i`.
///
/// # Errors
///
/// The first build error encountered (scenario and configuration are the
/// same for every repetition, so in practice either all fail or none do).
pub fn run_repetitions<A, F>(
    config:     &SimConfig,
    dispatch:   &DispatchConfig,
    scenario:   &Scenario,
    count:      u64,
    make_agent: F,
) -> SimResult<Vec<Repetition>>
where
    A: DispatchAgent,
    F: Fn(u64) -> A + Sync,
{
    info!(count, base_seed = config.seed, "running repetitions");

    let run_one = |index: u64| -> SimResult<Repetition> {
        let seed = SimRng::repetition_seed(config.seed, index);
        let config = SimConfig { seed, ..config.clone() };
        let mut sim = SimBuilder::new(config, scenario.clone(), make_agent(index))
            .dispatch(dispatch.clone())
            .build()?;
        let report = sim.run(&mut NoopObserver);
        Ok(Repetition { index, seed, report })
    };

    #[cfg(not(feature = "parallel"))]
    {
        (0..count).map(run_one).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        (0..count).into_par_iter().map(run_one).collect()
    }
}
