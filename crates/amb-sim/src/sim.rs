//! The `Sim` struct and its minute loop.

use amb_agent::{DispatchAgent, Snapshot};
use amb_core::{DispatchConfig, Minute, SimClock, SimConfig, SimRng};
use amb_engine::TransitionEngine;
use amb_fleet::{CallQueue, Registry};
use amb_routing::RoutingEstimator;
use tracing::{debug, info};

use crate::apply::apply_decision;
use crate::{
    AmbulanceState, DecisionRecord, RunOutcome, RunReport, SimObserver, TickRecord, WaitTimeStats,
};

/// Running decision counters for the report.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Totals {
    applied:  u64,
    rejected: u64,
    degraded: u64,
}

/// The main simulation runner.
///
/// Each call to [`step`](Self::step) processes one minute:
///
/// 1. **Inject**: calls with `call_minute <= now` become emergencies.
/// 2. **Snapshot**: an owned copy of the registry is built for the agent.
/// 3. **Decide**: [`DispatchAgent::decide`] is called exactly once.
/// 4. **Apply**: decisions are validated and applied in the returned order;
///    malformed wire entries are recorded as rejections.
/// 5. **Advance**: the transition engine moves every entity by one minute.
/// 6. **Record**: a [`TickRecord`] is built.
/// 7. **Tick**: the clock advances.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<A: DispatchAgent> {
    pub config:   SimConfig,
    pub dispatch: DispatchConfig,
    pub clock:    SimClock,

    /// All entities.  Mutated only by the applier and the engine.
    pub registry: Registry,

    /// Calls not yet injected.
    pub calls: CallQueue,

    pub agent: A,

    pub(crate) router: RoutingEstimator,
    pub(crate) engine: TransitionEngine,
    pub(crate) rng:    SimRng,
    pub(crate) totals: Totals,
}

impl<A: DispatchAgent> Sim<A> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every emergency is resolved with no calls left, or until
    /// `config.max_minutes`.
    ///
    /// Calls observer hooks at every minute boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> RunReport {
        info!(
            seed = self.config.seed,
            max_minutes = self.config.max_minutes,
            ambulances = self.registry.ambulances.len(),
            hospitals = self.registry.hospitals.len(),
            calls = self.calls.len(),
            routing = self.router.method_name(),
            "run start"
        );

        let outcome = loop {
            if let Some(outcome) = self.outcome() {
                break outcome;
            }
            observer.on_minute_start(self.clock.current);
            let record = self.step();
            observer.on_tick_end(&record);
        };

        let report = self.report(outcome);
        info!(
            outcome = ?report.outcome,
            final_minute = report.final_minute.0,
            resolved = report.stats.resolved,
            unresolved = report.unresolved.len(),
            rejected = report.decisions_rejected,
            score = ?report.score(),
            "run end"
        );
        observer.on_sim_end(&report);
        report
    }

    /// Run exactly `n` minutes from the current position, ignoring the
    /// termination conditions.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_minutes<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            observer.on_minute_start(self.clock.current);
            let record = self.step();
            observer.on_tick_end(&record);
        }
    }

    /// `Some` once the run is over.
    ///
    /// Completion is checked first, so a run whose last emergency resolves
    /// in the final allowed minute counts as completed.
    pub fn outcome(&self) -> Option<RunOutcome> {
        if self.calls.is_empty() && self.registry.all_resolved() {
            Some(RunOutcome::Completed)
        } else if self.clock.current >= self.config.end_minute() {
            Some(RunOutcome::TimedOut)
        } else {
            None
        }
    }

    /// Process the current minute and advance the clock.
    pub fn step(&mut self) -> TickRecord {
        let now = self.clock.current;

        // ── 1. inject calls ───────────────────────────────────────────────
        let injected: Vec<_> = self
            .calls
            .drain_due(now)
            .into_iter()
            .map(|call| self.registry.admit_call(call))
            .collect();
        for id in &injected {
            debug!(minute = now.0, emergency = %id, "call received");
        }

        // ── 2–3. snapshot and decide ──────────────────────────────────────
        let snapshot = Snapshot::capture(now, &self.registry, self.calls.len());
        let decisions = self.agent.decide(&snapshot);
        let malformed = self.agent.take_malformed();

        // ── 4. apply in order ─────────────────────────────────────────────
        let mut records: Vec<DecisionRecord> = decisions
            .iter()
            .map(|d| apply_decision(&mut self.registry, &self.router, d))
            .collect();
        records.extend(malformed.into_iter().map(DecisionRecord::malformed));

        for record in &records {
            if record.outcome.is_applied() {
                self.totals.applied += 1;
            } else {
                self.totals.rejected += 1;
                debug!(minute = now.0, issued = ?record.issued, outcome = ?record.outcome, "decision rejected");
            }
            if record.degraded_route {
                self.totals.degraded += 1;
            }
        }

        // ── 5. advance ────────────────────────────────────────────────────
        let events = self.engine.advance(&mut self.registry, now, &mut self.rng);
        debug_assert!(self.registry.bed_ledger_balanced(), "bed ledger out of balance at {now}");

        // ── 6. record ─────────────────────────────────────────────────────
        let interval = self.config.snapshot_interval;
        let with_states = interval > 0 && now.0 % interval == 0;
        let record = TickRecord {
            minute: now,
            injected,
            decisions: records,
            events,
            ambulances: if with_states {
                self.registry.ambulances.iter().map(AmbulanceState::from).collect()
            } else {
                Vec::new()
            },
            emergencies: if with_states { self.touched_emergencies(now) } else { Vec::new() },
            hospitals: if with_states { self.registry.hospitals.clone() } else { Vec::new() },
        };
        debug!(
            minute = now.0,
            applied = record.applied(),
            rejected = record.rejected(),
            events = record.events.len(),
            "minute done"
        );

        // ── 7. tick ───────────────────────────────────────────────────────
        self.clock.advance();
        record
    }

    /// Summary of the run so far, as if it ended now with `outcome`.
    pub fn report(&self, outcome: RunOutcome) -> RunReport {
        RunReport {
            outcome,
            final_minute: self.clock.current,
            unresolved: self.registry.active_emergencies().map(|e| e.id).collect(),
            pending_calls: self.calls.len(),
            decisions_applied: self.totals.applied,
            decisions_rejected: self.totals.rejected,
            degraded_routes: self.totals.degraded,
            overflow_admissions: self.registry.hospitals.iter().map(|h| h.overflow_admissions).sum(),
            stats: WaitTimeStats::from_emergencies(&self.registry.emergencies),
        }
    }

    /// Emergencies active at some point during minute `now`: still open, or
    /// resolved at its end.
    fn touched_emergencies(&self, now: Minute) -> Vec<amb_fleet::Emergency> {
        self.registry
            .emergencies
            .iter()
            .filter(|e| e.resolved_at.is_none_or(|r| r > now))
            .cloned()
            .collect()
    }
}
