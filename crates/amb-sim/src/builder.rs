//! Fluent builder for constructing a [`Sim`].

use amb_agent::DispatchAgent;
use amb_core::{DispatchConfig, SimClock, SimConfig, SimRng};
use amb_engine::TransitionEngine;
use amb_fleet::{CallQueue, EmergencyCall, MapInput, RegistryBuilder};
use amb_routing::{RouteProvider, RoutingEstimator};
use serde::{Deserialize, Serialize};

use crate::{Sim, SimResult};

/// A complete scenario: the static map plus the call stream.
///
/// Deserializes from a single JSON object:
///
/// ```json
/// {
///   "ambulances": [{"location": {"lat": 52.5, "lng": 13.4}}],
///   "hospitals":  [{"location": {"lat": 52.52, "lng": 13.41}, "capacity": 10}],
///   "stations":   [],
///   "calls":      [{"call_minute": 3, "location": {"lat": 52.51, "lng": 13.39}}]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub map:   MapInput,
    #[serde(default)]
    pub calls: Vec<EmergencyCall>,
}

/// Fluent builder for [`Sim<A>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: seed, `max_minutes`, …
/// - [`Scenario`] (or a [`MapInput`] plus calls)
/// - `A: DispatchAgent`: the strategy under test
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                   |
/// |----------------------|-------------------------------------------|
/// | `.dispatch(c)`       | `DispatchConfig::default()`               |
/// | `.route_provider(p)` | built from `DispatchConfig::routing`      |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, scenario, NearestAgent::new())
///     .dispatch(dispatch)
///     .build()?;
/// let report = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<A: DispatchAgent> {
    config:   SimConfig,
    dispatch: DispatchConfig,
    scenario: Scenario,
    agent:    A,
    provider: Option<Box<dyn RouteProvider>>,
}

impl<A: DispatchAgent> SimBuilder<A> {
    pub fn new(config: SimConfig, scenario: Scenario, agent: A) -> Self {
        Self { config, dispatch: DispatchConfig::default(), scenario, agent, provider: None }
    }

    pub fn from_parts(config: SimConfig, map: MapInput, calls: Vec<EmergencyCall>, agent: A) -> Self {
        Self::new(config, Scenario { map, calls }, agent)
    }

    pub fn dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Use `provider` for travel estimates instead of the configured method.
    /// Haversine at the configured speed stays the fallback.
    pub fn route_provider(mut self, provider: Box<dyn RouteProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Validate every input and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`][crate::SimError::Config] for an invalid
    ///   `DispatchConfig`.
    /// - [`SimError::Input`][crate::SimError::Input] for bad coordinates,
    ///   capacities, or hospital references in the scenario.
    /// - [`SimError::Routing`][crate::SimError::Routing] when the configured
    ///   routing method cannot be set up.
    pub fn build(self) -> SimResult<Sim<A>> {
        self.dispatch.validate()?;

        let registry = RegistryBuilder::from_map(self.scenario.map).build()?;
        let calls = CallQueue::from_calls(self.scenario.calls, registry.hospitals.len())?;

        let router = match self.provider {
            Some(p) => RoutingEstimator::with_provider(p, self.dispatch.average_speed_kmh),
            None => RoutingEstimator::from_config(&self.dispatch)?,
        };

        Ok(Sim {
            clock:    SimClock::new(self.config.start_unix_secs),
            rng:      SimRng::new(self.config.seed),
            engine:   TransitionEngine::from_config(&self.dispatch),
            config:   self.config,
            dispatch: self.dispatch,
            registry,
            calls,
            agent:    self.agent,
            router,
            totals:   Default::default(),
        })
    }
}
