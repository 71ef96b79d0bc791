use amb_core::CoreError;
use amb_fleet::FleetError;
use amb_routing::RoutingError;
use thiserror::Error;

/// Failures that prevent a run from starting.
///
/// Nothing inside the minute loop can fail: bad decisions are rejected and
/// routing problems degrade to haversine.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid scenario input: {0}")]
    Input(#[from] FleetError),

    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("routing setup failed: {0}")]
    Routing(#[from] RoutingError),
}

pub type SimResult<T> = Result<T, SimError>;
