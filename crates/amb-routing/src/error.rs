//! Routing error type.

use thiserror::Error;

/// Errors produced by route providers.
///
/// None of these abort a run: the estimator falls back to haversine and marks
/// the estimate as degraded.  Only [`RoutingError::Unavailable`] surfaces at
/// build time, when the configured method cannot be constructed at all.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no route found")]
    NoRoute,

    #[error("routing service answered with status {0}")]
    Status(String),

    #[error("invalid routing response: {0}")]
    InvalidResponse(String),

    #[error("routing method unavailable: {0}")]
    Unavailable(String),

    #[cfg(feature = "osrm")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
