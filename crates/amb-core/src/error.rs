//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where configuration problems can surface.

use thiserror::Error;

/// Errors raised while validating configuration and input values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("coordinates ({lat}, {lng}) are outside the WGS-84 range")]
    InvalidCoordinates { lat: f64, lng: f64 },
}

/// Shorthand result type for `amb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
