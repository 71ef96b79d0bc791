use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a wire-format decision could not be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("decision must be a JSON array")]
    NotAnArray,

    #[error("decision array is empty")]
    Empty,

    #[error("unknown decision kind {0:?}")]
    UnknownKind(String),

    #[error("{kind} takes {expected} elements, got {found}")]
    Arity {
        kind:     &'static str,
        expected: usize,
        found:    usize,
    },

    #[error("{kind}: element {position} is not a valid id")]
    BadId {
        kind:     &'static str,
        position: usize,
    },

    #[error("{kind}: element {position} is not a number")]
    BadCoordinate {
        kind:     &'static str,
        position: usize,
    },

    #[error("agent reply must be a JSON array of decisions")]
    BadBatch,
}

pub type DecodeResult<T> = Result<T, DecodeError>;

/// A wire entry that failed to decode, kept for the event log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MalformedDecision {
    /// The offending entry as compact JSON.
    pub raw:    String,
    pub reason: String,
}

impl MalformedDecision {
    pub fn new(raw: &serde_json::Value, error: &DecodeError) -> Self {
        Self { raw: raw.to_string(), reason: error.to_string() }
    }
}
