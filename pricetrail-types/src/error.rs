use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the pricetrail workspace.
///
/// The reconciliation core itself only fails while decoding persisted data;
/// the remaining variants describe collaborator failures surfaced by the
/// orchestrator.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PricetrailError {
    /// Persisted data could not be decoded (bad key, bad date, malformed series).
    #[error("decode error: {0}")]
    Decode(String),

    /// In-memory data cannot be expressed in the requested wire encoding.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Two snapshots of one source share a collection date and the policy rejects that.
    #[error("duplicate collection date {date} for source {name}")]
    DuplicateDate {
        /// Source identifier.
        name: String,
        /// The colliding date, formatted as `YYYY-MM-DD`.
        date: String,
    },

    /// A snapshot source or store returned an error.
    #[error("{name} failed: {msg}")]
    Source {
        /// Source (or store) name that failed.
        name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A source or resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "snapshots for sok".
        what: String,
    },

    /// A single store call exceeded the configured timeout.
    #[error("store timed out while loading {name}")]
    StoreTimeout {
        /// Source whose snapshots were being loaded.
        name: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Operation label for which the request timed out (e.g. "reconcile_all").
        capability: String,
    },

    /// Every attempted source failed; contains the individual failures.
    #[error("all sources failed: {0:?}")]
    AllSourcesFailed(Vec<PricetrailError>),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl PricetrailError {
    /// Helper: build a `Decode` error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Helper: build a `Source` error with the source name and message.
    pub fn source_failure(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            name: name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `StoreTimeout` error.
    pub fn store_timeout(name: impl Into<String>) -> Self {
        Self::StoreTimeout {
            name: name.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// A missing source is benign; aggregates are classified by their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::NotFound { .. } => false,
            Self::AllSourcesFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllSourcesFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllSourcesFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, PricetrailError>;
