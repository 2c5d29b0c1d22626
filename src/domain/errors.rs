//! Error kinds surfaced by the domain services.
//!
//! Nothing in this crate panics across a service boundary: every failure is
//! one of these kinds, and the presentation envelope (`crate::response`)
//! reports the kind alongside the message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Input rejected before any write reached storage.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced member or payment does not exist; no partial effect.
    #[error("not found: {0}")]
    NotFound(String),

    /// The second step of a two-step logical transaction failed after the
    /// first succeeded (e.g. payment recorded but member update failed).
    /// The data now needs manual reconciliation, so this is reported
    /// distinctly from ordinary failure.
    #[error("inconsistent state: {0}")]
    InconsistentState(String),

    /// The underlying store failed. Propagated with the original message and
    /// never retried automatically (inserts are not idempotent).
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    /// Stable machine-readable kind for the presentation envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation",
            DomainError::NotFound(_) => "not_found",
            DomainError::InconsistentState(_) => "inconsistent_state",
            DomainError::Storage(_) => "storage",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
