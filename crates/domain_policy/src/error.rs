//! Policy domain errors
//!
//! User-driven declines of a cancellation are not errors; they are reported
//! through [`crate::CancellationOutcome`]. These errors cover broken
//! invariants and failures of the policy source.

use thiserror::Error;

use core_kernel::{PortError, TemporalError};

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Invalid state transition attempted
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition {
        from: String,
        to: String,
    },

    /// No policy with the given id exists
    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    /// Coverage dates could not be computed
    #[error(transparent)]
    Temporal(#[from] TemporalError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The policy source failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Validation(message.into())
    }

    /// Creates a PolicyNotFound error from any id type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        PolicyError::PolicyNotFound(id.to_string())
    }

    /// Creates an InvalidStateTransition error
    pub fn transition(from: impl std::fmt::Display, to: impl std::fmt::Display) -> Self {
        PolicyError::InvalidStateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
