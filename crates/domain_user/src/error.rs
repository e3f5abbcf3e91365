//! User domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the user domain
#[derive(Debug, Error)]
pub enum UserError {
    /// Email and password did not match a known account
    #[error("Credenciales inválidas. Usa demo@vesta.com / demo123")]
    InvalidCredentials,

    /// The registration form failed validation
    #[error("Registration rejected: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// An account with this email already exists
    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    /// No user with the given id exists
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The session lacks the role required for the action
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// The user source failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl UserError {
    /// Creates a UserNotFound error from any id type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        UserError::UserNotFound(id.to_string())
    }

    /// Creates a Validation error with a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        UserError::Validation(vec![message.into()])
    }

    /// Creates an AccessDenied error
    pub fn access_denied(message: impl Into<String>) -> Self {
        UserError::AccessDenied(message.into())
    }

    /// Messages to show on the form, one per problem
    pub fn messages(&self) -> Vec<String> {
        match self {
            UserError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}
