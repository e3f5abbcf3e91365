//! Application error handling

use thiserror::Error;

use core_kernel::PortError;
use domain_cart::CartError;
use domain_catalog::CatalogError;
use domain_policy::PolicyError;
use domain_user::UserError;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),

    #[error("Sign in required")]
    NotSignedIn,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl AppError {
    /// Messages to show the user, one per problem
    pub fn messages(&self) -> Vec<String> {
        match self {
            AppError::Cart(CartError::InvalidPayment(problems)) => problems.clone(),
            AppError::User(error) => error.messages(),
            other => vec![other.to_string()],
        }
    }
}
