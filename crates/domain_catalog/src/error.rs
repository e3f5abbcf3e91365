//! Catalog domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the catalog domain
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product with the given id exists
    #[error("Insurance not found: {0}")]
    InsuranceNotFound(String),

    /// Quotes need at least one duration unit
    #[error("Invalid duration: {0} (must be at least 1)")]
    InvalidDuration(u32),

    /// The catalog source failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl CatalogError {
    /// Creates an InsuranceNotFound error from any id type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        CatalogError::InsuranceNotFound(id.to_string())
    }
}
