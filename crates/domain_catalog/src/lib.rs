//! Product Catalog Domain
//!
//! This crate owns the insurance products offered on the marketplace and
//! the read-side logic the storefront needs:
//!
//! - **Insurance**: the immutable product record
//! - **Filtering**: free-text search combined with a category selector
//! - **Quotes**: pricing a product for a chosen number of duration units
//! - **Ports**: the async catalog source, served in memory for now
//!
//! # Example
//!
//! ```rust
//! use domain_catalog::{fixtures, CatalogFilter, CategorySelector};
//!
//! let products = fixtures::mock_insurances();
//! let travel = CatalogFilter::new("equipaje", CategorySelector::category("Viaje"))
//!     .apply(&products);
//!
//! assert_eq!(travel.len(), 2);
//! ```

pub mod insurance;
pub mod filter;
pub mod quote;
pub mod fixtures;
pub mod ports;
pub mod error;

pub use insurance::{Insurance, DurationUnit, ProductIcon};
pub use filter::{CatalogFilter, CategorySelector, categories, find_by_id};
pub use quote::{Quote, CustomOptions};
pub use ports::{CatalogPort, InMemoryCatalog};
pub use error::CatalogError;
