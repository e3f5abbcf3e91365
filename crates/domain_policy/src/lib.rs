//! Policy Lifecycle Domain
//!
//! This crate tracks the policies a holder has bought and the few things
//! that can happen to them afterwards.
//!
//! - **Policy**: the purchased coverage record and its status
//! - **Cancellation**: the confirmed, irreversible cancel action
//! - **Portfolio**: dashboard tabs and the expiry sweep
//! - **Issuance**: turning a placed order into numbered policies
//! - **Events**: issued, cancelled and expired records
//! - **Ports**: the async policy source, served in memory for now
//!
//! # Policy Lifecycle
//!
//! ```text
//! Active -> Cancelled
//!        \-> Expired
//! ```
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use domain_policy::{cancel_policy, fixtures::mock_policies, CancellationOutcome, PolicyStatus};
//!
//! let mut policies = mock_policies();
//! let id = policies[0].id().clone();
//!
//! let outcome = cancel_policy(&mut policies, &id, Some("CANCELAR"), Utc::now());
//!
//! assert!(outcome.is_confirmed());
//! assert_eq!(policies[0].status(), PolicyStatus::Cancelled);
//! ```

pub mod policy;
pub mod cancellation;
pub mod portfolio;
pub mod issuance;
pub mod events;
pub mod fixtures;
pub mod ports;
pub mod error;

pub use policy::{Policy, PolicyBuilder, PolicyStatus};
pub use cancellation::{cancel_policy, CancellationOutcome, DeclineReason, CANCEL_CONFIRMATION};
pub use portfolio::{expire_due, StatusCounts, StatusFilter};
pub use issuance::PolicyIssuer;
pub use events::PolicyEvent;
pub use ports::{InMemoryPolicies, PolicyDocument, PolicyPort};
pub use error::PolicyError;
