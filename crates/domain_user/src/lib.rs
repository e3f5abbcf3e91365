//! User Domain
//!
//! Accounts, sessions and the administrator's view of them:
//!
//! - **User**: the signed-in session user and its role
//! - **Registration**: sign-up form rules
//! - **Auth**: mock sign-in against a fixed credential table
//! - **Directory**: admin search, role filter, stats and guarded deletion
//! - **Ports**: the async account source, served in memory for now
//!
//! # Example
//!
//! ```rust
//! use domain_user::{delete_user, fixtures::mock_users, DeletionOutcome};
//! use core_kernel::UserId;
//!
//! let mut users = mock_users();
//! let admin = UserId::new("user-002");
//!
//! let outcome = delete_user(&mut users, &admin, Some("ELIMINAR"));
//!
//! assert_eq!(outcome, DeletionOutcome::LastAdministrator);
//! assert_eq!(users.len(), 4);
//! ```

pub mod user;
pub mod registration;
pub mod auth;
pub mod directory;
pub mod fixtures;
pub mod ports;
pub mod error;

pub use user::{Role, User};
pub use registration::{is_spanish_mobile, RegistrationForm};
pub use auth::{MockAuthenticator, DEMO_EMAIL, DEMO_PASSWORD};
pub use directory::{
    delete_user, DeletionOutcome, DirectoryQuery, DirectoryStats, RoleFilter, UserRecord,
    DELETE_CONFIRMATION,
};
pub use ports::{InMemoryUsers, UserPort};
pub use error::UserError;
