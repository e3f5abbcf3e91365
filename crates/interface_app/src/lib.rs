//! Application Layer
//!
//! Everything between the domain crates and a storefront front end:
//!
//! - **Config**: `VESTA_*` environment settings
//! - **Telemetry**: tracing subscriber setup
//! - **State**: views, navigation guards and the session
//! - **Consent**: the cookie banner's stored choice
//! - **Marketplace**: storefront actions over the catalog, policy and user ports
//!
//! # Example
//!
//! ```rust,no_run
//! use interface_app::{AppConfig, Marketplace, Session, View};
//!
//! # async fn run() -> Result<(), interface_app::AppError> {
//! let config = AppConfig::from_env()?;
//! let market = Marketplace::in_memory(&config);
//! let mut session = Session::default();
//!
//! market.sign_in(&mut session, "demo@vesta.com", "demo123").await?;
//! assert_eq!(session.view(), View::Dashboard);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod telemetry;
pub mod state;
pub mod consent;
pub mod marketplace;
pub mod error;

pub use config::{AppConfig, LogFormat};
pub use state::{guard, Session, View};
pub use consent::{CookieConsent, CookiePreferences};
pub use marketplace::{CheckoutReceipt, DirectoryPage, Marketplace, PolicyOverview};
pub use error::AppError;
