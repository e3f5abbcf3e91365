//! Core Kernel - Foundational types for the Vesta marketplace
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Money types with precise decimal arithmetic
//! - Coverage periods and the marketplace timezone
//! - String-backed identifiers for catalog, policy, user and order records
//! - Port error and marker traits for the simulated backend adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate, SALES_TAX};
pub use temporal::{CoveragePeriod, TemporalError, Timezone};
pub use identifiers::{InsuranceId, PolicyId, UserId, OrderId, IdentifierError};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
    SimulatedLatency,
};
