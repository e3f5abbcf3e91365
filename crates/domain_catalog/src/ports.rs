//! Catalog Domain Ports
//!
//! The storefront reads products through [`CatalogPort`]. The backend
//! endpoints (`GET /api/seguros`, `GET /api/seguros/{id}`) do not exist yet,
//! so [`InMemoryCatalog`] answers from the seed catalog after the configured
//! simulated latency.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, InsuranceId, PortError, SimulatedLatency,
};

use crate::fixtures::mock_insurances;
use crate::insurance::Insurance;

/// Source of catalog products
#[async_trait]
pub trait CatalogPort: DomainPort + HealthCheckable {
    /// Lists every product in catalog order
    async fn list_insurances(&self) -> Result<Vec<Insurance>, PortError>;

    /// Retrieves a product by id, or `PortError::NotFound`
    async fn get_insurance(&self, id: &InsuranceId) -> Result<Insurance, PortError>;
}

/// In-memory catalog seeded with fixture products
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    insurances: Arc<RwLock<Vec<Insurance>>>,
    latency: SimulatedLatency,
}

impl InMemoryCatalog {
    /// Creates a catalog holding `insurances`
    pub fn new(insurances: Vec<Insurance>, latency: SimulatedLatency) -> Self {
        Self {
            insurances: Arc::new(RwLock::new(insurances)),
            latency,
        }
    }

    /// Creates a catalog holding the seed products
    pub fn seeded(latency: SimulatedLatency) -> Self {
        Self::new(mock_insurances(), latency)
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::seeded(SimulatedLatency::NONE)
    }
}

impl DomainPort for InMemoryCatalog {}

#[async_trait]
impl HealthCheckable for InMemoryCatalog {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.insurances.read().await.len();
        HealthCheckResult::healthy("in-memory-catalog", format!("{} products loaded", count))
    }
}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    #[instrument(skip(self))]
    async fn list_insurances(&self) -> Result<Vec<Insurance>, PortError> {
        self.latency.pause().await;
        let insurances = self.insurances.read().await;
        debug!(count = insurances.len(), "Listing catalog products");
        Ok(insurances.clone())
    }

    #[instrument(skip(self), fields(insurance_id = %id))]
    async fn get_insurance(&self, id: &InsuranceId) -> Result<Insurance, PortError> {
        self.latency.pause().await;
        self.insurances
            .read()
            .await
            .iter()
            .find(|i| &i.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Insurance", id))
    }
}
