//! Policy Domain Ports
//!
//! The dashboard talks to the policy backend through [`PolicyPort`]. Until
//! `GET /api/polizas/usuario/{id}`, `PUT /api/polizas/{id}/cancelar` and
//! `GET /api/polizas/{id}/descargar` exist, [`InMemoryPolicies`] keeps each
//! holder's policies in memory and waits the configured simulated latency
//! before answering.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, PolicyId, PortError, SimulatedLatency, UserId,
};

use crate::cancellation::{self, CancellationOutcome};
use crate::events::PolicyEvent;
use crate::fixtures::mock_policies;
use crate::policy::Policy;
use crate::portfolio;

/// Downloadable rendering of a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDocument {
    pub policy_id: PolicyId,
    pub file_name: String,
    pub content: String,
}

impl PolicyDocument {
    /// Renders a plain-text certificate for `policy`
    pub fn render(policy: &Policy) -> Self {
        let mut content = format!(
            "VESTA - Certificado de póliza\n\
             Póliza No. {}\n\
             Seguro: {} ({})\n\
             Estado: {}\n\
             Vigencia: {} a {} ({})\n\
             Precio: {}\n\
             Coberturas:\n",
            policy.policy_number(),
            policy.insurance_name(),
            policy.category(),
            policy.status().label(),
            policy.start_date().format("%d/%m/%Y"),
            policy.end_date().format("%d/%m/%Y"),
            policy.duration(),
            policy.price().round_to_currency(),
        );
        for item in policy.coverage() {
            content.push_str("  - ");
            content.push_str(item);
            content.push('\n');
        }

        Self {
            policy_id: policy.id().clone(),
            file_name: format!("poliza-{}.txt", policy.policy_number()),
            content,
        }
    }
}

/// Source of the holder's policies
#[async_trait]
pub trait PolicyPort: DomainPort + HealthCheckable {
    /// Lists the policies held by `user_id`; unknown holders have none
    async fn fetch_user_policies(&self, user_id: &UserId) -> Result<Vec<Policy>, PortError>;

    /// Cancels a policy if `confirmation` matches the required phrase
    async fn cancel_policy(
        &self,
        policy_id: &PolicyId,
        confirmation: Option<&str>,
    ) -> Result<CancellationOutcome, PortError>;

    /// Produces the downloadable certificate, or `PortError::NotFound`
    async fn download_policy(&self, policy_id: &PolicyId) -> Result<PolicyDocument, PortError>;

    /// Stores newly issued policies for `user_id`
    async fn add_policies(&self, user_id: &UserId, policies: Vec<Policy>) -> Result<(), PortError>;

    /// Expires every policy past its end date; returns the ids that changed
    async fn expire_due(&self, today: NaiveDate) -> Result<Vec<PolicyId>, PortError>;

    /// Number of active policies held by `user_id`
    async fn count_active(&self, user_id: &UserId) -> Result<usize, PortError>;

    /// Drains the events recorded since the last call
    async fn take_events(&self) -> Result<Vec<PolicyEvent>, PortError>;
}

#[derive(Debug, Default)]
struct PolicyStore {
    by_holder: HashMap<UserId, Vec<Policy>>,
    events: Vec<PolicyEvent>,
}

impl PolicyStore {
    fn collect_events(&mut self) {
        let drained: Vec<PolicyEvent> = self
            .by_holder
            .values_mut()
            .flat_map(|policies| policies.iter_mut())
            .flat_map(Policy::take_events)
            .collect();
        self.events.extend(drained);
    }

    fn find(&self, id: &PolicyId) -> Option<&Policy> {
        self.by_holder
            .values()
            .flat_map(|policies| policies.iter())
            .find(|p| p.id() == id)
    }
}

/// In-memory policy store keyed by holder
#[derive(Debug, Clone)]
pub struct InMemoryPolicies {
    store: Arc<RwLock<PolicyStore>>,
    latency: SimulatedLatency,
}

impl InMemoryPolicies {
    /// Creates an empty store
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            store: Arc::new(RwLock::new(PolicyStore::default())),
            latency,
        }
    }

    /// Creates a store where `holder` owns the seed policies
    pub fn seeded(holder: UserId, latency: SimulatedLatency) -> Self {
        let mut store = PolicyStore::default();
        store.by_holder.insert(holder, mock_policies());
        Self {
            store: Arc::new(RwLock::new(store)),
            latency,
        }
    }
}

impl DomainPort for InMemoryPolicies {}

#[async_trait]
impl HealthCheckable for InMemoryPolicies {
    async fn health_check(&self) -> HealthCheckResult {
        let store = self.store.read().await;
        let count: usize = store.by_holder.values().map(Vec::len).sum();
        HealthCheckResult::healthy(
            "in-memory-policies",
            format!("{} policies across {} holders", count, store.by_holder.len()),
        )
    }
}

#[async_trait]
impl PolicyPort for InMemoryPolicies {
    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn fetch_user_policies(&self, user_id: &UserId) -> Result<Vec<Policy>, PortError> {
        self.latency.pause().await;
        let store = self.store.read().await;
        let policies = store.by_holder.get(user_id).cloned().unwrap_or_default();
        debug!(count = policies.len(), "Fetched holder policies");
        Ok(policies)
    }

    #[instrument(skip(self, confirmation), fields(policy_id = %policy_id))]
    async fn cancel_policy(
        &self,
        policy_id: &PolicyId,
        confirmation: Option<&str>,
    ) -> Result<CancellationOutcome, PortError> {
        self.latency.pause().await;
        let mut store = self.store.write().await;
        let now = Utc::now();

        // Confirmation is checked once, before looking in any holder's list.
        if let Err(reason) = cancellation::check_confirmation(confirmation) {
            return Ok(CancellationOutcome::Declined(reason));
        }
        let holder = store
            .by_holder
            .iter()
            .find(|(_, policies)| policies.iter().any(|p| p.id() == policy_id))
            .map(|(holder, _)| holder.clone());

        let outcome = match holder.and_then(|h| store.by_holder.get_mut(&h)) {
            Some(policies) => cancellation::cancel_policy(policies, policy_id, confirmation, now),
            None => CancellationOutcome::NotFound,
        };
        store.collect_events();
        Ok(outcome)
    }

    #[instrument(skip(self), fields(policy_id = %policy_id))]
    async fn download_policy(&self, policy_id: &PolicyId) -> Result<PolicyDocument, PortError> {
        self.latency.pause().await;
        let store = self.store.read().await;
        let policy = store
            .find(policy_id)
            .ok_or_else(|| PortError::not_found("Policy", policy_id))?;
        info!(policy_number = policy.policy_number(), "Rendering policy document");
        Ok(PolicyDocument::render(policy))
    }

    #[instrument(skip(self, policies), fields(user_id = %user_id, count = policies.len()))]
    async fn add_policies(&self, user_id: &UserId, policies: Vec<Policy>) -> Result<(), PortError> {
        self.latency.pause().await;
        let mut store = self.store.write().await;
        store.by_holder.entry(user_id.clone()).or_default().extend(policies);
        store.collect_events();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn expire_due(&self, today: NaiveDate) -> Result<Vec<PolicyId>, PortError> {
        self.latency.pause().await;
        let mut store = self.store.write().await;
        let now = Utc::now();
        let expired: Vec<PolicyId> = store
            .by_holder
            .values_mut()
            .flat_map(|policies| portfolio::expire_due(policies, today, now))
            .collect();
        store.collect_events();
        Ok(expired)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn count_active(&self, user_id: &UserId) -> Result<usize, PortError> {
        self.latency.pause().await;
        let store = self.store.read().await;
        Ok(store
            .by_holder
            .get(user_id)
            .map(|policies| policies.iter().filter(|p| p.is_active()).count())
            .unwrap_or(0))
    }

    async fn take_events(&self) -> Result<Vec<PolicyEvent>, PortError> {
        let mut store = self.store.write().await;
        Ok(std::mem::take(&mut store.events))
    }
}
