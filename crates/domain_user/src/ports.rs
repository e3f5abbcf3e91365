//! User Domain Ports
//!
//! Sign-in, sign-up and the admin directory go through [`UserPort`]. The
//! backend (`/api/auth/*`, `/api/usuarios`) does not exist yet, so
//! [`InMemoryUsers`] serves the seed directory and the mock credential
//! table after the configured simulated latency.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, PortError, SimulatedLatency, UserId,
};

use crate::auth::MockAuthenticator;
use crate::directory::{self, DeletionOutcome, DirectoryQuery, DirectoryStats, UserRecord};
use crate::error::UserError;
use crate::fixtures::mock_users;
use crate::registration::{normalize_mobile, RegistrationForm};
use crate::user::{Role, User};

impl From<UserError> for PortError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::InvalidCredentials => PortError::unauthorized(error.to_string()),
            UserError::Validation(messages) => PortError::validation(messages.join("; ")),
            UserError::DuplicateEmail(_) => PortError::conflict(error.to_string()),
            UserError::UserNotFound(id) => PortError::not_found("User", id),
            UserError::AccessDenied(message) => PortError::unauthorized(message),
            UserError::Port(inner) => inner,
        }
    }
}

/// Source of accounts and the admin directory
#[async_trait]
pub trait UserPort: DomainPort + HealthCheckable {
    /// Signs in; `PortError::Unauthorized` on bad credentials
    async fn login(&self, email: &str, password: &str) -> Result<User, PortError>;

    /// Creates an ordinary account and signs it in
    async fn register(&self, form: &RegistrationForm) -> Result<User, PortError>;

    /// Directory entries matching `query`, in directory order
    async fn list_users(&self, query: &DirectoryQuery) -> Result<Vec<UserRecord>, PortError>;

    /// Retrieves one directory entry, or `PortError::NotFound`
    async fn get_user(&self, id: &UserId) -> Result<UserRecord, PortError>;

    /// Summary counts over the whole directory
    async fn stats(&self) -> Result<DirectoryStats, PortError>;

    /// Records how many active policies a user holds
    async fn set_active_policy_count(&self, id: &UserId, count: usize) -> Result<(), PortError>;

    /// Deletes a user if the confirmation matches and every guard passes
    async fn delete_user(
        &self,
        id: &UserId,
        confirmation: Option<&str>,
    ) -> Result<DeletionOutcome, PortError>;
}

#[derive(Debug)]
struct UserState {
    records: Vec<UserRecord>,
    auth: MockAuthenticator,
}

/// In-memory accounts and directory
#[derive(Debug, Clone)]
pub struct InMemoryUsers {
    state: Arc<RwLock<UserState>>,
    latency: SimulatedLatency,
}

impl InMemoryUsers {
    /// Creates a store with the given directory and credential table
    pub fn new(records: Vec<UserRecord>, auth: MockAuthenticator, latency: SimulatedLatency) -> Self {
        Self {
            state: Arc::new(RwLock::new(UserState { records, auth })),
            latency,
        }
    }

    /// Creates a store with the seed directory and the demo credentials
    pub fn seeded(latency: SimulatedLatency) -> Self {
        Self::new(mock_users(), MockAuthenticator::default(), latency)
    }
}

impl Default for InMemoryUsers {
    fn default() -> Self {
        Self::seeded(SimulatedLatency::NONE)
    }
}

impl DomainPort for InMemoryUsers {}

#[async_trait]
impl HealthCheckable for InMemoryUsers {
    async fn health_check(&self) -> HealthCheckResult {
        let count = self.state.read().await.records.len();
        HealthCheckResult::healthy("in-memory-users", format!("{} users in directory", count))
    }
}

#[async_trait]
impl UserPort for InMemoryUsers {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<User, PortError> {
        self.latency.pause().await;
        let state = self.state.read().await;
        Ok(state.auth.login(email, password, Utc::now())?)
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    async fn register(&self, form: &RegistrationForm) -> Result<User, PortError> {
        self.latency.pause().await;
        let mut state = self.state.write().await;
        let now = Utc::now();
        let user = state.auth.register(form, now)?;

        state.records.push(UserRecord {
            id: user.id.clone(),
            full_name: user.name.clone(),
            email: user.email.clone(),
            mobile: normalize_mobile(&form.mobile).unwrap_or_else(|| form.mobile.clone()),
            role: Role::Usuario,
            email_confirmed: false,
            created_at: now,
            active_policy_count: 0,
        });
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn list_users(&self, query: &DirectoryQuery) -> Result<Vec<UserRecord>, PortError> {
        self.latency.pause().await;
        let state = self.state.read().await;
        let users: Vec<UserRecord> = query.apply(&state.records).into_iter().cloned().collect();
        debug!(count = users.len(), "Listed directory users");
        Ok(users)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get_user(&self, id: &UserId) -> Result<UserRecord, PortError> {
        self.latency.pause().await;
        self.state
            .read()
            .await
            .records
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn stats(&self) -> Result<DirectoryStats, PortError> {
        self.latency.pause().await;
        Ok(DirectoryStats::of(&self.state.read().await.records))
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn set_active_policy_count(&self, id: &UserId, count: usize) -> Result<(), PortError> {
        let mut state = self.state.write().await;
        let record = state
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| PortError::not_found("User", id))?;
        record.active_policy_count = count;
        Ok(())
    }

    #[instrument(skip(self, confirmation), fields(user_id = %id))]
    async fn delete_user(
        &self,
        id: &UserId,
        confirmation: Option<&str>,
    ) -> Result<DeletionOutcome, PortError> {
        self.latency.pause().await;
        let mut state = self.state.write().await;
        let outcome = directory::delete_user(&mut state.records, id, confirmation);
        if outcome.is_deleted() {
            state.auth.remove(id);
        }
        Ok(outcome)
    }
}
