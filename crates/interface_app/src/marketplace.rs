//! Marketplace service
//!
//! Drives the storefront's actions against the catalog, policy and user
//! ports and keeps the [`Session`] in step with the results. Checkout is
//! the one action that spans every port: the cart becomes an order, a
//! signed-in buyer gets one policy per unit bought, and the directory's
//! active-policy count is refreshed so the deletion guard sees it.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use core_kernel::{HealthCheckResult, InsuranceId, PolicyId, PortError, Timezone, UserId};
use domain_cart::{place_order, CartItem, Order, PaymentDetails};
use domain_catalog::{categories, CatalogFilter, CatalogPort, CategorySelector, InMemoryCatalog, Insurance, Quote};
use domain_policy::fixtures::NEXT_POLICY_SEQUENCE;
use domain_policy::{
    CancellationOutcome, InMemoryPolicies, Policy, PolicyDocument, PolicyEvent, PolicyIssuer,
    PolicyPort, StatusCounts, StatusFilter,
};
use domain_user::{
    DeletionOutcome, DirectoryQuery, DirectoryStats, InMemoryUsers, RegistrationForm, User,
    UserPort, UserRecord,
};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::state::{Session, View};

/// Holder of the seed policies in the in-memory wiring
pub const DEMO_HOLDER: &str = "user-001";

/// What a completed checkout produced
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub order: Order,
    /// Issued policies; empty for a guest checkout
    pub policies: Vec<Policy>,
}

/// The holder's dashboard: the policies under the selected tab plus tab counts
#[derive(Debug, Clone)]
pub struct PolicyOverview {
    pub filter: StatusFilter,
    pub policies: Vec<Policy>,
    pub counts: StatusCounts,
}

/// Admin panel contents
#[derive(Debug, Clone)]
pub struct DirectoryPage {
    pub users: Vec<UserRecord>,
    pub stats: DirectoryStats,
}

/// Storefront actions over the three ports
pub struct Marketplace {
    catalog: Arc<dyn CatalogPort>,
    policies: Arc<dyn PolicyPort>,
    users: Arc<dyn UserPort>,
    issuer: Mutex<PolicyIssuer>,
    timezone: Timezone,
}

impl Marketplace {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        policies: Arc<dyn PolicyPort>,
        users: Arc<dyn UserPort>,
        issuer: PolicyIssuer,
        timezone: Timezone,
    ) -> Self {
        Self {
            catalog,
            policies,
            users,
            issuer: Mutex::new(issuer),
            timezone,
        }
    }

    /// Wires the seeded in-memory adapters with the configured latency
    pub fn in_memory(config: &AppConfig) -> Self {
        let latency = config.latency();
        Self::new(
            Arc::new(InMemoryCatalog::seeded(latency)),
            Arc::new(InMemoryPolicies::seeded(UserId::new(DEMO_HOLDER), latency)),
            Arc::new(InMemoryUsers::seeded(latency)),
            PolicyIssuer::starting_at(NEXT_POLICY_SEQUENCE),
            config.timezone,
        )
    }

    /// Today's date in the marketplace timezone
    pub fn today(&self) -> NaiveDate {
        self.timezone.today()
    }

    /// Products matching the search box and category pill
    pub async fn browse(&self, filter: &CatalogFilter) -> Result<Vec<Insurance>, AppError> {
        let products = self.catalog.list_insurances().await?;
        Ok(filter.apply(&products).into_iter().cloned().collect())
    }

    /// Category pills for the home page
    pub async fn category_choices(&self) -> Result<Vec<CategorySelector>, AppError> {
        Ok(categories(&self.catalog.list_insurances().await?))
    }

    /// Prices `duration` units of a product
    pub async fn quote(&self, id: &InsuranceId, duration: u32) -> Result<Quote, AppError> {
        let product = self.catalog.get_insurance(id).await?;
        Ok(Quote::new(&product, duration)?)
    }

    /// Adds a product to the session's cart
    ///
    /// With a `duration` the line carries a quote for that many units;
    /// without one it is charged at the base price.
    #[instrument(skip(self, session), fields(insurance_id = %id))]
    pub async fn add_to_cart(
        &self,
        session: &mut Session,
        id: &InsuranceId,
        quantity: u32,
        duration: Option<u32>,
    ) -> Result<(), AppError> {
        let product = self.catalog.get_insurance(id).await?;
        let item = match duration {
            Some(units) => {
                let quote = Quote::new(&product, units)?;
                CartItem::from_quote(product, &quote, quantity)
            }
            None => CartItem::new(product, quantity),
        };
        session.cart_mut().add_item(item);
        Ok(())
    }

    /// Signs in and opens the dashboard
    pub async fn sign_in(&self, session: &mut Session, email: &str, password: &str) -> Result<(), AppError> {
        let user = self.users.login(email, password).await?;
        session.sign_in(user);
        Ok(())
    }

    /// Creates an account, signs it in and opens the dashboard
    pub async fn register(&self, session: &mut Session, form: &RegistrationForm) -> Result<(), AppError> {
        form.check()?;
        let user = self.users.register(form).await?;
        session.sign_in(user);
        Ok(())
    }

    /// Pays for the cart
    ///
    /// On success the cart is emptied and the session moves to the
    /// dashboard. On failure nothing changes.
    ///
    /// # Errors
    ///
    /// - [`AppError::Cart`] for an empty cart or rejected card details
    /// - [`AppError::Policy`] if a cart line no longer matches a product
    #[instrument(skip(self, session, payment))]
    pub async fn checkout(
        &self,
        session: &mut Session,
        payment: &PaymentDetails,
    ) -> Result<CheckoutReceipt, AppError> {
        let buyer = session.user().map(|u| u.id.clone());
        let order = place_order(session.cart(), payment, buyer.clone(), self.today())?;

        let policies = match &buyer {
            Some(holder) => {
                let catalog = self.catalog.list_insurances().await?;
                let policies = self.issuer.lock().await.issue_order(&order, &catalog, Utc::now())?;
                self.policies.add_policies(holder, policies.clone()).await?;
                self.refresh_policy_count(holder).await?;
                policies
            }
            None => {
                warn!(order_id = %order.id, "Guest checkout; no policies issued");
                Vec::new()
            }
        };

        session.complete_checkout();
        info!(order_id = %order.id, policies = policies.len(), "Checkout complete");
        Ok(CheckoutReceipt { order, policies })
    }

    /// The signed-in user's policies under `filter`, after expiring lapsed ones
    pub async fn dashboard(&self, session: &Session, filter: StatusFilter) -> Result<PolicyOverview, AppError> {
        let user = signed_in(session)?;
        self.policies.expire_due(self.today()).await?;
        let all = self.policies.fetch_user_policies(&user.id).await?;

        Ok(PolicyOverview {
            filter,
            counts: StatusCounts::of(&all),
            policies: filter.apply(&all).into_iter().cloned().collect(),
        })
    }

    /// Cancels one of the signed-in user's policies
    ///
    /// Policies held by someone else are reported as not found.
    #[instrument(skip(self, session, confirmation), fields(policy_id = %id))]
    pub async fn cancel_policy(
        &self,
        session: &Session,
        id: &PolicyId,
        confirmation: Option<&str>,
    ) -> Result<CancellationOutcome, AppError> {
        let user = signed_in(session)?;
        if !self.holds(&user.id, id).await? {
            return Ok(CancellationOutcome::NotFound);
        }

        let outcome = self.policies.cancel_policy(id, confirmation).await?;
        if outcome.is_confirmed() {
            self.refresh_policy_count(&user.id).await?;
        }
        Ok(outcome)
    }

    /// Certificate for one of the signed-in user's policies
    pub async fn download_policy(&self, session: &Session, id: &PolicyId) -> Result<PolicyDocument, AppError> {
        let user = signed_in(session)?;
        if !self.holds(&user.id, id).await? {
            return Err(PortError::not_found("Policy", id).into());
        }
        Ok(self.policies.download_policy(id).await?)
    }

    /// Admin panel listing with fresh active-policy counts
    #[instrument(skip(self, session))]
    pub async fn directory(&self, session: &Session, query: &DirectoryQuery) -> Result<DirectoryPage, AppError> {
        signed_in_admin(session)?;
        self.policies.expire_due(self.today()).await?;
        for record in self.users.list_users(&DirectoryQuery::default()).await? {
            self.refresh_policy_count(&record.id).await?;
        }

        Ok(DirectoryPage {
            users: self.users.list_users(query).await?,
            stats: self.users.stats().await?,
        })
    }

    /// Deletes a user from the admin panel
    #[instrument(skip(self, session, confirmation), fields(user_id = %id))]
    pub async fn delete_user(
        &self,
        session: &Session,
        id: &UserId,
        confirmation: Option<&str>,
    ) -> Result<DeletionOutcome, AppError> {
        signed_in_admin(session)?;
        self.policies.expire_due(self.today()).await?;
        self.refresh_policy_count(id).await?;
        Ok(self.users.delete_user(id, confirmation).await?)
    }

    /// Policy lifecycle events recorded since the last call
    pub async fn take_policy_events(&self) -> Result<Vec<PolicyEvent>, AppError> {
        Ok(self.policies.take_events().await?)
    }

    /// Health of every adapter
    pub async fn health(&self) -> Vec<HealthCheckResult> {
        vec![
            self.catalog.health_check().await,
            self.policies.health_check().await,
            self.users.health_check().await,
        ]
    }

    async fn holds(&self, holder: &UserId, id: &PolicyId) -> Result<bool, AppError> {
        let held = self.policies.fetch_user_policies(holder).await?;
        Ok(held.iter().any(|p| p.id() == id))
    }

    /// Copies the holder's active-policy count into the directory
    ///
    /// Holders missing from the directory are skipped.
    async fn refresh_policy_count(&self, holder: &UserId) -> Result<(), AppError> {
        let count = self.policies.count_active(holder).await?;
        match self.users.set_active_policy_count(holder, count).await {
            Err(e) if e.is_not_found() => Ok(()),
            other => Ok(other?),
        }
    }
}

fn signed_in(session: &Session) -> Result<&User, AppError> {
    session.user().ok_or(AppError::NotSignedIn)
}

fn signed_in_admin(session: &Session) -> Result<&User, AppError> {
    let user = signed_in(session)?;
    user.require_admin()?;
    Ok(user)
}

/// Where the storefront should land after `error`
pub fn fallback_view(error: &AppError) -> Option<View> {
    match error {
        AppError::NotSignedIn => Some(View::Login),
        AppError::User(domain_user::UserError::AccessDenied(_)) => Some(View::Home),
        _ => None,
    }
}
