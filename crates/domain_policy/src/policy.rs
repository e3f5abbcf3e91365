//! Policy entity
//!
//! A policy is the record of a purchased, time-bounded coverage. Its status
//! graph is deliberately small:
//!
//! ```text
//! Active -> Cancelled   (holder confirms cancellation)
//!        \-> Expired    (end date has passed)
//! ```
//!
//! Both `Cancelled` and `Expired` are terminal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CoveragePeriod, InsuranceId, Money, PolicyId};

use crate::error::PolicyError;
use crate::events::PolicyEvent;

/// Lifecycle status of a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Expired,
    Cancelled,
}

impl PolicyStatus {
    /// Returns true for statuses no transition leaves
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PolicyStatus::Active)
    }

    /// Badge text shown on the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Activa",
            PolicyStatus::Expired => "Vencida",
            PolicyStatus::Cancelled => "Cancelada",
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyStatus::Active => "active",
            PolicyStatus::Expired => "expired",
            PolicyStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A purchased insurance policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    id: PolicyId,
    insurance_id: InsuranceId,
    insurance_name: String,
    category: String,
    status: PolicyStatus,
    period: CoveragePeriod,
    /// Amount paid, tax included
    price: Money,
    /// "7 días", "1 mes", ...
    duration: String,
    image_url: String,
    policy_number: String,
    coverage: Vec<String>,
    #[serde(skip)]
    events: Vec<PolicyEvent>,
}

impl Policy {
    pub fn id(&self) -> &PolicyId {
        &self.id
    }

    pub fn insurance_id(&self) -> &InsuranceId {
        &self.insurance_id
    }

    pub fn insurance_name(&self) -> &str {
        &self.insurance_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> PolicyStatus {
        self.status
    }

    pub fn period(&self) -> CoveragePeriod {
        self.period
    }

    pub fn start_date(&self) -> NaiveDate {
        self.period.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.period.end
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Duration label as printed on the policy
    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Human-readable number, `VES-<year>-<seq>-<suffix>`
    pub fn policy_number(&self) -> &str {
        &self.policy_number
    }

    pub fn coverage(&self) -> &[String] {
        &self.coverage
    }

    pub fn is_active(&self) -> bool {
        self.status == PolicyStatus::Active
    }

    /// Returns true when the holder may still cancel
    pub fn is_cancellable(&self) -> bool {
        self.is_active()
    }

    /// Returns true if the policy is active and its end date is before `today`
    pub fn is_due_to_expire(&self, today: NaiveDate) -> bool {
        self.is_active() && self.period.has_ended(today)
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<PolicyEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cancels an active policy
    ///
    /// No refund is computed. Confirmation is checked by the caller; see
    /// [`crate::cancellation`].
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidStateTransition`] if the policy is not active.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), PolicyError> {
        self.transition(PolicyStatus::Cancelled)?;
        self.events.push(PolicyEvent::PolicyCancelled {
            policy_id: self.id.clone(),
            policy_number: self.policy_number.clone(),
            timestamp: now,
        });
        Ok(())
    }

    /// Marks an active policy as expired
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidStateTransition`] if the policy is not active.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Result<(), PolicyError> {
        self.transition(PolicyStatus::Expired)?;
        self.events.push(PolicyEvent::PolicyExpired {
            policy_id: self.id.clone(),
            expiry_date: self.period.end,
            timestamp: now,
        });
        Ok(())
    }

    fn transition(&mut self, to: PolicyStatus) -> Result<(), PolicyError> {
        if self.status.is_terminal() {
            return Err(PolicyError::transition(self.status, to));
        }
        self.status = to;
        Ok(())
    }
}

/// Builder for [`Policy`]
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use core_kernel::{CoveragePeriod, Currency, Money};
/// use domain_policy::PolicyBuilder;
/// use rust_decimal_macros::dec;
///
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let policy = PolicyBuilder::new()
///     .insurance("ins-002", "Seguro de Dispositivos", "Tecnología")
///     .period(CoveragePeriod::for_months(start, 1).unwrap())
///     .price(Money::new(dec!(11.59), Currency::USD))
///     .policy_number("VES-2025-002-4521")
///     .build()
///     .unwrap();
///
/// assert!(policy.is_active());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    id: Option<PolicyId>,
    insurance_id: Option<InsuranceId>,
    insurance_name: String,
    category: String,
    status: Option<PolicyStatus>,
    period: Option<CoveragePeriod>,
    price: Option<Money>,
    duration: String,
    image_url: String,
    policy_number: Option<String>,
    coverage: Vec<String>,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a fixed id; otherwise one is generated
    pub fn id(mut self, id: impl Into<PolicyId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the product the policy was bought from
    pub fn insurance(
        mut self,
        id: impl Into<InsuranceId>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        self.insurance_id = Some(id.into());
        self.insurance_name = name.into();
        self.category = category.into();
        self
    }

    /// Sets the initial status, `Active` by default
    pub fn status(mut self, status: PolicyStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn period(mut self, period: CoveragePeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn duration(mut self, label: impl Into<String>) -> Self {
        self.duration = label.into();
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    pub fn policy_number(mut self, number: impl Into<String>) -> Self {
        self.policy_number = Some(number.into());
        self
    }

    pub fn coverage(mut self, coverage: Vec<String>) -> Self {
        self.coverage = coverage;
        self
    }

    /// Builds the policy without recording any event
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Validation`] if the product, period, price or
    /// policy number is missing.
    pub fn build(self) -> Result<Policy, PolicyError> {
        let insurance_id = self
            .insurance_id
            .ok_or_else(|| PolicyError::validation("insurance is required"))?;
        let period = self
            .period
            .ok_or_else(|| PolicyError::validation("coverage period is required"))?;
        let price = self
            .price
            .ok_or_else(|| PolicyError::validation("price is required"))?;
        let policy_number = self
            .policy_number
            .ok_or_else(|| PolicyError::validation("policy number is required"))?;

        Ok(Policy {
            id: self.id.unwrap_or_else(PolicyId::generate_v7),
            insurance_id,
            insurance_name: self.insurance_name,
            category: self.category,
            status: self.status.unwrap_or(PolicyStatus::Active),
            period,
            price,
            duration: self.duration,
            image_url: self.image_url,
            policy_number,
            coverage: self.coverage,
            events: Vec::new(),
        })
    }

    /// Builds an active policy and records its issuance
    ///
    /// # Errors
    ///
    /// Same as [`PolicyBuilder::build`].
    pub fn issue(self, now: DateTime<Utc>) -> Result<Policy, PolicyError> {
        let mut policy = self.status(PolicyStatus::Active).build()?;
        policy.events.push(PolicyEvent::PolicyIssued {
            policy_id: policy.id.clone(),
            policy_number: policy.policy_number.clone(),
            insurance_id: policy.insurance_id.clone(),
            start_date: policy.period.start,
            end_date: policy.period.end,
            timestamp: now,
        });
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active_policy() -> Policy {
        PolicyBuilder::new()
            .id("pol-100")
            .insurance("ins-001", "Seguro de Viaje", "Viaje")
            .period(CoveragePeriod::for_days(date(2025, 1, 15), 7).unwrap())
            .price(Money::new(dec!(111.84), Currency::USD))
            .policy_number("VES-2025-100-0001")
            .build()
            .unwrap()
    }

    #[test]
    fn test_cancel_active_policy() {
        let mut policy = active_policy();
        policy.cancel(Utc::now()).unwrap();

        assert_eq!(policy.status(), PolicyStatus::Cancelled);
        let events = policy.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "PolicyCancelled");
        assert!(policy.take_events().is_empty());
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut policy = active_policy();
        policy.expire(Utc::now()).unwrap();

        assert!(matches!(
            policy.cancel(Utc::now()),
            Err(PolicyError::InvalidStateTransition { .. })
        ));
        assert!(policy.expire(Utc::now()).is_err());
        assert_eq!(policy.status(), PolicyStatus::Expired);
    }

    #[test]
    fn test_due_to_expire_after_end_date() {
        let policy = active_policy();
        assert!(!policy.is_due_to_expire(date(2025, 1, 22)));
        assert!(policy.is_due_to_expire(date(2025, 1, 23)));
    }

    #[test]
    fn test_builder_requires_policy_number() {
        let result = PolicyBuilder::new()
            .insurance("ins-001", "Seguro de Viaje", "Viaje")
            .period(CoveragePeriod::for_days(date(2025, 1, 15), 7).unwrap())
            .price(Money::new(dec!(10), Currency::USD))
            .build();
        assert!(matches!(result, Err(PolicyError::Validation(_))));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PolicyStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }
}
