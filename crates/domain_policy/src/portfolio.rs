//! The holder's policy list: status tabs and the expiry sweep

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::PolicyId;

use crate::policy::{Policy, PolicyStatus};

/// Dashboard tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    /// Expired or cancelled
    Inactive,
}

impl StatusFilter {
    pub fn accepts(&self, status: PolicyStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == PolicyStatus::Active,
            StatusFilter::Inactive => status.is_terminal(),
        }
    }

    /// Policies shown under this tab, in their original order
    pub fn apply<'a>(&self, policies: &'a [Policy]) -> Vec<&'a Policy> {
        policies.iter().filter(|p| self.accepts(p.status())).collect()
    }

    /// Tab title
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "Todas",
            StatusFilter::Active => "Activas",
            StatusFilter::Inactive => "Inactivas",
        }
    }
}

/// Number of policies under each tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub all: usize,
    pub active: usize,
    pub inactive: usize,
}

impl StatusCounts {
    pub fn of(policies: &[Policy]) -> Self {
        let active = policies.iter().filter(|p| p.is_active()).count();
        Self {
            all: policies.len(),
            active,
            inactive: policies.len() - active,
        }
    }

    pub fn for_filter(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Active => self.active,
            StatusFilter::Inactive => self.inactive,
        }
    }
}

/// Expires every active policy whose end date is before `today`
///
/// Cancelled and already expired policies are left alone. Returns the ids
/// that changed.
pub fn expire_due(policies: &mut [Policy], today: NaiveDate, now: DateTime<Utc>) -> Vec<PolicyId> {
    let mut expired = Vec::new();
    for policy in policies.iter_mut().filter(|p| p.is_due_to_expire(today)) {
        if policy.expire(now).is_ok() {
            expired.push(policy.id().clone());
        }
    }
    if !expired.is_empty() {
        info!(count = expired.len(), %today, "Expired policies past their end date");
    }
    expired
}
