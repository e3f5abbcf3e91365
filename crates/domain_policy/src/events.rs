//! Domain events for the policy lifecycle
//!
//! Every state change of a [`crate::Policy`] is recorded as an event and
//! kept on the policy until drained with `take_events`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{InsuranceId, PolicyId};

/// Domain events emitted by a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyEvent {
    /// A policy was created from a purchase
    PolicyIssued {
        policy_id: PolicyId,
        policy_number: String,
        insurance_id: InsuranceId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },

    /// The holder cancelled an active policy
    PolicyCancelled {
        policy_id: PolicyId,
        policy_number: String,
        timestamp: DateTime<Utc>,
    },

    /// An active policy ran past its end date
    PolicyExpired {
        policy_id: PolicyId,
        expiry_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
}

impl PolicyEvent {
    /// Returns the policy ID associated with this event
    pub fn policy_id(&self) -> &PolicyId {
        match self {
            PolicyEvent::PolicyIssued { policy_id, .. } => policy_id,
            PolicyEvent::PolicyCancelled { policy_id, .. } => policy_id,
            PolicyEvent::PolicyExpired { policy_id, .. } => policy_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            PolicyEvent::PolicyIssued { timestamp, .. } => *timestamp,
            PolicyEvent::PolicyCancelled { timestamp, .. } => *timestamp,
            PolicyEvent::PolicyExpired { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            PolicyEvent::PolicyIssued { .. } => "PolicyIssued",
            PolicyEvent::PolicyCancelled { .. } => "PolicyCancelled",
            PolicyEvent::PolicyExpired { .. } => "PolicyExpired",
        }
    }
}
