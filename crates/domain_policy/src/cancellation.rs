//! Confirmed cancellation
//!
//! Cancelling is irreversible and refunds nothing, so the holder must type
//! an exact confirmation phrase. Anything else (including dismissing the
//! prompt) leaves every policy untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::PolicyId;

use crate::policy::{Policy, PolicyStatus};

/// Phrase the holder must type to confirm a cancellation
pub const CANCEL_CONFIRMATION: &str = "CANCELAR";

/// Why a cancellation was not carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclineReason {
    /// The prompt was closed without an answer
    Dismissed,
    /// The typed text did not match the confirmation phrase
    WrongConfirmation,
}

/// Result of a cancellation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancellationOutcome {
    /// The policy moved from active to cancelled
    Confirmed {
        policy_id: PolicyId,
        policy_number: String,
    },
    /// Confirmation missing or wrong; nothing changed
    Declined(DeclineReason),
    /// No policy with that id
    NotFound,
    /// The policy is already expired or cancelled
    NotCancellable { status: PolicyStatus },
}

impl CancellationOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, CancellationOutcome::Confirmed { .. })
    }

    /// Message shown to the holder, if any
    ///
    /// A dismissed prompt is silent.
    pub fn message(&self) -> Option<String> {
        match self {
            CancellationOutcome::Confirmed { policy_number, .. } => {
                Some(format!("Póliza {} cancelada", policy_number))
            }
            CancellationOutcome::Declined(DeclineReason::Dismissed) => None,
            CancellationOutcome::Declined(DeclineReason::WrongConfirmation) => {
                Some("Texto de confirmación incorrecto. Cancelación abortada.".to_string())
            }
            CancellationOutcome::NotFound => Some("Póliza no encontrada".to_string()),
            CancellationOutcome::NotCancellable { status } => Some(format!(
                "La póliza no se puede cancelar (estado: {})",
                status.label()
            )),
        }
    }
}

/// Checks the typed confirmation against [`CANCEL_CONFIRMATION`]
///
/// The match is exact: no trimming, no case folding.
pub fn check_confirmation(confirmation: Option<&str>) -> Result<(), DeclineReason> {
    match confirmation {
        None => Err(DeclineReason::Dismissed),
        Some(text) if text == CANCEL_CONFIRMATION => Ok(()),
        Some(_) => Err(DeclineReason::WrongConfirmation),
    }
}

/// Prompt shown before cancelling `policy`
pub fn confirmation_prompt(policy: &Policy) -> String {
    format!(
        "Vas a cancelar la póliza: {}\n\n\
         Esta acción es irreversible y no se realizarán reembolsos.\n\n\
         Para confirmar, escribe exactamente: {}",
        policy.policy_number(),
        CANCEL_CONFIRMATION
    )
}

/// Cancels the policy `id` among `policies` if the confirmation matches
///
/// Confirmation is checked before the lookup, so a declined request never
/// reveals whether the id exists. At most one policy changes.
pub fn cancel_policy(
    policies: &mut [Policy],
    id: &PolicyId,
    confirmation: Option<&str>,
    now: DateTime<Utc>,
) -> CancellationOutcome {
    if let Err(reason) = check_confirmation(confirmation) {
        debug!(policy_id = %id, ?reason, "Cancellation declined");
        return CancellationOutcome::Declined(reason);
    }

    let Some(policy) = policies.iter_mut().find(|p| p.id() == id) else {
        return CancellationOutcome::NotFound;
    };

    match policy.cancel(now) {
        Ok(()) => {
            info!(policy_id = %id, policy_number = policy.policy_number(), "Policy cancelled");
            CancellationOutcome::Confirmed {
                policy_id: id.clone(),
                policy_number: policy.policy_number().to_string(),
            }
        }
        Err(_) => CancellationOutcome::NotCancellable {
            status: policy.status(),
        },
    }
}
