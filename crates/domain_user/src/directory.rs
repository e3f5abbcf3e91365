//! Administrator user directory
//!
//! Search, role filter and summary counts for the admin panel, plus the
//! guarded delete action. Deleting asks for the exact phrase `ELIMINAR` and
//! is refused for the last administrator and for users who still hold
//! active policies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use core_kernel::UserId;

use crate::user::Role;

/// Phrase the administrator must type to confirm a deletion
pub const DELETE_CONFIRMATION: &str = "ELIMINAR";

/// A user as listed in the admin panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub role: Role,
    pub email_confirmed: bool,
    pub created_at: DateTime<Utc>,
    /// Active policies held, refreshed from the policy source
    #[serde(default)]
    pub active_policy_count: usize,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Administrador
    }

    /// Name or email contain `query` (already lowercased), or the mobile contains it verbatim
    fn matches(&self, query_lower: &str, query: &str) -> bool {
        query.is_empty()
            || self.full_name.to_lowercase().contains(query_lower)
            || self.email.to_lowercase().contains(query_lower)
            || self.mobile.contains(query)
    }
}

/// Role dropdown in the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn accepts(&self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => *wanted == role,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoleFilter::All => "Todos",
            RoleFilter::Only(role) => role.label(),
        }
    }
}

/// Search box plus role filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryQuery {
    pub search: String,
    pub role: RoleFilter,
}

impl DirectoryQuery {
    pub fn new(search: impl Into<String>, role: RoleFilter) -> Self {
        Self {
            search: search.into(),
            role,
        }
    }

    /// Matching records in their original order
    pub fn apply<'a>(&self, records: &'a [UserRecord]) -> Vec<&'a UserRecord> {
        let lower = self.search.to_lowercase();
        records
            .iter()
            .filter(|r| r.matches(&lower, &self.search) && self.role.accepts(r.role))
            .collect()
    }
}

/// Summary cards at the top of the admin panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub total: usize,
    pub administrators: usize,
    pub confirmed_emails: usize,
}

impl DirectoryStats {
    pub fn of(records: &[UserRecord]) -> Self {
        Self {
            total: records.len(),
            administrators: records.iter().filter(|r| r.is_admin()).count(),
            confirmed_emails: records.iter().filter(|r| r.email_confirmed).count(),
        }
    }
}

/// Result of a deletion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionOutcome {
    /// The user was removed
    Deleted { user_id: UserId },
    /// Confirmation missing or wrong; nothing changed
    Declined,
    /// No user with that id
    NotFound,
    /// The user is the only remaining administrator
    LastAdministrator,
    /// The user still holds active policies
    HasActivePolicies { count: usize },
}

impl DeletionOutcome {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionOutcome::Deleted { .. })
    }

    /// Message shown to the administrator
    pub fn message(&self) -> String {
        match self {
            DeletionOutcome::Deleted { .. } => "Usuario eliminado correctamente".to_string(),
            DeletionOutcome::Declined => {
                "Texto de confirmación incorrecto. Eliminación cancelada.".to_string()
            }
            DeletionOutcome::NotFound => "Usuario no encontrado".to_string(),
            DeletionOutcome::LastAdministrator => {
                "No se puede eliminar al último administrador del sistema.".to_string()
            }
            DeletionOutcome::HasActivePolicies { count } => format!(
                "No se puede eliminar el usuario porque tiene {} pólizas activas",
                count
            ),
        }
    }
}

/// Prompt shown before deleting `record`
pub fn confirmation_prompt(record: &UserRecord) -> String {
    format!(
        "Esta acción es irreversible.\n\n\
         Vas a eliminar al usuario: {}\n\n\
         Si este usuario tiene pólizas activas, NO podrá ser eliminado.\n\n\
         Para confirmar, escribe exactamente: {}",
        record.full_name, DELETE_CONFIRMATION
    )
}

/// Deletes user `id` from `records` if every guard passes
///
/// Checks run in order: confirmation, existence, last administrator,
/// active policies. Nothing changes unless the outcome is `Deleted`.
pub fn delete_user(
    records: &mut Vec<UserRecord>,
    id: &UserId,
    confirmation: Option<&str>,
) -> DeletionOutcome {
    if confirmation != Some(DELETE_CONFIRMATION) {
        debug!(user_id = %id, "Deletion declined");
        return DeletionOutcome::Declined;
    }

    let Some(position) = records.iter().position(|r| &r.id == id) else {
        return DeletionOutcome::NotFound;
    };

    let record = &records[position];
    if record.is_admin() && records.iter().filter(|r| r.is_admin()).count() == 1 {
        warn!(user_id = %id, "Refused to delete the last administrator");
        return DeletionOutcome::LastAdministrator;
    }
    if record.active_policy_count > 0 {
        warn!(user_id = %id, count = record.active_policy_count, "Refused to delete user with active policies");
        return DeletionOutcome::HasActivePolicies {
            count: record.active_policy_count,
        };
    }

    records.remove(position);
    info!(user_id = %id, "User deleted");
    DeletionOutcome::Deleted { user_id: id.clone() }
}
