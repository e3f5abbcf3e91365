//! Session user and roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::UserId;

use crate::error::UserError;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Administrador,
    Usuario,
}

impl Role {
    /// Wire name, as sent by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrador => "ADMINISTRADOR",
            Role::Usuario => "USUARIO",
        }
    }

    /// Label shown in the admin panel
    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrador => "Administrador",
            Role::Usuario => "Usuario",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMINISTRADOR" => Ok(Role::Administrador),
            "USUARIO" => Ok(Role::Usuario),
            other => Err(UserError::invalid(format!("unknown role: {}", other))),
        }
    }
}

/// The signed-in user held in session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    /// Bearer token for backend calls
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl User {
    /// Returns true if the session may open the admin panel
    ///
    /// A missing role is treated as an ordinary user.
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Administrador)
    }

    /// Fails with [`UserError::AccessDenied`] unless the user is an administrator
    pub fn require_admin(&self) -> Result<(), UserError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(UserError::access_denied(
                "Solo los administradores pueden ver el panel de gestión",
            ))
        }
    }
}
