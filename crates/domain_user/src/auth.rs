//! Mock authentication
//!
//! Until `POST /api/auth/login` exists, sign-in checks a fixed credential
//! table and issues a placeholder token `mock-jwt-token-<millis>`.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use core_kernel::UserId;

use crate::error::UserError;
use crate::registration::RegistrationForm;
use crate::user::{Role, User};

/// Email of the demo account
pub const DEMO_EMAIL: &str = "demo@vesta.com";

/// Password of the demo account
pub const DEMO_PASSWORD: &str = "demo123";

const TOKEN_PREFIX: &str = "mock-jwt-token-";

/// A known account
#[derive(Debug, Clone)]
struct Account {
    id: UserId,
    email: String,
    password: String,
    name: String,
    role: Role,
}

/// Fixed-table authenticator standing in for the auth backend
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    accounts: Vec<Account>,
}

impl Default for MockAuthenticator {
    /// The demo user plus the seed administrator
    fn default() -> Self {
        Self::empty()
            .with_account("user-001", DEMO_EMAIL, DEMO_PASSWORD, "Usuario Demo", Role::Usuario)
            .with_account(
                "user-002",
                "admin@vesta.com",
                "admin123",
                "Admin Vesta",
                Role::Administrador,
            )
    }
}

impl MockAuthenticator {
    /// An authenticator that accepts nobody
    pub fn empty() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    /// Adds an account to the credential table
    pub fn with_account(
        mut self,
        id: &str,
        email: &str,
        password: &str,
        name: &str,
        role: Role,
    ) -> Self {
        self.accounts.push(Account {
            id: UserId::new(id),
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            role,
        });
        self
    }

    /// Drops the credentials of a deleted account
    ///
    /// Returns whether an account was removed.
    pub fn remove(&mut self, id: &UserId) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| &a.id != id);
        before != self.accounts.len()
    }

    /// Signs in with email and password
    ///
    /// The email comparison ignores case and surrounding spaces; the
    /// password must match exactly.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidCredentials`] for any mismatch.
    pub fn login(&self, email: &str, password: &str, now: DateTime<Utc>) -> Result<User, UserError> {
        let email = email.trim().to_lowercase();
        let account = self
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .ok_or_else(|| {
                warn!(%email, "Rejected sign-in");
                UserError::InvalidCredentials
            })?;

        info!(user_id = %account.id, "Signed in");
        Ok(User {
            id: account.id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            token: mock_token(now),
            role: Some(account.role),
        })
    }

    /// Registers a new ordinary user and signs them in
    ///
    /// # Errors
    ///
    /// - [`UserError::Validation`] if the form breaks any rule
    /// - [`UserError::DuplicateEmail`] if the email is already taken
    pub fn register(&mut self, form: &RegistrationForm, now: DateTime<Utc>) -> Result<User, UserError> {
        form.check()?;

        let email = form.email.trim().to_lowercase();
        if self.accounts.iter().any(|a| a.email == email) {
            return Err(UserError::DuplicateEmail(email));
        }

        let id = UserId::generate_v7();
        self.accounts.push(Account {
            id: id.clone(),
            email: email.clone(),
            password: form.password.clone(),
            name: form.name.clone(),
            role: Role::Usuario,
        });

        info!(user_id = %id, "Registered user");
        Ok(User {
            id,
            email,
            name: form.name.clone(),
            token: mock_token(now),
            role: Some(Role::Usuario),
        })
    }
}

/// Placeholder bearer token
pub fn mock_token(now: DateTime<Utc>) -> String {
    format!("{}{}", TOKEN_PREFIX, now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_demo_login() {
        let user = MockAuthenticator::default()
            .login(" Demo@Vesta.com ", "demo123", now())
            .unwrap();
        assert_eq!(user.id.as_str(), "user-001");
        assert_eq!(user.name, "Usuario Demo");
        assert_eq!(user.token, format!("mock-jwt-token-{}", now().timestamp_millis()));
        assert!(!user.is_admin());
    }

    #[test]
    fn test_same_instant_registrations_get_distinct_ids() {
        let mut auth = MockAuthenticator::empty();
        let form = |email: &str| RegistrationForm {
            name: "Ana López".to_string(),
            email: email.to_string(),
            mobile: "612345678".to_string(),
            password: "secreto1".to_string(),
            confirm_password: "secreto1".to_string(),
            accept_terms: true,
            accept_privacy: true,
        };

        let first = auth.register(&form("ana@example.com"), now()).unwrap();
        let second = auth.register(&form("eva@example.com"), now()).unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.id.as_str().starts_with("user-"));
    }

    #[test]
    fn test_removed_account_cannot_sign_in() {
        let mut auth = MockAuthenticator::default();
        assert!(auth.remove(&UserId::new("user-001")));
        assert!(!auth.remove(&UserId::new("user-001")));

        let result = auth.login(DEMO_EMAIL, DEMO_PASSWORD, now());
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let result = MockAuthenticator::default().login(DEMO_EMAIL, "demo1234", now());
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }
}
