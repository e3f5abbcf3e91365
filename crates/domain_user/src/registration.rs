//! Registration form rules
//!
//! Field-level checks are declared with `validator`; the Spanish mobile
//! format and the consent checkboxes are checked by hand. Every problem is
//! reported, in form order.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::UserError;

const SPANISH_PREFIX: &str = "+34";

/// Data entered on the sign-up page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[validate(length(min = 1, max = 50, message = "El nombre debe tener entre 1 y 50 caracteres"))]
    pub name: String,

    #[validate(email(message = "El correo electrónico no es válido"))]
    pub email: String,

    /// Spanish mobile, `+34` optional
    pub mobile: String,

    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Las contraseñas no coinciden"))]
    pub confirm_password: String,

    pub accept_terms: bool,
    pub accept_privacy: bool,
}

impl RegistrationForm {
    /// Checks every rule and returns the messages to show, in form order
    pub fn problems(&self) -> Vec<String> {
        let mut messages = Vec::new();

        let declared = match self.validate() {
            Ok(()) => None,
            Err(errors) => Some(errors),
        };
        let push_field = |field: &str, messages: &mut Vec<String>| {
            if let Some(errors) = declared.as_ref() {
                if let Some(field_errors) = errors.field_errors().get(field) {
                    messages.extend(field_errors.iter().map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} no es válido", field))
                    }));
                }
            }
        };

        push_field("name", &mut messages);
        push_field("email", &mut messages);
        if !is_spanish_mobile(&self.mobile) {
            messages.push("El móvil debe ser un número español de 9 dígitos que empiece por 6 o 7".to_string());
        }
        push_field("password", &mut messages);
        push_field("confirm_password", &mut messages);
        if !self.accept_terms || !self.accept_privacy {
            messages.push(
                "Debes aceptar los Términos y Condiciones y la Política de Privacidad para registrarte"
                    .to_string(),
            );
        }

        messages
    }

    /// Validates the form
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Validation`] listing every problem found.
    pub fn check(&self) -> Result<(), UserError> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(UserError::Validation(problems))
        }
    }
}

/// Returns true for a Spanish mobile: optional `+34`, then 9 digits starting with 6 or 7
///
/// Spaces are ignored.
pub fn is_spanish_mobile(input: &str) -> bool {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let local = compact.strip_prefix(SPANISH_PREFIX).unwrap_or(&compact);
    local.len() == 9
        && local.chars().all(|c| c.is_ascii_digit())
        && matches!(local.chars().next(), Some('6' | '7'))
}

/// Canonical `+34XXXXXXXXX` form of a valid Spanish mobile
pub fn normalize_mobile(input: &str) -> Option<String> {
    if !is_spanish_mobile(input) {
        return None;
    }
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let local = compact.strip_prefix(SPANISH_PREFIX).unwrap_or(&compact);
    Some(format!("{}{}", SPANISH_PREFIX, local))
}
