//! Card details captured at checkout
//!
//! Input is normalized as the customer types: the card number is grouped in
//! blocks of four and the expiry gets a slash after the month. Validation is
//! a mock gateway check; nothing is charged.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Card number length after stripping whitespace
pub const CARD_NUMBER_DIGITS: usize = 16;

/// Payment form contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_number: String,
    pub card_name: String,
    /// `MM/YY`
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentDetails {
    /// Builds details from raw form input, normalizing number and expiry
    pub fn new(
        card_number: &str,
        card_name: impl Into<String>,
        expiry_date: &str,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: format_card_number(card_number),
            card_name: card_name.into(),
            expiry_date: format_expiry(expiry_date),
            cvv: cvv.into(),
        }
    }

    /// Checks every field and returns all problems found
    ///
    /// An empty vector means the details are acceptable as of `today`.
    pub fn validate(&self, today: NaiveDate) -> Vec<String> {
        let mut errors = Vec::new();

        let digits: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != CARD_NUMBER_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
            errors.push("El número de tarjeta debe tener 16 dígitos".to_string());
        }

        if self.card_name.trim().is_empty() {
            errors.push("El nombre del titular es obligatorio".to_string());
        }

        match parse_expiry(&self.expiry_date) {
            None => errors.push("La fecha de expiración debe tener el formato MM/AA".to_string()),
            Some((year, month)) if (year, month) < (today.year(), today.month()) => {
                errors.push("La tarjeta está vencida".to_string());
            }
            Some(_) => {}
        }

        let cvv = self.cvv.trim();
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            errors.push("El CVV debe tener 3 o 4 dígitos".to_string());
        }

        errors
    }

    /// Last four digits of the card, for receipts
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(|c| c.is_ascii_digit()).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

/// Strips whitespace and regroups the number in blocks of four
///
/// `"4111111111111111"` becomes `"4111 1111 1111 1111"`.
pub fn format_card_number(raw: &str) -> String {
    let compact: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps digits and inserts a slash after the month, capped at `MM/YY`
pub fn format_expiry(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let formatted = if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    };
    formatted.chars().take(5).collect()
}

/// Parses `MM/YY` into (year, month) with the year in the 2000s
fn parse_expiry(expiry: &str) -> Option<(i32, u32)> {
    let (month, year) = expiry.split_once('/')?;
    if month.len() != 2 || year.len() != 2 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((2000 + year, month))
}
