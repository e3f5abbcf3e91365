//! Cart domain errors
//!
//! Cart mutations are total and never fail; only checkout can be refused.

use thiserror::Error;

/// Errors that can occur while checking out
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Checkout was attempted with nothing in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// The payment form failed validation
    #[error("Invalid payment details: {}", .0.join("; "))]
    InvalidPayment(Vec<String>),

    /// A line holds more units than one order may buy
    #[error("Line {insurance_id} has {quantity} units; at most {max} can be bought")]
    QuantityLimit {
        insurance_id: String,
        quantity: u32,
        max: u32,
    },
}
