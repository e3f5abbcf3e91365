//! Mock checkout
//!
//! Turns a cart and card details into an [`Order`]. No payment is taken;
//! the card is only validated. Emptying the cart afterwards is up to the
//! caller so that a failed checkout leaves it untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use core_kernel::{InsuranceId, Money, OrderId, UserId};
use domain_catalog::DurationUnit;

use crate::cart::{Cart, CartItem, MAX_LINE_QUANTITY};
use crate::error::CartError;
use crate::payment::PaymentDetails;
use crate::pricing::OrderSummary;

/// Snapshot of a cart line at purchase time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub insurance_id: InsuranceId,
    pub insurance_name: String,
    pub category: String,
    pub quantity: u32,
    pub duration: u32,
    pub duration_unit: DurationUnit,
    pub unit_price: Money,
    pub line_total: Money,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            insurance_id: item.id().clone(),
            insurance_name: item.insurance.name.clone(),
            category: item.insurance.category.clone(),
            quantity: item.quantity,
            duration: item.duration(),
            duration_unit: item.insurance.duration,
            unit_price: item.unit_price(),
            line_total: item.line_total(),
        }
    }
}

/// A completed purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: Option<UserId>,
    pub lines: Vec<OrderLine>,
    pub summary: OrderSummary,
    pub card_last_four: String,
    pub placed_on: NaiveDate,
}

/// Places an order for the current cart contents
///
/// # Errors
///
/// - [`CartError::EmptyCart`] if there is nothing to buy
/// - [`CartError::QuantityLimit`] if a line exceeds [`MAX_LINE_QUANTITY`],
///   which only a cart restored from elsewhere can do
/// - [`CartError::InvalidPayment`] with every card problem found
#[instrument(skip(cart, payment), fields(items = cart.items().len()))]
pub fn place_order(
    cart: &Cart,
    payment: &PaymentDetails,
    user_id: Option<UserId>,
    today: NaiveDate,
) -> Result<Order, CartError> {
    if cart.is_empty() {
        return Err(CartError::EmptyCart);
    }
    if let Some(item) = cart.items().iter().find(|i| i.quantity > MAX_LINE_QUANTITY) {
        return Err(CartError::QuantityLimit {
            insurance_id: item.id().to_string(),
            quantity: item.quantity,
            max: MAX_LINE_QUANTITY,
        });
    }

    let problems = payment.validate(today);
    if !problems.is_empty() {
        warn!(count = problems.len(), "Payment details rejected");
        return Err(CartError::InvalidPayment(problems));
    }

    let order = Order {
        id: OrderId::generate_v7(),
        user_id,
        lines: cart.items().iter().map(OrderLine::from).collect(),
        summary: cart.summary(),
        card_last_four: payment.last_four(),
        placed_on: today,
    };

    info!(order_id = %order.id, total = %order.summary.total.round_to_currency(), "Order placed");
    Ok(order)
}
