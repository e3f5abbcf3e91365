//! Cart and cart line items

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::{Currency, InsuranceId, Money};
use domain_catalog::{CustomOptions, Insurance, Quote};

use crate::pricing::OrderSummary;

/// Most units a single cart line can hold
pub const MAX_LINE_QUANTITY: u32 = 999;

/// A product in the cart with its quantity and optional quoted price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub insurance: Insurance,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_options: Option<CustomOptions>,
}

impl CartItem {
    /// A line charged at the catalog base price
    pub fn new(insurance: Insurance, quantity: u32) -> Self {
        Self {
            insurance,
            quantity,
            custom_options: None,
        }
    }

    /// A line charged at a quoted duration price
    pub fn from_quote(insurance: Insurance, quote: &Quote, quantity: u32) -> Self {
        Self {
            insurance,
            quantity,
            custom_options: Some(quote.custom_options()),
        }
    }

    /// Attaches custom options to the line
    pub fn with_options(mut self, options: CustomOptions) -> Self {
        self.custom_options = Some(options);
        self
    }

    /// Product identity of the line
    pub fn id(&self) -> &InsuranceId {
        &self.insurance.id
    }

    /// Effective price of one unit of this line
    ///
    /// A custom total price wins over the base price. A zero override is
    /// treated as absent, as the storefront always did.
    pub fn unit_price(&self) -> Money {
        self.custom_options
            .and_then(|o| o.total_price)
            .filter(|price| !price.is_zero())
            .unwrap_or(self.insurance.base_price)
    }

    /// `unit_price × quantity`
    pub fn line_total(&self) -> Money {
        self.unit_price().times(self.quantity)
    }

    /// Duration units bought, defaulting to one
    pub fn duration(&self) -> u32 {
        self.custom_options
            .map(|o| o.duration_or_default())
            .unwrap_or(1)
    }
}

/// Ordered collection of cart lines, at most one per product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    currency: Currency,
    items: Vec<CartItem>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

impl Cart {
    /// Creates an empty cart priced in `currency`
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Currency every line must be priced in
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Lines in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the line for a product
    pub fn get(&self, id: &InsuranceId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines (the header badge)
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Adds a line, merging quantities when the product is already present
    ///
    /// Zero-quantity lines and lines priced in another currency are ignored.
    /// A line never holds more than [`MAX_LINE_QUANTITY`] units.
    pub fn add_item(&mut self, mut item: CartItem) {
        if item.quantity == 0 {
            debug!(insurance_id = %item.id(), "Ignoring zero-quantity cart item");
            return;
        }
        if item.unit_price().currency() != self.currency {
            warn!(
                insurance_id = %item.id(),
                item_currency = %item.unit_price().currency(),
                cart_currency = %self.currency,
                "Ignoring cart item priced in another currency"
            );
            return;
        }

        item.quantity = item.quantity.min(MAX_LINE_QUANTITY);
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .saturating_add(item.quantity)
                    .min(MAX_LINE_QUANTITY);
                debug!(insurance_id = %existing.id(), quantity = existing.quantity, "Merged cart item");
            }
            None => {
                debug!(insurance_id = %item.id(), quantity = item.quantity, "Added cart item");
                self.items.push(item);
            }
        }
    }

    /// Sets the quantity of a line; zero or less removes it
    ///
    /// Unknown products are ignored. Line order is preserved. Quantities
    /// above [`MAX_LINE_QUANTITY`] are clamped to it.
    pub fn update_quantity(&mut self, id: &InsuranceId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        let quantity = u32::try_from(quantity)
            .unwrap_or(u32::MAX)
            .min(MAX_LINE_QUANTITY);
        if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
            item.quantity = quantity;
        }
    }

    /// Removes the line for a product; no-op if absent
    pub fn remove_item(&mut self, id: &InsuranceId) {
        self.items.retain(|item| item.id() != id);
    }

    /// Empties the cart
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Subtotal, tax and total for the current lines
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_lines(self.currency, self.items.iter().map(CartItem::line_total))
    }
}
