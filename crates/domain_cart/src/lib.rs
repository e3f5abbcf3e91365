//! Shopping Cart Domain
//!
//! The cart is a flat, ordered list of line items keyed by product id.
//! Pricing is a fixed-rate computation over those lines:
//!
//! ```text
//! unit_price = custom total price, else catalog base price
//! subtotal   = Σ unit_price × quantity
//! tax        = subtotal × 16%
//! total      = subtotal + tax
//! ```
//!
//! Cart mutations never fail: removing a missing item is a no-op and
//! setting a quantity of zero or less removes the line.
//!
//! # Example
//!
//! ```rust
//! use domain_cart::{Cart, CartItem};
//! use domain_catalog::fixtures::mock_insurances;
//!
//! let products = mock_insurances();
//! let mut cart = Cart::default();
//! cart.add_item(CartItem::new(products[0].clone(), 2));
//! cart.add_item(CartItem::new(products[0].clone(), 1));
//!
//! assert_eq!(cart.items().len(), 1);
//! assert_eq!(cart.item_count(), 3);
//! ```

pub mod cart;
pub mod pricing;
pub mod payment;
pub mod checkout;
pub mod error;

pub use cart::{Cart, CartItem, MAX_LINE_QUANTITY};
pub use pricing::OrderSummary;
pub use payment::PaymentDetails;
pub use checkout::{Order, OrderLine, place_order};
pub use error::CartError;
