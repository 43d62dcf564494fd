//! # Checkout Session
//!
//! The mutable state of one in-progress checkout, owned by exactly one
//! register and passed by reference into engine operations.
//!
//! ## Why an Explicit Session?
//! Cart, payment method, manual discount and tendered amount belong to
//! one customer interaction and die together. Holding them in a single
//! owned object — instead of ambient state inside the engine — keeps the
//! engine pure and makes the single-owner rule trivially enforceable by
//! the caller.
//!
//! ## Recompute Discipline
//! There is no reactive recomputation. After any mutation the caller
//! invokes [`CheckoutSession::breakdown`] and replaces its previous
//! [`PriceBreakdown`] wholesale.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Lifecycle                                    │
//! │                                                                         │
//! │  ┌──────────┐  add/set/remove  ┌──────────┐  submit ok  ┌──────────┐   │
//! │  │  Empty   │─────────────────►│ In Cart  │────────────►│  Reset   │   │
//! │  │ Session  │                  │          │             │ (empty)  │   │
//! │  └──────────┘                  └────┬─────┘             └──────────┘   │
//! │       ▲                             │                                   │
//! │       │            cancel()         │   submit rejected                 │
//! │       └─────────────────────────────┴──────────► session unchanged,    │
//! │                                                  adjust and retry      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};

use forecourt_core::cart::Cart;
use forecourt_core::checkout::{price_cart, PriceBreakdown};
use forecourt_core::error::CoreResult;
use forecourt_core::money::Money;
use forecourt_core::types::{PaymentMethod, Product};
use forecourt_core::validation::{validate_discount_cents, validate_quantity, validate_tender_cents};
use forecourt_core::Promotion;

/// One in-progress checkout: cart plus tender state.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    cart: Cart,
    payment_method: PaymentMethod,
    manual_discount: Money,
    tendered: Option<Money>,
}

impl CheckoutSession {
    /// Creates a fresh session: empty cart, cash payment, no discount.
    pub fn new() -> Self {
        CheckoutSession::default()
    }

    /// The current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The selected payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The cashier-entered discount.
    pub fn manual_discount(&self) -> Money {
        self.manual_discount
    }

    /// The cash amount tendered, if any has been entered.
    pub fn tendered(&self) -> Option<Money> {
        self.tendered
    }

    /// Adds `quantity` of `product` to the cart.
    ///
    /// Validates the quantity as input sanity, then defers to the cart's
    /// stock guards. A rejected add leaves the session unchanged.
    pub fn add_product(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        self.cart.add_item(product, quantity)
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// Zero or negative removes the line; a quantity above the stock
    /// snapshot is rejected with the prior quantity left standing.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        self.cart.set_quantity(product_id, quantity)
    }

    /// Removes a product from the cart. Idempotent.
    pub fn remove_product(&mut self, product_id: &str) {
        self.cart.remove_item(product_id);
    }

    /// Selects the payment method for this checkout.
    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Sets the cashier-entered discount. Must be non-negative.
    pub fn set_manual_discount(&mut self, amount: Money) -> CoreResult<()> {
        validate_discount_cents(amount.cents())?;
        self.manual_discount = amount;
        Ok(())
    }

    /// Records the cash amount tendered. Must be positive; whether it
    /// covers the total is decided at finalization.
    pub fn set_tendered(&mut self, amount: Money) -> CoreResult<()> {
        validate_tender_cents(amount.cents())?;
        self.tendered = Some(amount);
        Ok(())
    }

    /// Clears any entered tender.
    pub fn clear_tendered(&mut self) {
        self.tendered = None;
    }

    /// Prices the session against the given promotion snapshots at `now`.
    ///
    /// Pure pass-through to the engine; call after every mutation and
    /// replace the previous breakdown wholesale.
    pub fn breakdown(&self, promotions: &[Promotion], now: DateTime<Utc>) -> PriceBreakdown {
        price_cart(
            &self.cart,
            promotions,
            self.payment_method,
            self.manual_discount,
            now,
        )
    }

    /// Abandons the checkout: clears the cart and resets tender state.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Returns the session to its initial state. Used after a successful
    /// submission and by [`CheckoutSession::cancel`].
    pub(crate) fn reset(&mut self) {
        self.cart.clear();
        self.payment_method = PaymentMethod::default();
        self.manual_discount = Money::zero();
        self.tendered = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
