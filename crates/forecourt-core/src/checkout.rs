//! # Checkout Calculator
//!
//! The pure function that turns a cart, the promotion set, the selected
//! payment method and any manual discount into a [`PriceBreakdown`].
//!
//! ## Tax Segmentation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Two Tax Segments                                     │
//! │                                                                         │
//! │  Cart lines ──┬── food_stamp_eligible ──► food-stamp segment           │
//! │               │                            tax = Σ line × rate,        │
//! │               │                            FORCED TO ZERO when the     │
//! │               │                            payment method is EBT       │
//! │               │                                                         │
//! │               └── everything else ───────► regular segment             │
//! │                                            tax = Σ line × rate,        │
//! │                                            independent of payment      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax is computed per line on the **pre-discount** price; discounts are
//! subtracted from the grand total only and are never redistributed onto
//! lines before tax. That ordering is what the persisted transaction
//! record audits against.
//!
//! The calculator holds no state: the caller re-invokes it after every
//! cart or promotion-set mutation and replaces the previous breakdown
//! wholesale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::promotion::{match_promotions, AppliedPromotion, Promotion};
use crate::types::PaymentMethod;

// =============================================================================
// Price Breakdown
// =============================================================================

/// The computed price breakdown for one cart state.
///
/// Never mutated in place — recomputed and replaced wholesale on every
/// relevant mutation, and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    /// Subtotal of food-stamp-eligible lines.
    pub food_stamp_subtotal_cents: i64,

    /// Tax on the food-stamp segment (zero when paying by EBT).
    pub food_stamp_tax_cents: i64,

    /// Food-stamp segment subtotal + tax.
    pub food_stamp_total_cents: i64,

    /// Subtotal of all other lines.
    pub regular_subtotal_cents: i64,

    /// Tax on the regular segment, independent of payment method.
    pub regular_tax_cents: i64,

    /// Regular segment subtotal + tax.
    pub regular_total_cents: i64,

    /// Whole-cart subtotal (both segments).
    pub subtotal_cents: i64,

    /// Tax across both segments.
    pub total_tax_cents: i64,

    /// Promotions that qualified, each with its attributed discount.
    pub applied_promotions: Vec<AppliedPromotion>,

    /// Aggregate promotion discount.
    pub promotion_discount_cents: i64,

    /// Cashier-entered discount.
    pub manual_discount_cents: i64,

    /// Manual + promotion discounts.
    pub total_discount_cents: i64,

    /// subtotals + taxes − discounts. Deliberately not clamped: a
    /// negative value is surfaced to the caller rather than hidden.
    pub grand_total_cents: i64,
}

impl PriceBreakdown {
    /// Food-stamp segment subtotal as Money.
    #[inline]
    pub fn food_stamp_subtotal(&self) -> Money {
        Money::from_cents(self.food_stamp_subtotal_cents)
    }

    /// Regular segment subtotal as Money.
    #[inline]
    pub fn regular_subtotal(&self) -> Money {
        Money::from_cents(self.regular_subtotal_cents)
    }

    /// Regular segment subtotal + tax as Money (what a mixed-cart EBT
    /// rejection reports as due by other means).
    #[inline]
    pub fn regular_total(&self) -> Money {
        Money::from_cents(self.regular_total_cents)
    }

    /// Grand total as Money.
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Prices the cart. Pure function of its inputs; invoke after any cart
/// or promotion-set mutation and replace the previous breakdown.
pub fn price_cart(
    cart: &Cart,
    promotions: &[Promotion],
    payment_method: PaymentMethod,
    manual_discount: Money,
    now: DateTime<Utc>,
) -> PriceBreakdown {
    let food_stamp_subtotal = cart.subtotal_where(|l| l.product.food_stamp_eligible);
    let regular_subtotal = cart.subtotal_where(|l| !l.product.food_stamp_eligible);

    let regular_tax = cart.tax_where(|l| !l.product.food_stamp_eligible);

    // Statutory exemption: the food-stamp segment is untaxed only on the
    // EBT payment path. Every other method taxes it normally.
    let food_stamp_tax = if payment_method == PaymentMethod::Ebt {
        Money::zero()
    } else {
        cart.tax_where(|l| l.product.food_stamp_eligible)
    };

    let outcome = match_promotions(cart, promotions, now);
    let promotion_discount = Money::from_cents(outcome.total_discount_cents);
    let total_discount = manual_discount + promotion_discount;

    let grand_total =
        food_stamp_subtotal + food_stamp_tax + regular_subtotal + regular_tax - total_discount;

    PriceBreakdown {
        food_stamp_subtotal_cents: food_stamp_subtotal.cents(),
        food_stamp_tax_cents: food_stamp_tax.cents(),
        food_stamp_total_cents: (food_stamp_subtotal + food_stamp_tax).cents(),
        regular_subtotal_cents: regular_subtotal.cents(),
        regular_tax_cents: regular_tax.cents(),
        regular_total_cents: (regular_subtotal + regular_tax).cents(),
        subtotal_cents: (food_stamp_subtotal + regular_subtotal).cents(),
        total_tax_cents: (food_stamp_tax + regular_tax).cents(),
        applied_promotions: outcome.applied,
        promotion_discount_cents: promotion_discount.cents(),
        manual_discount_cents: manual_discount.cents(),
        total_discount_cents: total_discount.cents(),
        grand_total_cents: grand_total.cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
