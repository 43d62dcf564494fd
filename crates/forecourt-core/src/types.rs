//! # Domain Types
//!
//! Core domain types used throughout Forecourt POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌──────────────────────┐  │
//! │  │    Product      │   │    Category     │   │ FinalizedTransaction │  │
//! │  │  ─────────────  │   │  ─────────────  │   │  ──────────────────  │  │
//! │  │  id             │   │  id             │   │  transaction_number  │  │
//! │  │  price_cents    │   │  tax_rate_bps   │   │  payment_method      │  │
//! │  │  current_stock  │   │  name           │   │  total_cents         │  │
//! │  │  food_stamp_... │   └─────────────────┘   │  items[]             │  │
//! │  └─────────────────┘                         └──────────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TaxRate      │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  Cash, Ebt, ... │                             │
//! │  │  825 = 8.25%    │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Semantics
//! `Product` and `Category` are **read-only snapshots** supplied by the
//! catalog collaborator. The engine never fetches or refreshes them;
//! `current_stock` is a point-in-time value used for cart guards only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25%. Category tax rates are stored upstream as percentages
/// with two decimal places, so every representable rate maps exactly to
/// an integer number of basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category, carrying the tax rate applied to its products.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier.
    pub id: String,

    /// Display name ("Beverages", "Tobacco", ...).
    pub name: String,

    /// Tax rate in basis points (825 = 8.25%).
    pub tax_rate_bps: u32,

    /// Whether the category is active (soft delete).
    pub is_active: bool,
}

impl Category {
    /// Returns the category's tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale, as supplied by the catalog provider.
///
/// The category is embedded rather than referenced: the catalog delivers
/// products with their category already resolved, and the engine never
/// performs lookups of its own.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name shown to cashier and on the transaction record.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Barcode (EAN-13, UPC-A, etc.), if the product carries one.
    pub barcode: Option<String>,

    /// Sale price in cents (smallest currency unit). Non-negative.
    pub price_cents: i64,

    /// Unit cost in cents (for margin reporting upstream). Non-negative.
    pub cost_cents: i64,

    /// Category snapshot; products without a category are untaxed.
    pub category: Option<Category>,

    /// Stock on hand at snapshot time. Non-negative.
    pub current_stock: i64,

    /// Whether the product qualifies for the food-benefit tax exemption.
    pub food_stamp_eligible: bool,

    /// Whether product is active (soft delete).
    pub is_active: bool,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the tax rate from the embedded category, or zero when the
    /// product has no category.
    pub fn tax_rate(&self) -> TaxRate {
        self.category
            .as_ref()
            .map(Category::tax_rate)
            .unwrap_or_default()
    }

    /// Checks whether the snapshot has any stock at all.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.current_stock > 0
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer pays.
///
/// `Ebt` is the food-benefit instrument: paying with it exempts
/// food-stamp-eligible items from sales tax, and carts containing
/// anything else are rejected at finalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment. The only method with tender/change handling.
    Cash,
    /// Credit card on external terminal.
    CreditCard,
    /// Debit card on external terminal.
    DebitCard,
    /// Paper check.
    Check,
    /// EBT / food-benefit card.
    Ebt,
    /// Store gift card.
    GiftCard,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

// =============================================================================
// Finalized Transaction
// =============================================================================

/// The immutable submission payload sent to the external transaction API.
///
/// Constructed once by the finalizer after validation passes; never
/// mutated afterwards. This is the system's record of intent — the totals
/// here must match the breakdown shown to the cashier exactly.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinalizedTransaction {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable transaction number ("TXN-...").
    pub transaction_number: String,

    /// How the customer paid.
    pub payment_method: PaymentMethod,

    /// Sum of line totals before tax and discounts.
    pub subtotal_cents: i64,

    /// Total tax across both tax segments.
    pub tax_cents: i64,

    /// Manual discount plus all promotion discounts.
    pub discount_cents: i64,

    /// Grand total: subtotal + tax − discounts.
    pub total_cents: i64,

    /// Acting cashier, from the identity context. Not used in pricing.
    pub cashier_id: String,

    /// Register that produced the transaction.
    pub register_id: String,

    /// When the transaction was finalized.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Line items in cart order.
    pub items: Vec<TransactionLine>,
}

/// A line item in a finalized transaction.
/// Uses the snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLine {
    /// Product the line refers to.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub name_snapshot: String,

    /// Quantity sold.
    pub quantity: i64,

    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,

    /// Line total before tax (unit_price × quantity).
    pub line_total_cents: i64,
}

impl TransactionLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_payment_method_default_is_cash() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
    }

    #[test]
    fn test_product_tax_rate_falls_back_to_zero() {
        let product = Product {
            id: "p1".to_string(),
            name: "Loose candy".to_string(),
            description: None,
            barcode: None,
            price_cents: 50,
            cost_cents: 10,
            category: None,
            current_stock: 10,
            food_stamp_eligible: false,
            is_active: true,
        };
        assert!(product.tax_rate().is_zero());
    }
}
