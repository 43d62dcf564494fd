//! # Transaction Finalizer
//!
//! Validates payment-method constraints, computes change, and assembles
//! the immutable [`FinalizedTransaction`] submission payload.
//!
//! ## Validation Order (first failure wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Cart non-empty?           ─── no ──► EmptyCart                     │
//! │  2. Paying by EBT?                                                      │
//! │     eligible subtotal > 0?    ─── no ──► NoEligibleItems               │
//! │     regular subtotal == 0?    ─── no ──► MixedCartRequiresSplitPayment │
//! │                                          (carries the other-payment    │
//! │                                           total due)                    │
//! │  3. Paying by cash?                                                     │
//! │     tendered ≥ grand total?   ─── no ──► InsufficientPayment           │
//! │                                                                         │
//! │  Success ──► change = max(0, tendered − grand total)   (cash only)     │
//! │          ──► FinalizedTransaction payload                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mixed carts are never auto-split: the whole transaction is rejected
//! and must be re-entered as two separate checkouts. Every failure
//! leaves the cart and breakdown untouched; finalization is always
//! retryable after the caller adjusts its inputs.

use chrono::{DateTime, Utc};

use crate::cart::Cart;
use crate::checkout::PriceBreakdown;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{FinalizedTransaction, PaymentMethod, TransactionLine};

// =============================================================================
// Transaction Stamp
// =============================================================================

/// Identity and clock inputs the pure engine cannot generate itself.
///
/// The register layer mints the id and transaction number, reads the
/// cashier from the identity context and the register id from config,
/// and reads the wall clock — then hands the bundle in here.
#[derive(Debug, Clone)]
pub struct TransactionStamp {
    /// Unique transaction identifier (UUID v4).
    pub id: String,

    /// Human-readable transaction number ("TXN-...").
    pub transaction_number: String,

    /// Acting cashier, from the identity context.
    pub cashier_id: String,

    /// Register producing the transaction.
    pub register_id: String,

    /// Finalization timestamp.
    pub finalized_at: DateTime<Utc>,
}

// =============================================================================
// Finalization Outcome
// =============================================================================

/// A successful finalization: the submission payload plus change due.
#[derive(Debug, Clone)]
pub struct Finalization {
    /// The immutable payload for the transaction sink.
    pub transaction: FinalizedTransaction,

    /// Change due back to the customer. `Some` only for cash.
    pub change: Option<Money>,
}

// =============================================================================
// Validation
// =============================================================================

/// Runs the payment-method validation rules in order and returns the
/// change due on success (`Some` for cash, `None` otherwise).
///
/// Exposed separately from [`finalize`] so the caller can pre-flight a
/// tender (e.g. enable/disable the complete button) without committing.
///
/// `tendered` is only meaningful for cash; `None` counts as zero.
pub fn validate_payment(
    cart: &Cart,
    breakdown: &PriceBreakdown,
    payment_method: PaymentMethod,
    tendered: Option<Money>,
) -> CoreResult<Option<Money>> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    if payment_method == PaymentMethod::Ebt {
        if !breakdown.food_stamp_subtotal().is_positive() {
            return Err(CoreError::NoEligibleItems);
        }
        if !breakdown.regular_subtotal().is_zero() {
            return Err(CoreError::MixedCartRequiresSplitPayment {
                other_due_cents: breakdown.regular_total_cents,
            });
        }
    }

    if payment_method == PaymentMethod::Cash {
        let tendered = tendered.unwrap_or_default();
        let required = breakdown.grand_total();
        if tendered < required {
            return Err(CoreError::InsufficientPayment {
                required_cents: required.cents(),
                tendered_cents: tendered.cents(),
            });
        }
        return Ok(Some((tendered - required).clamp_non_negative()));
    }

    Ok(None)
}

// =============================================================================
// Finalize
// =============================================================================

/// Validates and, on success, assembles the submission payload.
///
/// The payload's totals are copied verbatim from the breakdown — the
/// record of intent must match what the cashier saw. Items are listed in
/// ring-up order with their frozen unit prices.
pub fn finalize(
    cart: &Cart,
    breakdown: &PriceBreakdown,
    payment_method: PaymentMethod,
    tendered: Option<Money>,
    stamp: TransactionStamp,
) -> CoreResult<Finalization> {
    let change = validate_payment(cart, breakdown, payment_method, tendered)?;

    let items = cart
        .lines()
        .iter()
        .map(|line| TransactionLine {
            product_id: line.product.id.clone(),
            name_snapshot: line.product.name.clone(),
            quantity: line.quantity,
            unit_price_cents: line.product.price_cents,
            line_total_cents: line.line_total().cents(),
        })
        .collect();

    let transaction = FinalizedTransaction {
        id: stamp.id,
        transaction_number: stamp.transaction_number,
        payment_method,
        subtotal_cents: breakdown.subtotal_cents,
        tax_cents: breakdown.total_tax_cents,
        discount_cents: breakdown.total_discount_cents,
        total_cents: breakdown.grand_total_cents,
        cashier_id: stamp.cashier_id,
        register_id: stamp.register_id,
        created_at: stamp.finalized_at,
        items,
    };

    Ok(Finalization {
        transaction,
        change,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::price_cart;
    use crate::types::{Category, Product};
    use chrono::TimeZone;

    fn product(id: &str, price_cents: i64, tax_bps: u32, food_stamp: bool) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: None,
            barcode: None,
            price_cents,
            cost_cents: 0,
            category: Some(Category {
                id: "c1".to_string(),
                name: "Grocery".to_string(),
                tax_rate_bps: tax_bps,
                is_active: true,
            }),
            current_stock: 100,
            food_stamp_eligible: food_stamp,
            is_active: true,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn stamp() -> TransactionStamp {
        TransactionStamp {
            id: "11111111-2222-4333-8444-555555555555".to_string(),
            transaction_number: "TXN-0000001".to_string(),
            cashier_id: "cashier-1".to_string(),
            register_id: "register-1".to_string(),
            finalized_at: now(),
        }
    }

    fn breakdown_for(cart: &Cart, payment: PaymentMethod) -> PriceBreakdown {
        price_cart(cart, &[], payment, Money::zero(), now())
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = Cart::new();
        let breakdown = breakdown_for(&cart, PaymentMethod::Cash);
        let err = validate_payment(&cart, &breakdown, PaymentMethod::Cash, None).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_ebt_requires_eligible_items() {
        let mut cart = Cart::new();
        cart.add_item(&product("soda", 1000, 800, false), 1).unwrap();

        let breakdown = breakdown_for(&cart, PaymentMethod::Ebt);
        let err = validate_payment(&cart, &breakdown, PaymentMethod::Ebt, None).unwrap_err();
        assert!(matches!(err, CoreError::NoEligibleItems));
    }

    #[test]
    fn test_mixed_cart_rejected_with_amount_due() {
        let mut cart = Cart::new();
        cart.add_item(&product("milk", 200, 800, true), 1).unwrap();
        cart.add_item(&product("soda", 1000, 800, false), 1).unwrap();

        let breakdown = breakdown_for(&cart, PaymentMethod::Ebt);
        let err = validate_payment(&cart, &breakdown, PaymentMethod::Ebt, None).unwrap_err();

        // Carries the non-eligible subtotal + tax ($10.00 + $0.80) so
        // the caller can present the amount due by other means.
        match err {
            CoreError::MixedCartRequiresSplitPayment { other_due_cents } => {
                assert_eq!(other_due_cents, 1080);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The rejected cart is untouched and retryable.
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_ebt_all_eligible_cart_passes() {
        let mut cart = Cart::new();
        cart.add_item(&product("milk", 200, 800, true), 3).unwrap();

        let breakdown = breakdown_for(&cart, PaymentMethod::Ebt);
        let change = validate_payment(&cart, &breakdown, PaymentMethod::Ebt, None).unwrap();
        assert_eq!(change, None);
    }

    #[test]
    fn test_cash_change_computation() {
        // $9.00 item at 5.78% tax → $0.52 tax, grand total $9.52
        let mut cart = Cart::new();
        cart.add_item(&product("soda", 900, 578, false), 1).unwrap();

        let breakdown = breakdown_for(&cart, PaymentMethod::Cash);
        assert_eq!(breakdown.grand_total_cents, 952);

        let change = validate_payment(
            &cart,
            &breakdown,
            PaymentMethod::Cash,
            Some(Money::from_cents(1000)),
        )
        .unwrap();
        assert_eq!(change, Some(Money::from_cents(48)));

        let err = validate_payment(
            &cart,
            &breakdown,
            PaymentMethod::Cash,
            Some(Money::from_cents(900)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientPayment {
                required_cents: 952,
                tendered_cents: 900,
            }
        ));
    }

    #[test]
    fn test_cash_with_no_tender_counts_as_zero() {
        let mut cart = Cart::new();
        cart.add_item(&product("soda", 100, 0, false), 1).unwrap();

        let breakdown = breakdown_for(&cart, PaymentMethod::Cash);
        let err = validate_payment(&cart, &breakdown, PaymentMethod::Cash, None).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientPayment { .. }));
    }

    #[test]
    fn test_non_cash_has_no_change() {
        let mut cart = Cart::new();
        cart.add_item(&product("soda", 100, 0, false), 1).unwrap();

        let breakdown = breakdown_for(&cart, PaymentMethod::CreditCard);
        let change =
            validate_payment(&cart, &breakdown, PaymentMethod::CreditCard, None).unwrap();
        assert_eq!(change, None);
    }

    #[test]
    fn test_finalize_payload_matches_breakdown() {
        let mut cart = Cart::new();
        cart.add_item(&product("milk", 200, 800, true), 2).unwrap();
        cart.add_item(&product("soda", 1000, 800, false), 1).unwrap();

        let breakdown = breakdown_for(&cart, PaymentMethod::Cash);
        let result = finalize(
            &cart,
            &breakdown,
            PaymentMethod::Cash,
            Some(Money::from_cents(5000)),
            stamp(),
        )
        .unwrap();

        let tx = &result.transaction;
        assert_eq!(tx.subtotal_cents, breakdown.subtotal_cents);
        assert_eq!(tx.tax_cents, breakdown.total_tax_cents);
        assert_eq!(tx.discount_cents, breakdown.total_discount_cents);
        assert_eq!(tx.total_cents, breakdown.grand_total_cents);
        assert_eq!(tx.payment_method, PaymentMethod::Cash);
        assert_eq!(tx.cashier_id, "cashier-1");
        assert_eq!(tx.register_id, "register-1");

        // Items in ring-up order with frozen prices.
        assert_eq!(tx.items.len(), 2);
        assert_eq!(tx.items[0].product_id, "milk");
        assert_eq!(tx.items[0].quantity, 2);
        assert_eq!(tx.items[0].unit_price_cents, 200);
        assert_eq!(tx.items[0].line_total_cents, 400);
        assert_eq!(tx.items[1].product_id, "soda");
    }

    #[test]
    fn test_finalize_failure_leaves_inputs_untouched() {
        let mut cart = Cart::new();
        cart.add_item(&product("soda", 1000, 0, false), 1).unwrap();

        let breakdown = breakdown_for(&cart, PaymentMethod::Cash);
        let before = cart.clone();

        let err = finalize(
            &cart,
            &breakdown,
            PaymentMethod::Cash,
            Some(Money::from_cents(500)),
            stamp(),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InsufficientPayment { .. }));

        assert_eq!(before.total_quantity(), cart.total_quantity());
        assert_eq!(before.subtotal(), cart.subtotal());
    }
}
