//! # forecourt-core: Pure Checkout Pricing Engine
//!
//! This crate is the **heart** of Forecourt POS. It contains the checkout
//! pricing and promotion logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Forecourt POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Admin Frontend (React)                         │   │
//! │  │    Search UI ──► Cart UI ──► Payment UI ──► Receipt UI          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ REST                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  forecourt-register                             │   │
//! │  │    CheckoutSession, Register, boundary contracts                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ forecourt-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌──────────┐           │   │
//! │  │   │  money  │ │  cart   │ │ promotion │ │ checkout │           │   │
//! │  │   │  Money  │ │  Cart   │ │  matcher  │ │ breakdown│           │   │
//! │  │   │ TaxCalc │ │  guards │ │  scopes   │ │ segments │           │   │
//! │  │   └─────────┘ └─────────┘ └───────────┘ └──────────┘           │   │
//! │  │   ┌──────────┐ ┌─────────┐ ┌────────────┐                      │   │
//! │  │   │ finalize │ │  types  │ │ validation │                      │   │
//! │  │   └──────────┘ └─────────┘ └────────────┘                      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO WALL CLOCK             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, PaymentMethod, payloads)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart with stock guards
//! - [`promotion`] - Promotion snapshots and the matcher
//! - [`checkout`] - The pure price-breakdown calculator
//! - [`finalize`] - Payment validation, change, submission payload
//! - [`error`] - Domain error types
//! - [`validation`] - Input sanity checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; `now` is a parameter
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are cents (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//! 5. **Rejected mutations change nothing**: no partial applies, no
//!    silent clamping to a "closest valid" result
//!
//! ## Example Usage
//!
//! ```rust
//! use forecourt_core::cart::Cart;
//! use forecourt_core::checkout::price_cart;
//! use forecourt_core::money::Money;
//! use forecourt_core::types::{Category, PaymentMethod, Product};
//! use chrono::Utc;
//!
//! let snapshot = Product {
//!     id: "0b1f8d7e-0000-4000-8000-000000000001".into(),
//!     name: "Milk 1gal".into(),
//!     description: None,
//!     barcode: Some("070000000001".into()),
//!     price_cents: 349,
//!     cost_cents: 210,
//!     category: Some(Category {
//!         id: "grocery".into(),
//!         name: "Grocery".into(),
//!         tax_rate_bps: 825,
//!         is_active: true,
//!     }),
//!     current_stock: 12,
//!     food_stamp_eligible: true,
//!     is_active: true,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&snapshot, 2).unwrap();
//!
//! // Paying by EBT exempts the eligible segment from tax.
//! let breakdown = price_cart(&cart, &[], PaymentMethod::Ebt, Money::zero(), Utc::now());
//! assert_eq!(breakdown.grand_total_cents, 698);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod finalize;
pub mod money;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use forecourt_core::Money` instead of
// `use forecourt_core::money::Money`

pub use cart::{Cart, CartLine};
pub use checkout::{price_cart, PriceBreakdown};
pub use error::{CoreError, CoreResult, ValidationError};
pub use finalize::{finalize, validate_payment, Finalization, TransactionStamp};
pub use money::Money;
pub use promotion::{
    match_promotions, AppliedPromotion, EligibilityScope, Promotion, PromotionKind,
    PromotionOutcome,
};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single item in cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// The stock snapshot is the real gate; this is input sanity.
pub const MAX_ITEM_QUANTITY: i64 = 999;
