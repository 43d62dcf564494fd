//! # Promotions
//!
//! Promotion snapshot types and the matcher that selects and quantifies
//! applicable promotions against a cart.
//!
//! ## Matching Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Promotion Matching                                 │
//! │                                                                         │
//! │  Provider snapshots ──► is_active_at(now)? ──► scope.covers(line)?     │
//! │                              │                       │                  │
//! │                              ▼                       ▼                  │
//! │                        drop inactive          applicable amount        │
//! │                                                      │                  │
//! │                       applicable == 0? ──► skip      │                  │
//! │                 cart subtotal < minimum? ──► skip    │                  │
//! │                                                      ▼                  │
//! │                                              discount per kind         │
//! │                                                      │                  │
//! │                 all qualifying promotions stack additively             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each promotion is evaluated independently; there is no mutual
//! exclusion or best-of selection. The minimum purchase gate reads the
//! **whole-cart** subtotal, not the promotion's own applicable amount.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::money::Money;

// =============================================================================
// Promotion Kind
// =============================================================================

/// What a promotion takes off, tagged with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionKind {
    /// Percentage off the applicable amount, in basis points
    /// (2000 = 20% off).
    Percentage { rate_bps: u32 },

    /// Flat amount off, capped at the applicable amount so the eligible
    /// lines never go below zero.
    FixedAmount { amount_cents: i64 },

    /// Buy-one-get-one. Currently discounts a flat amount exactly like
    /// `FixedAmount`.
    // TODO: price buy-one-get-one by pairing eligible quantities instead
    // of reusing the flat-amount math.
    BuyOneGetOne { amount_cents: i64 },
}

// =============================================================================
// Eligibility Scope
// =============================================================================

/// Which cart lines a promotion covers.
///
/// The provider wire format uses two id arrays where "both empty" means
/// the promotion applies to the entire cart; [`EligibilityScope::from_id_sets`]
/// normalizes that sentinel into the explicit `Unrestricted` variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum EligibilityScope {
    /// Covers every line in the cart.
    Unrestricted,

    /// Covers a line when its product id is listed, or its category id
    /// is listed. At least one of the two sets is non-empty.
    Restricted {
        product_ids: HashSet<String>,
        category_ids: HashSet<String>,
    },
}

impl EligibilityScope {
    /// Builds a scope from the provider's id lists, mapping two empty
    /// lists to [`EligibilityScope::Unrestricted`].
    pub fn from_id_sets<P, C>(product_ids: P, category_ids: C) -> Self
    where
        P: IntoIterator<Item = String>,
        C: IntoIterator<Item = String>,
    {
        let product_ids: HashSet<String> = product_ids.into_iter().collect();
        let category_ids: HashSet<String> = category_ids.into_iter().collect();

        if product_ids.is_empty() && category_ids.is_empty() {
            EligibilityScope::Unrestricted
        } else {
            EligibilityScope::Restricted {
                product_ids,
                category_ids,
            }
        }
    }

    /// Checks whether this scope covers the given cart line.
    pub fn covers(&self, line: &CartLine) -> bool {
        match self {
            EligibilityScope::Unrestricted => true,
            EligibilityScope::Restricted {
                product_ids,
                category_ids,
            } => {
                if product_ids.contains(&line.product.id) {
                    return true;
                }
                line.product
                    .category
                    .as_ref()
                    .is_some_and(|c| category_ids.contains(&c.id))
            }
        }
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// A promotion snapshot supplied by the promotion provider.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    /// Unique identifier.
    pub id: String,

    /// Display name shown next to the discount on the breakdown.
    pub name: String,

    /// Optional description for the admin UI.
    pub description: Option<String>,

    /// Discount kind and value.
    pub kind: PromotionKind,

    /// Minimum whole-cart subtotal required for the promotion to apply.
    pub min_purchase_cents: Option<i64>,

    /// Which lines the promotion covers.
    pub scope: EligibilityScope,

    /// Administrative on/off switch.
    pub is_active: bool,

    /// Start of the activity window (inclusive).
    #[ts(as = "String")]
    pub starts_at: DateTime<Utc>,

    /// End of the activity window (inclusive).
    #[ts(as = "String")]
    pub ends_at: DateTime<Utc>,
}

impl Promotion {
    /// A promotion is active iff its flag is set and `now` falls within
    /// `[starts_at, ends_at]` inclusive. The engine applies this filter
    /// itself rather than trusting the provider's flag alone.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.is_active && self.starts_at <= now && now <= self.ends_at
    }
}

// =============================================================================
// Matcher Output
// =============================================================================

/// One promotion that qualified, annotated with what it covered and what
/// it took off.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedPromotion {
    /// Id of the promotion that applied.
    pub promotion_id: String,

    /// Promotion name, for display on the breakdown.
    pub name: String,

    /// Cart value the promotion's eligibility rules covered.
    pub applicable_cents: i64,

    /// Discount attributed to this promotion.
    pub discount_cents: i64,
}

/// The matcher's result: every qualifying promotion plus the aggregate
/// discount. Discounts stack additively across promotions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PromotionOutcome {
    /// Qualifying promotions in provider order.
    pub applied: Vec<AppliedPromotion>,

    /// Sum of the individual discounts.
    pub total_discount_cents: i64,
}

// =============================================================================
// Matcher
// =============================================================================

/// Matches `promotions` against a cart snapshot at time `now`.
///
/// Pure: same inputs, same output. Inactive promotions (flag off, or
/// `now` outside the window) are dropped up front; each remaining
/// promotion is evaluated independently per the pipeline above.
pub fn match_promotions(
    cart: &Cart,
    promotions: &[Promotion],
    now: DateTime<Utc>,
) -> PromotionOutcome {
    let cart_subtotal = cart.subtotal();

    let mut outcome = PromotionOutcome::default();
    for promotion in promotions {
        if !promotion.is_active_at(now) {
            continue;
        }
        if let Some(applied) = evaluate(promotion, cart, cart_subtotal) {
            outcome.total_discount_cents += applied.discount_cents;
            outcome.applied.push(applied);
        }
    }
    outcome
}

/// Evaluates a single active promotion against the cart.
fn evaluate(promotion: &Promotion, cart: &Cart, cart_subtotal: Money) -> Option<AppliedPromotion> {
    let applicable = cart.subtotal_where(|line| promotion.scope.covers(line));
    if applicable.is_zero() {
        return None;
    }

    // The minimum purchase gate reads the whole-cart subtotal, not the
    // applicable amount.
    if let Some(min_cents) = promotion.min_purchase_cents {
        if cart_subtotal.cents() < min_cents {
            return None;
        }
    }

    let discount = match promotion.kind {
        PromotionKind::Percentage { rate_bps } => applicable.percent_of(rate_bps),
        PromotionKind::FixedAmount { amount_cents }
        | PromotionKind::BuyOneGetOne { amount_cents } => {
            Money::from_cents(amount_cents).min(applicable)
        }
    };

    Some(AppliedPromotion {
        promotion_id: promotion.id.clone(),
        name: promotion.name.clone(),
        applicable_cents: applicable.cents(),
        discount_cents: discount.cents(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
