//! # Cart
//!
//! The mutable collection of line items for one in-progress checkout.
//!
//! ## Invariants
//! - One line per product id; adding an already-present product increases
//!   its quantity instead of duplicating the line
//! - A line's quantity never exceeds the product snapshot's
//!   `current_stock` (point-in-time guard; the server re-validates at
//!   submission, not here)
//! - A rejected mutation leaves the cart exactly as it was
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  Cashier Action            Operation              Guard                 │
//! │  ──────────────            ─────────              ─────                 │
//! │  Scan/click product ─────► add_item() ──────────► stock > 0,           │
//! │                                                   qty ≤ stock          │
//! │  Edit quantity ──────────► set_quantity() ──────► qty ≤ stock;         │
//! │                                                   qty ≤ 0 removes      │
//! │  Click remove ───────────► remove_item() ───────► (idempotent)         │
//! │  Cancel / finalize ──────► clear()                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart: one product snapshot and a quantity.
///
/// The full product snapshot is held (not just the id) so pricing, tax
/// segmentation and stock guards all read from the same frozen data even
/// if the catalog changes mid-checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product snapshot frozen at the time the line was created.
    pub product: Product,

    /// Quantity in cart. Always ≥ 1.
    pub quantity: i64,
}

impl CartLine {
    /// Line total before tax (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }

    /// Tax for this line at the product's category rate, rounded half-up
    /// at cent precision. Computed on the pre-discount line total.
    pub fn tax(&self) -> Money {
        self.line_total().calculate_tax(self.product.tax_rate())
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The checkout cart.
///
/// Created empty at the start of a checkout session, mutated by the
/// operations below, and cleared on successful finalization or explicit
/// cancellation. Lines are keyed by product id; insertion order is kept
/// only so the finalized transaction lists items in the order they were
/// rung up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// `quantity` must be ≥ 1; callers validate input before invoking.
    ///
    /// ## Errors
    /// - [`CoreError::OutOfStock`] when the snapshot shows zero stock
    /// - [`CoreError::InsufficientStock`] when the resulting line quantity
    ///   would exceed the snapshot's stock; the add is fully rejected, not
    ///   partially applied
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        debug_assert!(quantity >= 1, "callers validate quantity before add_item");

        if !product.in_stock() {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > product.current_stock {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.current_stock,
                    requested: new_qty,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if quantity > product.current_stock {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.current_stock,
                requested: quantity,
            });
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0`: removes the line (idempotent)
    /// - `quantity > current_stock`: fails with
    ///   [`CoreError::InsufficientStock`] and the prior quantity stands
    /// - product not in cart: no-op
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            if quantity > line.product.current_stock {
                return Err(CoreError::InsufficientStock {
                    name: line.product.name.clone(),
                    available: line.product.current_stock,
                    requested: quantity,
                });
            }
            line.quantity = quantity;
        }

        Ok(())
    }

    /// Removes a line by product id. No-op if absent.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Returns the lines in ring-up order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Subtotal over all lines: Σ unit price × quantity, exact.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal over the lines matching `predicate`.
    ///
    /// The checkout calculator uses this to segment the cart by tax
    /// treatment; the promotion matcher uses it for eligibility sums.
    pub fn subtotal_where<P>(&self, predicate: P) -> Money
    where
        P: Fn(&CartLine) -> bool,
    {
        self.lines
            .iter()
            .filter(|l| predicate(l))
            .map(CartLine::line_total)
            .sum()
    }

    /// Tax over the lines matching `predicate`, each line rounded
    /// half-up at its own category rate before summing.
    pub fn tax_where<P>(&self, predicate: P) -> Money
    where
        P: Fn(&CartLine) -> bool,
    {
        self.lines
            .iter()
            .filter(|l| predicate(l))
            .map(CartLine::tax)
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
