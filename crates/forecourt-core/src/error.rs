//! # Error Types
//!
//! Domain-specific error types for forecourt-core.
//!
//! ## Error Philosophy
//! Every variant here is a **recoverable local validation failure**: the
//! caller corrects the condition (adjusts a quantity, changes the payment
//! method, adds tender) and retries the same operation. None of them are
//! fatal to engine state, and a rejected mutation always leaves prior
//! state unchanged — the engine never clamps an invalid operation to the
//! "closest valid" result.
//!
//! Malformed provider snapshots (a line item with no matching product, a
//! category rate out of range) are precondition violations, not members
//! of this enum.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts due)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Checkout engine errors.
///
/// These represent business rule violations surfaced to the cashier.
/// Each variant maps to a user-facing message in the admin UI.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product snapshot shows zero stock; nothing can be added.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// The requested quantity exceeds the stock snapshot.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to cart (qty: 5)
    ///      │
    ///      ▼
    /// Snapshot stock: 3
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Cola 330ml", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 Cola 330ml available in stock"
    /// ```
    #[error("cannot add {requested} × {name}: only {available} available in stock")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Finalization attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// EBT payment selected but no food-stamp-eligible items in the cart.
    #[error("no food stamp eligible items in cart")]
    NoEligibleItems,

    /// EBT payment selected for a cart that also contains non-eligible
    /// items. The whole transaction is rejected; the caller re-enters it
    /// as two separate checkouts. Carries the non-eligible total
    /// (subtotal + tax) so the UI can present the amount due otherwise.
    #[error("cart contains non-eligible items totaling {other_due_cents} cents; pay them separately")]
    MixedCartRequiresSplitPayment { other_due_cents: i64 },

    /// Cash tendered is below the grand total.
    #[error("insufficient payment: {tendered_cents} tendered, {required_cents} required")]
    InsufficientPayment {
        required_cents: i64,
        tendered_cents: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
