//! # Register Error Type
//!
//! Unified error type for register operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Engine rule violation ── CoreError ───────┐                            │
//! │  Catalog miss ─────────── ProductNotFound ─┼──► RegisterError ──► UI    │
//! │  Inactive product ─────── ProductInactive ─┤                            │
//! │  Store failure ────────── SinkError ───────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable: the cashier adjusts the input and
//! retries; the session is never left half-mutated.

use forecourt_core::CoreError;
use thiserror::Error;

use crate::providers::SinkError;

/// Errors surfaced by register operations.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The catalog has no product for the given id or barcode.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// The product exists but is not available for sale.
    #[error("product is not available for sale: {0}")]
    ProductInactive(String),

    /// An engine rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The transaction store rejected or never received the submission.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Convenience type alias for Results with RegisterError.
pub type RegisterResult<T> = Result<T, RegisterError>;
