//! # Boundary Contracts
//!
//! In-process contracts with the collaborators the engine does not
//! implement. The register consumes snapshots through these traits and
//! emits the finalized transaction through the sink; it never fetches,
//! caches or persists anything itself.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Engine Boundary                                    │
//! │                                                                         │
//! │  Catalog ──────────► Product snapshots (by id / by barcode)            │
//! │  PromotionSource ──► Promotion snapshots (engine filters activity      │
//! │                      itself; the provider's flag is not trusted alone) │
//! │  IdentityContext ──► acting cashier id (attached to the payload,       │
//! │                      never used in pricing)                             │
//! │  TransactionSink ──► accepts FinalizedTransaction, async, awaited      │
//! │                      by the register before the session is cleared     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Provider failures (network, storage) are opaque to the engine: a
//! provider either supplies a well-formed snapshot or the register
//! surfaces its error untouched.

use forecourt_core::types::{FinalizedTransaction, Product};
use forecourt_core::Promotion;
use thiserror::Error;

// =============================================================================
// Catalog
// =============================================================================

/// Supplies product snapshots, already fetched and internally consistent
/// (every embedded category exists upstream).
pub trait Catalog {
    /// Looks up a product by id. `None` when unknown.
    fn product_by_id(&self, id: &str) -> Option<Product>;

    /// Looks up a product by barcode. `None` when unknown.
    fn product_by_barcode(&self, barcode: &str) -> Option<Product>;
}

// =============================================================================
// Promotion Source
// =============================================================================

/// Supplies promotion snapshots. The engine applies its own activity
/// filter (flag + window) to whatever this returns.
pub trait PromotionSource {
    /// Returns the current promotion snapshots.
    fn promotions(&self) -> Vec<Promotion>;
}

// =============================================================================
// Identity Context
// =============================================================================

/// Supplies the acting cashier. The id is attached to the submission
/// payload and plays no part in any pricing computation.
pub trait IdentityContext {
    /// Returns the id of the cashier operating this register.
    fn current_cashier(&self) -> String;
}

// =============================================================================
// Transaction Sink
// =============================================================================

/// Errors from the external transaction store. Opaque to the engine;
/// the register reports them and leaves the session untouched so the
/// submission can be retried.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The store rejected the payload.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("transaction store unavailable: {0}")]
    Unavailable(String),
}

/// Acknowledgement from the transaction store.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    /// Id the store recorded the transaction under.
    pub transaction_id: String,
}

/// Accepts a [`FinalizedTransaction`] payload. The only async surface in
/// the workspace: the register awaits the submission before clearing the
/// session.
pub trait TransactionSink {
    /// Submits the payload, returning the store's acknowledgement.
    fn submit(
        &self,
        transaction: &FinalizedTransaction,
    ) -> impl std::future::Future<Output = Result<SubmissionReceipt, SinkError>> + Send;
}
