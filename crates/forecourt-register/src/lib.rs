//! # forecourt-register: Checkout Session & Boundary Contracts
//!
//! The calling layer around the pure engine in `forecourt-core`.
//!
//! ## Module Organization
//! ```text
//! forecourt_register/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── session.rs      ◄─── CheckoutSession: one customer's cart + tender
//! ├── register.rs     ◄─── Register: orchestration over the collaborators
//! ├── providers.rs    ◄─── Catalog / PromotionSource / TransactionSink /
//! │                        IdentityContext boundary traits
//! ├── config.rs       ◄─── Store & register identity
//! └── error.rs        ◄─── Unified register error
//! ```
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One Register ──owns──► one CheckoutSession ──owns──► one Cart          │
//! │                                                                         │
//! │  A cart belongs to exactly one in-progress checkout. The engine         │
//! │  enforces nothing about concurrency; this layer's ownership does.       │
//! │  The engine is re-entered explicitly (breakdown/submit); there is no    │
//! │  background recomputation and no ambient state inside the engine.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod providers;
pub mod register;
pub mod session;

pub use config::RegisterConfig;
pub use error::{RegisterError, RegisterResult};
pub use providers::{
    Catalog, IdentityContext, PromotionSource, SinkError, SubmissionReceipt, TransactionSink,
};
pub use register::{CompletedCheckout, Register};
pub use session::CheckoutSession;
