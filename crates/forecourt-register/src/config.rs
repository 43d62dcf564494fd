//! # Register Configuration
//!
//! Store and register identity loaded at startup.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no locking is
//! needed. If hot-reloading is added later, wrap in `RwLock`.

use serde::{Deserialize, Serialize};

/// Register configuration.
///
/// ## Fields
/// Defaults are suitable for development; deployments configure these
/// per store and per register.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterConfig {
    /// Store name (displayed on receipts).
    pub store_name: String,

    /// Identifier of this register, attached to every transaction.
    pub register_id: String,

    /// Currency code (ISO 4217).
    pub currency_code: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        RegisterConfig {
            store_name: "Forecourt Mart".to_string(),
            register_id: "register-01".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}
