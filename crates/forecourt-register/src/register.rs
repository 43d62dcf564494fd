//! # Register
//!
//! Orchestrates one checkout session against the boundary collaborators:
//! look up products, mutate the session, price it, and submit the
//! finalized transaction.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit()                                                               │
//! │    1. price the session (engine, pure)                                  │
//! │    2. run finalizer validation, mint stamp (id, TXN number, cashier)    │
//! │    3. await the transaction sink                                        │
//! │         │                                                               │
//! │         ├── sink error ──► session untouched, retryable                 │
//! │         │                                                               │
//! │         └── accepted ───► session reset for the next customer,          │
//! │                           receipt returned                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use forecourt_core::checkout::PriceBreakdown;
use forecourt_core::finalize::{finalize, TransactionStamp};
use forecourt_core::money::Money;
use forecourt_core::types::{FinalizedTransaction, PaymentMethod, Product};
use forecourt_core::validation::validate_barcode;

use crate::config::RegisterConfig;
use crate::error::{RegisterError, RegisterResult};
use crate::providers::{Catalog, IdentityContext, PromotionSource, TransactionSink};
use crate::session::CheckoutSession;

// =============================================================================
// Completed Checkout
// =============================================================================

/// What the register hands back after a successful submission — enough
/// for the frontend to render a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCheckout {
    /// Store name from the register configuration.
    pub store_name: String,

    /// The payload the sink accepted.
    pub transaction: FinalizedTransaction,

    /// Change due back to the customer (cash only).
    pub change_cents: Option<i64>,
}

// =============================================================================
// Register
// =============================================================================

/// A single point-of-sale register: one session, one cashier, one set of
/// boundary collaborators. The register owns the session exclusively —
/// one cart belongs to exactly one in-progress checkout.
#[derive(Debug)]
pub struct Register<C, P, S, I> {
    catalog: C,
    promotions: P,
    sink: S,
    identity: I,
    config: RegisterConfig,
    session: CheckoutSession,
}

impl<C, P, S, I> Register<C, P, S, I>
where
    C: Catalog,
    P: PromotionSource,
    S: TransactionSink,
    I: IdentityContext,
{
    /// Creates a register with a fresh session.
    pub fn new(catalog: C, promotions: P, sink: S, identity: I, config: RegisterConfig) -> Self {
        Register {
            catalog,
            promotions,
            sink,
            identity,
            config,
            session: CheckoutSession::new(),
        }
    }

    /// The current session, for display.
    pub fn session(&self) -> &CheckoutSession {
        &self.session
    }

    /// Adds a product to the session by catalog id.
    pub fn add_product(&mut self, product_id: &str, quantity: i64) -> RegisterResult<()> {
        debug!(product_id = %product_id, quantity = %quantity, "add_product");

        let product = self
            .catalog
            .product_by_id(product_id)
            .ok_or_else(|| RegisterError::ProductNotFound(product_id.to_string()))?;

        self.add_to_session(product, quantity)
    }

    /// Adds a product to the session by scanned or typed barcode.
    pub fn scan_barcode(&mut self, input: &str, quantity: i64) -> RegisterResult<()> {
        let barcode = validate_barcode(input).map_err(forecourt_core::CoreError::from)?;
        debug!(barcode = %barcode, quantity = %quantity, "scan_barcode");

        let product = self
            .catalog
            .product_by_barcode(&barcode)
            .ok_or_else(|| RegisterError::ProductNotFound(barcode))?;

        self.add_to_session(product, quantity)
    }

    fn add_to_session(&mut self, product: Product, quantity: i64) -> RegisterResult<()> {
        if !product.is_active {
            return Err(RegisterError::ProductInactive(product.name));
        }
        self.session.add_product(&product, quantity)?;
        Ok(())
    }

    /// Sets a line's quantity; zero or negative removes it.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> RegisterResult<()> {
        debug!(product_id = %product_id, quantity = %quantity, "set_quantity");
        self.session.set_quantity(product_id, quantity)?;
        Ok(())
    }

    /// Removes a line. Idempotent.
    pub fn remove_product(&mut self, product_id: &str) {
        debug!(product_id = %product_id, "remove_product");
        self.session.remove_product(product_id);
    }

    /// Selects the payment method.
    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        debug!(?method, "select_payment_method");
        self.session.select_payment_method(method);
    }

    /// Sets the cashier-entered discount.
    pub fn set_manual_discount(&mut self, amount: Money) -> RegisterResult<()> {
        self.session.set_manual_discount(amount)?;
        Ok(())
    }

    /// Records the cash amount tendered.
    pub fn set_tendered(&mut self, amount: Money) -> RegisterResult<()> {
        self.session.set_tendered(amount)?;
        Ok(())
    }

    /// Abandons the current checkout.
    pub fn cancel(&mut self) {
        info!("checkout cancelled");
        self.session.cancel();
    }

    /// Prices the session now. Invoked by the frontend after every
    /// mutation; the previous breakdown is replaced wholesale.
    pub fn breakdown(&self) -> PriceBreakdown {
        self.breakdown_at(Utc::now())
    }

    /// Prices the session at an explicit instant.
    pub fn breakdown_at(&self, now: DateTime<Utc>) -> PriceBreakdown {
        self.session.breakdown(&self.promotions.promotions(), now)
    }

    /// Finalizes and submits the current checkout.
    ///
    /// On any validation or sink failure the session is left untouched
    /// and the whole operation can be retried after adjusting inputs.
    pub async fn submit(&mut self) -> RegisterResult<CompletedCheckout> {
        self.submit_at(Utc::now()).await
    }

    /// Finalizes and submits at an explicit instant.
    pub async fn submit_at(&mut self, now: DateTime<Utc>) -> RegisterResult<CompletedCheckout> {
        let breakdown = self.breakdown_at(now);

        let stamp = TransactionStamp {
            id: Uuid::new_v4().to_string(),
            transaction_number: generate_transaction_number(now),
            cashier_id: self.identity.current_cashier(),
            register_id: self.config.register_id.clone(),
            finalized_at: now,
        };

        let finalization = finalize(
            self.session.cart(),
            &breakdown,
            self.session.payment_method(),
            self.session.tendered(),
            stamp,
        )?;

        let receipt = self.sink.submit(&finalization.transaction).await?;

        info!(
            transaction_id = %receipt.transaction_id,
            transaction_number = %finalization.transaction.transaction_number,
            total = %finalization.transaction.total_cents,
            items = finalization.transaction.items.len(),
            "transaction submitted"
        );

        // Only a sink-accepted transaction clears the session.
        self.session.reset();

        Ok(CompletedCheckout {
            store_name: self.config.store_name.clone(),
            transaction: finalization.transaction,
            change_cents: finalization.change.map(|c| c.cents()),
        })
    }
}

/// Generates a human-readable transaction number from the finalization
/// instant. Deterministic given `now`, which keeps submissions testable.
fn generate_transaction_number(now: DateTime<Utc>) -> String {
    format!(
        "TXN-{}-{:04}",
        now.format("%y%m%d%H%M%S"),
        now.timestamp_subsec_micros() % 10000
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;

    use forecourt_core::promotion::{EligibilityScope, Promotion, PromotionKind};
    use forecourt_core::types::Category;
    use forecourt_core::CoreError;

    use crate::providers::{SinkError, SubmissionReceipt};

    // -------------------------------------------------------------------------
    // In-memory collaborators
    // -------------------------------------------------------------------------

    struct MemoryCatalog {
        products: Vec<Product>,
    }

    impl Catalog for MemoryCatalog {
        fn product_by_id(&self, id: &str) -> Option<Product> {
            self.products.iter().find(|p| p.id == id).cloned()
        }

        fn product_by_barcode(&self, barcode: &str) -> Option<Product> {
            self.products
                .iter()
                .find(|p| p.barcode.as_deref() == Some(barcode))
                .cloned()
        }
    }

    struct StaticPromotions(Vec<Promotion>);

    impl PromotionSource for StaticPromotions {
        fn promotions(&self) -> Vec<Promotion> {
            self.0.clone()
        }
    }

    struct StaticIdentity;

    impl IdentityContext for StaticIdentity {
        fn current_cashier(&self) -> String {
            "cashier-7".to_string()
        }
    }

    /// Records accepted payloads; optionally fails every submission.
    struct RecordingSink {
        accepted: Mutex<Vec<FinalizedTransaction>>,
        fail: bool,
    }

    impl RecordingSink {
        fn new() -> Self {
            RecordingSink {
                accepted: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            RecordingSink {
                accepted: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    impl TransactionSink for RecordingSink {
        async fn submit(
            &self,
            transaction: &FinalizedTransaction,
        ) -> Result<SubmissionReceipt, SinkError> {
            if self.fail {
                return Err(SinkError::Unavailable("connection refused".to_string()));
            }
            self.accepted.lock().unwrap().push(transaction.clone());
            Ok(SubmissionReceipt {
                transaction_id: transaction.id.clone(),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    fn product(id: &str, barcode: &str, price_cents: i64, food_stamp: bool) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            description: None,
            barcode: Some(barcode.to_string()),
            price_cents,
            cost_cents: 0,
            category: Some(Category {
                id: "grocery".to_string(),
                name: "Grocery".to_string(),
                tax_rate_bps: 1000,
                is_active: true,
            }),
            current_stock: 20,
            food_stamp_eligible: food_stamp,
            is_active: true,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn register_with(
        products: Vec<Product>,
        promotions: Vec<Promotion>,
        sink: RecordingSink,
    ) -> Register<MemoryCatalog, StaticPromotions, RecordingSink, StaticIdentity> {
        Register::new(
            MemoryCatalog { products },
            StaticPromotions(promotions),
            sink,
            StaticIdentity,
            RegisterConfig::default(),
        )
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_product_and_scan_barcode() {
        let mut register = register_with(
            vec![product("soda", "0490001", 1000, false)],
            Vec::new(),
            RecordingSink::new(),
        );

        register.add_product("soda", 1).unwrap();
        register.scan_barcode(" 0490001 ", 1).unwrap();

        // Same product through both paths merges into one line.
        assert_eq!(register.session().cart().line_count(), 1);
        assert_eq!(register.session().cart().total_quantity(), 2);
    }

    #[test]
    fn test_unknown_product_is_reported() {
        let mut register = register_with(Vec::new(), Vec::new(), RecordingSink::new());

        let err = register.add_product("ghost", 1).unwrap_err();
        assert!(matches!(err, RegisterError::ProductNotFound(_)));

        let err = register.scan_barcode("123456", 1).unwrap_err();
        assert!(matches!(err, RegisterError::ProductNotFound(_)));
    }

    #[test]
    fn test_inactive_product_is_rejected() {
        let mut inactive = product("soda", "0490001", 1000, false);
        inactive.is_active = false;

        let mut register = register_with(vec![inactive], Vec::new(), RecordingSink::new());
        let err = register.add_product("soda", 1).unwrap_err();
        assert!(matches!(err, RegisterError::ProductInactive(_)));
        assert!(register.session().cart().is_empty());
    }

    #[test]
    fn test_breakdown_applies_provider_promotions() {
        let promo = Promotion {
            id: "p1".to_string(),
            name: "Storewide 20%".to_string(),
            description: None,
            kind: PromotionKind::Percentage { rate_bps: 2000 },
            min_purchase_cents: Some(500),
            scope: EligibilityScope::Unrestricted,
            is_active: true,
            starts_at: now() - chrono::Duration::days(1),
            ends_at: now() + chrono::Duration::days(1),
        };

        let mut register = register_with(
            vec![product("soda", "0490001", 1000, false)],
            vec![promo],
            RecordingSink::new(),
        );
        register.add_product("soda", 1).unwrap();

        let breakdown = register.breakdown_at(now());
        assert_eq!(breakdown.promotion_discount_cents, 200);
        assert_eq!(breakdown.grand_total_cents, 900); // 10.00 + 1.00 tax − 2.00
    }

    #[tokio::test]
    async fn test_submit_clears_session_and_records_payload() {
        let mut register = register_with(
            vec![product("soda", "0490001", 1000, false)],
            Vec::new(),
            RecordingSink::new(),
        );

        register.add_product("soda", 1).unwrap();
        register.set_tendered(Money::from_cents(2000)).unwrap();

        let completed = register.submit_at(now()).await.unwrap();

        assert_eq!(completed.transaction.total_cents, 1100);
        assert_eq!(completed.transaction.cashier_id, "cashier-7");
        assert_eq!(completed.transaction.register_id, "register-01");
        assert!(completed.transaction.transaction_number.starts_with("TXN-"));
        assert_eq!(completed.change_cents, Some(900));

        // Session is ready for the next customer.
        assert!(register.session().cart().is_empty());
        assert_eq!(register.sink.accepted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_validation_failure_keeps_session() {
        let mut register = register_with(
            vec![product("soda", "0490001", 1000, false)],
            Vec::new(),
            RecordingSink::new(),
        );

        register.add_product("soda", 1).unwrap();
        register.set_tendered(Money::from_cents(500)).unwrap();

        let err = register.submit_at(now()).await.unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Core(CoreError::InsufficientPayment { .. })
        ));

        // Adjust the tender and retry the same checkout.
        assert_eq!(register.session().cart().total_quantity(), 1);
        register.set_tendered(Money::from_cents(1100)).unwrap();
        let completed = register.submit_at(now()).await.unwrap();
        assert_eq!(completed.change_cents, Some(0));
    }

    #[tokio::test]
    async fn test_submit_sink_failure_keeps_session() {
        let mut register = register_with(
            vec![product("soda", "0490001", 1000, false)],
            Vec::new(),
            RecordingSink::failing(),
        );

        register.add_product("soda", 1).unwrap();
        register.select_payment_method(PaymentMethod::CreditCard);

        let err = register.submit_at(now()).await.unwrap_err();
        assert!(matches!(err, RegisterError::Sink(_)));

        // Nothing was cleared; the submission can be retried.
        assert_eq!(register.session().cart().total_quantity(), 1);
    }

    #[tokio::test]
    async fn test_mixed_cart_ebt_round_trip() {
        let mut register = register_with(
            vec![
                product("milk", "0000001", 200, true),
                product("soda", "0000002", 1000, false),
            ],
            Vec::new(),
            RecordingSink::new(),
        );

        register.add_product("milk", 1).unwrap();
        register.add_product("soda", 1).unwrap();
        register.select_payment_method(PaymentMethod::Ebt);

        let err = register.submit_at(now()).await.unwrap_err();
        assert!(matches!(
            err,
            RegisterError::Core(CoreError::MixedCartRequiresSplitPayment { .. })
        ));

        // The caller splits manually: drop the non-eligible line, retry.
        register.remove_product("soda");
        let completed = register.submit_at(now()).await.unwrap();
        assert_eq!(completed.transaction.total_cents, 200); // untaxed by EBT
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let line_json = serde_json::to_value(FinalizedTransaction {
            id: "t1".to_string(),
            transaction_number: "TXN-1".to_string(),
            payment_method: PaymentMethod::Cash,
            subtotal_cents: 100,
            tax_cents: 8,
            discount_cents: 0,
            total_cents: 108,
            cashier_id: "cashier-7".to_string(),
            register_id: "register-01".to_string(),
            created_at: now(),
            items: Vec::new(),
        })
        .unwrap();

        assert!(line_json.get("transactionNumber").is_some());
        assert!(line_json.get("paymentMethod").is_some());
        assert!(line_json.get("totalCents").is_some());
    }

    #[test]
    fn test_transaction_number_format() {
        let number = generate_transaction_number(now());
        assert!(number.starts_with("TXN-240615"));
    }
}
