use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{InternetPlan, Invoice, Subscription};

/// key: lifecycle-store -> subscription persistence seam
///
/// The engine enumerates the full subscription set once per run and writes
/// back individual records. `list_all` returns a snapshot; mutations made
/// during a run are not expected to be visible to later items of the same run.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Subscription>>;
    async fn save(&self, subscription: &Subscription) -> Result<()>;
}

/// key: lifecycle-ledger -> invoice creation and settlement
#[async_trait]
pub trait InvoiceLedger: Send + Sync {
    /// Creates and persists a fresh invoice for the period ending at
    /// `due_date`, with nothing paid yet. No uniqueness check is performed;
    /// callers must not issue twice for the same `(subscription_id, due_date)`.
    async fn generate(
        &self,
        customer_id: Uuid,
        subscription_id: Uuid,
        due_date: DateTime<Utc>,
        amount_due: f64,
    ) -> Result<Invoice>;

    /// Looks up the invoice by its natural key. `Ok(None)` when no invoice
    /// exists for the period yet; that is a decision input, not an error.
    async fn find_due(
        &self,
        subscription_id: Uuid,
        due_date: DateTime<Utc>,
    ) -> Result<Option<Invoice>>;

    /// Records a payment against an invoice. The invoice settles (`is_paid`)
    /// only when `amount_paid` equals `amount_due` exactly.
    async fn record_payment(&self, invoice_id: Uuid, amount_paid: f64) -> Result<Invoice>;
}

/// key: lifecycle-catalog -> renewal pricing
#[async_trait]
pub trait PlanCatalog: Send + Sync {
    /// Returns the plan only while it is active; inactive and missing plans
    /// are both `Ok(None)` and mean the renewal cannot be priced.
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<InternetPlan>>;
}

/// Injected time source so the engine's decisions are deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
