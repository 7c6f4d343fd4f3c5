use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{InternetPlan, Invoice, Subscription};
use crate::store::{Clock, InvoiceLedger, PlanCatalog, SubscriptionStore};

/// key: memory-store -> DashMap-backed store implementations
///
/// The engine only needs find/save/enumerate over its records, so the
/// reference backend is a set of in-process maps. Anything persistent can be
/// slotted in behind the same traits.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    records: DashMap<Uuid, Subscription>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, subscription: Subscription) {
        self.records.insert(subscription.id, subscription);
    }

    pub fn get(&self, id: Uuid) -> Option<Subscription> {
        self.records.get(&id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn list_all(&self) -> Result<Vec<Subscription>> {
        // Copies out a snapshot; writes made during a run are not reflected.
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn save(&self, subscription: &Subscription) -> Result<()> {
        self.records.insert(subscription.id, subscription.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryInvoiceLedger {
    records: DashMap<Uuid, Invoice>,
    clock: Option<Arc<dyn Clock>>,
}

impl InMemoryInvoiceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue dates come from the supplied clock instead of the system clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: DashMap::new(),
            clock: Some(clock),
        }
    }

    pub fn insert(&self, invoice: Invoice) {
        self.records.insert(invoice.id, invoice);
    }

    pub fn get(&self, id: Uuid) -> Option<Invoice> {
        self.records.get(&id).map(|entry| entry.value().clone())
    }

    pub fn invoices_for_subscription(&self, subscription_id: Uuid) -> Vec<Invoice> {
        self.records
            .iter()
            .filter(|entry| entry.subscription_id == subscription_id)
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn now(&self) -> DateTime<Utc> {
        match &self.clock {
            Some(clock) => clock.now(),
            None => Utc::now(),
        }
    }
}

#[async_trait]
impl InvoiceLedger for InMemoryInvoiceLedger {
    async fn generate(
        &self,
        customer_id: Uuid,
        subscription_id: Uuid,
        due_date: DateTime<Utc>,
        amount_due: f64,
    ) -> Result<Invoice> {
        let invoice = Invoice {
            id: Uuid::new_v4(),
            customer_id,
            subscription_id,
            issue_date: self.now(),
            due_date,
            amount_due,
            amount_paid: 0.0,
            is_paid: false,
        };
        self.records.insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn find_due(
        &self,
        subscription_id: Uuid,
        due_date: DateTime<Utc>,
    ) -> Result<Option<Invoice>> {
        Ok(self
            .records
            .iter()
            .find(|entry| entry.subscription_id == subscription_id && entry.due_date == due_date)
            .map(|entry| entry.value().clone()))
    }

    async fn record_payment(&self, invoice_id: Uuid, amount_paid: f64) -> Result<Invoice> {
        let mut entry = self
            .records
            .get_mut(&invoice_id)
            .ok_or(LedgerError::InvoiceNotFound(invoice_id))?;
        entry.amount_paid = amount_paid;
        // Exact-equality settlement; over- and underpayment stay unsettled.
        entry.is_paid = amount_paid == entry.amount_due;
        Ok(entry.value().clone())
    }
}

#[derive(Default)]
pub struct InMemoryPlanCatalog {
    records: DashMap<Uuid, InternetPlan>,
}

impl InMemoryPlanCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, plan: InternetPlan) {
        self.records.insert(plan.id, plan);
    }
}

#[async_trait]
impl PlanCatalog for InMemoryPlanCatalog {
    async fn find_active_by_id(&self, id: Uuid) -> Result<Option<InternetPlan>> {
        Ok(self
            .records
            .get(&id)
            .filter(|plan| plan.is_active)
            .map(|plan| plan.value().clone()))
    }
}
