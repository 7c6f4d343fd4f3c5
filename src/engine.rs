use std::sync::Arc;

use anyhow::Result;
use chrono::Duration;
use tracing::{debug, info, warn};

use crate::models::{Subscription, SubscriptionStatus};
use crate::store::{Clock, InvoiceLedger, PlanCatalog, SubscriptionStore};

/// Billing-cycle windows. The defaults are load-bearing: existing data was
/// produced against a 7-day warning window, a 7-day grace window, and 30-day
/// renewal periods.
#[derive(Debug, Clone, Copy)]
pub struct BillingCycle {
    pub expiring_window: Duration,
    pub grace_period: Duration,
    pub renewal_period: Duration,
}

impl Default for BillingCycle {
    fn default() -> Self {
        Self {
            expiring_window: Duration::days(7),
            grace_period: Duration::days(7),
            renewal_period: Duration::days(30),
        }
    }
}

/// What the engine decided for one subscription in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOutcome {
    /// No boundary crossed, or the subscription is cancelled.
    Unchanged,
    /// Entered the warning window; nothing else happens in the same pass.
    MarkedExpiring,
    /// Period invoice was paid: the subscription rolled into the next period.
    /// `invoice_generated` is false when no active plan could price it.
    Renewed { invoice_generated: bool },
    /// Grace period ran out on an unpaid invoice.
    Expired,
    /// Grace period is over but no invoice exists for the period; without
    /// billing evidence the engine refuses to decide.
    MissingInvoice,
}

/// key: lifecycle-engine -> per-subscription state machine
///
/// Stateless between runs: every decision is recomputed from
/// `(status, end_date, now, invoice)`, so re-running against unchanged data
/// is a no-op.
pub struct LifecycleEngine {
    subscriptions: Arc<dyn SubscriptionStore>,
    invoices: Arc<dyn InvoiceLedger>,
    plans: Arc<dyn PlanCatalog>,
    clock: Arc<dyn Clock>,
    cycle: BillingCycle,
}

impl LifecycleEngine {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        invoices: Arc<dyn InvoiceLedger>,
        plans: Arc<dyn PlanCatalog>,
        clock: Arc<dyn Clock>,
        cycle: BillingCycle,
    ) -> Self {
        Self {
            subscriptions,
            invoices,
            plans,
            clock,
            cycle,
        }
    }

    pub async fn process(&self, subscription: &Subscription) -> Result<LifecycleOutcome> {
        // Cancellation is terminal and owned by the manual update flow.
        if subscription.status == SubscriptionStatus::Cancelled {
            return Ok(LifecycleOutcome::Unchanged);
        }

        let now = self.clock.now();

        if subscription.is_expiring_soon(now, self.cycle.expiring_window) {
            let mut updated = subscription.clone();
            updated.status = SubscriptionStatus::Expiring;
            self.subscriptions.save(&updated).await?;
            info!(
                subscription = %subscription.id,
                end_date = %subscription.end_date,
                "subscription entering expiry warning window"
            );
            return Ok(LifecycleOutcome::MarkedExpiring);
        }

        if !subscription.is_grace_period_over(now, self.cycle.grace_period) {
            debug!(
                subscription = %subscription.id,
                status = subscription.status.as_str(),
                end_date = %subscription.end_date,
                "subscription within current period or grace window"
            );
            return Ok(LifecycleOutcome::Unchanged);
        }

        let Some(invoice) = self
            .invoices
            .find_due(subscription.id, subscription.end_date)
            .await?
        else {
            warn!(
                subscription = %subscription.id,
                due_date = %subscription.end_date,
                "no invoice found for elapsed period; skipping"
            );
            return Ok(LifecycleOutcome::MissingInvoice);
        };

        if invoice.is_paid {
            self.renew(subscription).await
        } else {
            let mut updated = subscription.clone();
            updated.status = SubscriptionStatus::Expired;
            self.subscriptions.save(&updated).await?;
            info!(
                subscription = %subscription.id,
                invoice = %invoice.id,
                "grace period over with unpaid invoice; subscription expired"
            );
            Ok(LifecycleOutcome::Expired)
        }
    }

    async fn renew(&self, subscription: &Subscription) -> Result<LifecycleOutcome> {
        let new_end_date = subscription.end_date + self.cycle.renewal_period;
        let mut renewed = subscription.clone();
        renewed.status = SubscriptionStatus::Active;
        renewed.end_date = new_end_date;
        self.subscriptions.save(&renewed).await?;

        // Renewal sticks even if pricing fails below; the missing next
        // invoice surfaces on the following run's grace check.
        let invoice_generated = match self
            .plans
            .find_active_by_id(subscription.internet_plan_id)
            .await?
        {
            Some(plan) => {
                let invoice = self
                    .invoices
                    .generate(
                        subscription.customer_id,
                        subscription.id,
                        new_end_date,
                        plan.price,
                    )
                    .await?;
                info!(
                    subscription = %subscription.id,
                    invoice = %invoice.id,
                    new_end_date = %new_end_date,
                    amount_due = plan.price,
                    "subscription renewed and next period invoiced"
                );
                true
            }
            None => {
                warn!(
                    subscription = %subscription.id,
                    plan = %subscription.internet_plan_id,
                    "no active plan for renewal; invoice generation skipped"
                );
                false
            }
        };

        Ok(LifecycleOutcome::Renewed { invoice_generated })
    }
}
