use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::memory::{InMemoryInvoiceLedger, InMemoryPlanCatalog, InMemorySubscriptionStore};
use crate::models::{InternetPlan, Invoice, Subscription};

/// JSON snapshot the operator binary can load at startup, since the in-memory
/// backend starts empty and the CRUD surface lives elsewhere.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub plans: Vec<InternetPlan>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

impl Seed {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse seed file {}", path.display()))
    }

    pub fn load_into(
        self,
        subscriptions: &InMemorySubscriptionStore,
        invoices: &InMemoryInvoiceLedger,
        plans: &InMemoryPlanCatalog,
    ) {
        let counts = (
            self.plans.len(),
            self.subscriptions.len(),
            self.invoices.len(),
        );
        for plan in self.plans {
            plans.insert(plan);
        }
        for subscription in self.subscriptions {
            subscriptions.insert(subscription);
        }
        for invoice in self.invoices {
            invoices.insert(invoice);
        }
        info!(
            plans = counts.0,
            subscriptions = counts.1,
            invoices = counts.2,
            "seed snapshot loaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubscriptionStatus;
    use uuid::Uuid;

    #[test]
    fn parses_snapshot_document() {
        let plan_id = Uuid::new_v4();
        let sub_id = Uuid::new_v4();
        let raw = serde_json::json!({
            "plans": [{
                "id": plan_id,
                "name": "fiber-basic",
                "speed": "100Mbps",
                "price": 72.0,
                "bandwidth": "unlimited",
                "is_active": true
            }],
            "subscriptions": [{
                "id": sub_id,
                "customer_id": Uuid::new_v4(),
                "internet_plan_id": plan_id,
                "start_date": "2026-01-01T00:00:00Z",
                "end_date": "2026-01-31T00:00:00Z",
                "status": "ACTIVE"
            }]
        });

        let seed: Seed = serde_json::from_value(raw).unwrap();
        assert_eq!(seed.invoices.len(), 0);

        let subscriptions = InMemorySubscriptionStore::new();
        let invoices = InMemoryInvoiceLedger::new();
        let plans = InMemoryPlanCatalog::new();
        seed.load_into(&subscriptions, &invoices, &plans);

        let stored = subscriptions.get(sub_id).expect("seeded subscription");
        assert_eq!(stored.status, SubscriptionStatus::Active);
        assert_eq!(stored.internet_plan_id, plan_id);
    }
}
