use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use subscription_engine::config;
use subscription_engine::engine::LifecycleEngine;
use subscription_engine::memory::{
    InMemoryInvoiceLedger, InMemoryPlanCatalog, InMemorySubscriptionStore,
};
use subscription_engine::scheduler::{self, LifecycleScheduler};
use subscription_engine::seed::Seed;
use subscription_engine::store::{Clock, InvoiceLedger, PlanCatalog, SubscriptionStore, SystemClock};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    dotenvy::dotenv().ok();

    let subscriptions = Arc::new(InMemorySubscriptionStore::new());
    let invoices = Arc::new(InMemoryInvoiceLedger::new());
    let plans = Arc::new(InMemoryPlanCatalog::new());

    if let Some(path) = config::SEED_FILE.as_deref() {
        Seed::from_file(path)?.load_into(&subscriptions, &invoices, &plans);
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let engine = LifecycleEngine::new(
        subscriptions.clone() as Arc<dyn SubscriptionStore>,
        invoices as Arc<dyn InvoiceLedger>,
        plans as Arc<dyn PlanCatalog>,
        clock,
        config::billing_cycle_from_env(),
    );
    let lifecycle = Arc::new(LifecycleScheduler::new(
        engine,
        subscriptions as Arc<dyn SubscriptionStore>,
    ));

    tracing::info!(
        interval_secs = *config::RUN_INTERVAL_SECS,
        "starting subscription lifecycle scheduler"
    );
    scheduler::spawn(lifecycle);

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}
