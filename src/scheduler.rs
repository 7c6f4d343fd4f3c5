use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::sync::Mutex;
use tokio::time;
use tracing::{info, warn};

use crate::config;
use crate::engine::{LifecycleEngine, LifecycleOutcome};
use crate::error::RunError;
use crate::store::SubscriptionStore;

/// Tally of one lifecycle run, logged when the run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub processed: usize,
    pub marked_expiring: usize,
    pub renewed: usize,
    pub expired: usize,
    pub missing_invoice: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunReport {
    fn record(&mut self, outcome: LifecycleOutcome) {
        match outcome {
            LifecycleOutcome::Unchanged => self.unchanged += 1,
            LifecycleOutcome::MarkedExpiring => self.marked_expiring += 1,
            LifecycleOutcome::Renewed { .. } => self.renewed += 1,
            LifecycleOutcome::Expired => self.expired += 1,
            LifecycleOutcome::MissingInvoice => self.missing_invoice += 1,
        }
    }
}

/// key: lifecycle-scheduler -> periodic batch driver
///
/// Walks the full subscription set once per trigger. Each subscription is an
/// independent unit of work: failures are logged and counted, never
/// propagated past the item. The run-guard mutex keeps triggers from
/// overlapping; a trigger that fires mid-run is skipped, not queued.
pub struct LifecycleScheduler {
    engine: LifecycleEngine,
    subscriptions: Arc<dyn SubscriptionStore>,
    run_guard: Mutex<()>,
}

impl LifecycleScheduler {
    pub fn new(engine: LifecycleEngine, subscriptions: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            engine,
            subscriptions,
            run_guard: Mutex::new(()),
        }
    }

    pub async fn run_once(&self) -> Result<RunReport, RunError> {
        let Ok(_token) = self.run_guard.try_lock() else {
            return Err(RunError::Overlapping);
        };

        // Only the enumeration itself is fatal for the run.
        let subscriptions = self
            .subscriptions
            .list_all()
            .await
            .map_err(RunError::Enumerate)?;

        let mut report = RunReport::default();
        for subscription in &subscriptions {
            report.processed += 1;
            match self.engine.process(subscription).await {
                Ok(outcome) => report.record(outcome),
                Err(err) => {
                    report.failed += 1;
                    warn!(
                        ?err,
                        subscription = %subscription.id,
                        "failed to process subscription; continuing run"
                    );
                }
            }
        }

        info!(
            processed = report.processed,
            marked_expiring = report.marked_expiring,
            renewed = report.renewed,
            expired = report.expired,
            missing_invoice = report.missing_invoice,
            unchanged = report.unchanged,
            failed = report.failed,
            "lifecycle run complete"
        );
        Ok(report)
    }
}

/// Drives `run_once` on a fixed interval until the process shuts down.
pub fn spawn(scheduler: Arc<LifecycleScheduler>) {
    let interval = StdDuration::from_secs(*config::RUN_INTERVAL_SECS);
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        loop {
            ticker.tick().await;
            match scheduler.run_once().await {
                Ok(_) => {}
                Err(RunError::Overlapping) => {
                    info!("previous lifecycle run still in progress; skipping trigger");
                }
                Err(err) => warn!(?err, "lifecycle run failed"),
            }
        }
    });
}
