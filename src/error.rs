use thiserror::Error;
use uuid::Uuid;

/// Failure of a whole lifecycle run. Per-subscription failures never surface
/// here; they are logged and counted inside the run report.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("a lifecycle run is already in progress")]
    Overlapping,
    #[error("failed to enumerate subscriptions: {0}")]
    Enumerate(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invoice {0} not found")]
    InvoiceNotFound(Uuid),
}
