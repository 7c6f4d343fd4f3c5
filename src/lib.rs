pub mod config;
pub mod engine;
pub mod error;
pub mod memory;
pub mod models;
pub mod scheduler;
pub mod seed;
pub mod store;

pub use engine::{BillingCycle, LifecycleEngine, LifecycleOutcome};
pub use error::{LedgerError, RunError};
pub use models::{InternetPlan, Invoice, Subscription, SubscriptionStatus};
pub use scheduler::{spawn as spawn_lifecycle_scheduler, LifecycleScheduler, RunReport};
pub use store::{Clock, InvoiceLedger, PlanCatalog, SubscriptionStore, SystemClock};
