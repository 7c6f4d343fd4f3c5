use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// key: lifecycle-models -> subscriptions,invoices,plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    PendingActivation,
    Active,
    Expiring,
    Expired,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::PendingActivation => "PENDING_ACTIVATION",
            SubscriptionStatus::Active => "ACTIVE",
            SubscriptionStatus::Expiring => "EXPIRING",
            SubscriptionStatus::Expired => "EXPIRED",
            SubscriptionStatus::Cancelled => "CANCELLED",
        }
    }
}

/// One customer's subscription to one internet plan. `end_date` is the
/// current billing-period boundary and only ever moves forward, via renewal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub internet_plan_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SubscriptionStatus,
}

impl Subscription {
    /// An active subscription inside the warning window before `end_date`.
    pub fn is_expiring_soon(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.status == SubscriptionStatus::Active
            && now >= self.end_date - window
            && now < self.end_date
    }

    /// True once `now` has passed `end_date` plus the post-expiry grace window.
    pub fn is_grace_period_over(&self, now: DateTime<Utc>, grace: Duration) -> bool {
        now > self.end_date + grace
    }
}

/// Invoice for exactly one billing period of one subscription. The
/// `(subscription_id, due_date)` pair is the natural key; `due_date` equals
/// the subscription's `end_date` at issue time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub subscription_id: Uuid,
    pub issue_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub amount_due: f64,
    pub amount_paid: f64,
    pub is_paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternetPlan {
    pub id: Uuid,
    pub name: String,
    pub speed: String,
    pub price: f64,
    pub bandwidth: String,
    pub is_active: bool,
}
