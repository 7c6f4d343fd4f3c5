use chrono::Duration;
use once_cell::sync::Lazy;

use crate::engine::BillingCycle;

/// key: lifecycle-config -> batch run cadence
///
/// Seconds between lifecycle runs. Defaults to one day; the exact wall-clock
/// instant of a run is a deployment concern, not a correctness property.
pub static RUN_INTERVAL_SECS: Lazy<u64> = Lazy::new(|| {
    std::env::var("RUN_INTERVAL_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(86_400)
});

/// key: lifecycle-config -> expiring warning window before end_date
pub static EXPIRING_WINDOW_DAYS: Lazy<i64> = Lazy::new(|| {
    std::env::var("EXPIRING_WINDOW_DAYS")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value >= 0)
        .unwrap_or(7)
});

/// key: lifecycle-config -> grace window after end_date before expiry
pub static GRACE_PERIOD_DAYS: Lazy<i64> = Lazy::new(|| {
    std::env::var("GRACE_PERIOD_DAYS")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value >= 0)
        .unwrap_or(7)
});

/// key: lifecycle-config -> billing period length on renewal
pub static RENEWAL_PERIOD_DAYS: Lazy<i64> = Lazy::new(|| {
    std::env::var("RENEWAL_PERIOD_DAYS")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(30)
});

/// Optional JSON snapshot loaded into the in-memory stores at startup.
pub static SEED_FILE: Lazy<Option<String>> = Lazy::new(|| {
    std::env::var("SEED_FILE")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
});

pub fn billing_cycle_from_env() -> BillingCycle {
    BillingCycle {
        expiring_window: Duration::days(*EXPIRING_WINDOW_DAYS),
        grace_period: Duration::days(*GRACE_PERIOD_DAYS),
        renewal_period: Duration::days(*RENEWAL_PERIOD_DAYS),
    }
}
