//! Periodic background work
//!
//! - Subscription sweep: expire lapsed subscriptions, purge menu data after the grace period
//! - Rate limiter cleanup

use std::time::Duration;

use shared::util::DAY_MILLIS;
use sqlx::SqlitePool;
use tokio::task::JoinHandle;

use crate::auth::rate_limit::RateLimiter;
use crate::db;
use crate::util::now_millis;

/// Interval of the rate limiter cleanup
const RATE_LIMIT_CLEANUP_SECS: u64 = 300;

/// What one sweep changed
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Tenants whose subscription just lapsed
    pub expired: Vec<String>,
    /// Tenants whose restaurant (with categories and items) was deleted
    pub purged: Vec<String>,
}

/// One pass of the subscription sweep at `now`.
pub async fn run_sweep(
    pool: &SqlitePool,
    now: i64,
    purge_grace_days: i64,
) -> Result<SweepReport, sqlx::Error> {
    let expired = db::subscriptions::mark_expired(pool, now).await?;
    for tenant_id in &expired {
        tracing::info!(target: "audit", tenant_id = %tenant_id, "Subscription expired");
    }

    let cutoff = now - purge_grace_days.max(0) * DAY_MILLIS;
    let mut purged = Vec::new();
    for tenant_id in db::subscriptions::list_purgeable(pool, cutoff).await? {
        if db::restaurants::delete(pool, &tenant_id).await? {
            tracing::info!(target: "audit", tenant_id = %tenant_id, "Restaurant data purged");
            purged.push(tenant_id);
        }
    }

    Ok(SweepReport { expired, purged })
}

/// Run the sweep every `interval_secs` (first pass immediately).
pub fn spawn_subscription_sweep(
    pool: SqlitePool,
    interval_secs: u64,
    purge_grace_days: i64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            interval.tick().await;
            match run_sweep(&pool, now_millis(), purge_grace_days).await {
                Ok(report) if report != SweepReport::default() => tracing::info!(
                    expired = report.expired.len(),
                    purged = report.purged.len(),
                    "Subscription sweep finished"
                ),
                Ok(_) => tracing::debug!("Subscription sweep: nothing to do"),
                Err(e) => tracing::error!("Subscription sweep failed: {e}"),
            }
        }
    })
}

/// Periodic rate limiter cleanup (every 5 minutes)
pub fn spawn_rate_limit_cleanup(rate_limiter: RateLimiter) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(RATE_LIMIT_CLEANUP_SECS));
        loop {
            interval.tick().await;
            rate_limiter.cleanup().await;
        }
    })
}
