//! Subscription queries

use shared::models::Subscription;
use sqlx::SqlitePool;

pub async fn find(pool: &SqlitePool, tenant_id: &str) -> Result<Option<Subscription>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM subscriptions WHERE tenant_id = ?")
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

/// Cancel now: status `canceled`, expiry clamped to `now`.
pub async fn cancel(pool: &SqlitePool, tenant_id: &str, now: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE subscriptions
         SET status = 'canceled', expires_at = MIN(expires_at, ?), updated_at = ?
         WHERE tenant_id = ?",
    )
    .bind(now)
    .bind(now)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Flip every active subscription whose expiry has passed to `expired`.
/// Returns the affected tenant ids.
pub async fn mark_expired(pool: &SqlitePool, now: i64) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "UPDATE subscriptions SET status = 'expired', updated_at = ?
         WHERE status = 'active' AND expires_at <= ?
         RETURNING tenant_id",
    )
    .bind(now)
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Tenants whose subscription ended before `cutoff` and that still have a
/// restaurant row.
pub async fn list_purgeable(pool: &SqlitePool, cutoff: i64) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT s.tenant_id FROM subscriptions s
         JOIN restaurants r ON r.id = s.tenant_id
         WHERE s.status IN ('expired', 'canceled') AND s.expires_at < ?
         ORDER BY s.expires_at",
    )
    .bind(cutoff)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_restaurant, test_pool};

    async fn seed_subscription(pool: &SqlitePool, tenant_id: &str, status: &str, expires_at: i64) {
        sqlx::query(
            "INSERT INTO subscriptions (tenant_id, plan, status, started_at, expires_at, updated_at)
             VALUES (?, 'monthly', ?, 0, ?, 0)",
        )
        .bind(tenant_id)
        .bind(status)
        .bind(expires_at)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_mark_expired_only_touches_due_active() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "A Place", "a-place", 1).await;
        seed_restaurant(&pool, "b", "B Place", "b-place", 2).await;
        seed_restaurant(&pool, "c", "C Place", "c-place", 3).await;
        seed_subscription(&pool, "a", "active", 100).await;
        seed_subscription(&pool, "b", "active", 1_000).await;
        seed_subscription(&pool, "c", "canceled", 50).await;

        let expired = mark_expired(&pool, 500).await.unwrap();
        assert_eq!(expired, vec!["a".to_string()]);
        assert_eq!(find(&pool, "a").await.unwrap().unwrap().status, "expired");
        assert_eq!(find(&pool, "b").await.unwrap().unwrap().status, "active");
    }

    #[tokio::test]
    async fn test_cancel_clamps_expiry() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "A Place", "a-place", 1).await;
        seed_subscription(&pool, "a", "active", 10_000).await;

        assert!(cancel(&pool, "a", 500).await.unwrap());
        let sub = find(&pool, "a").await.unwrap().unwrap();
        assert_eq!(sub.status, "canceled");
        assert_eq!(sub.expires_at, 500);
        assert!(!cancel(&pool, "nobody", 500).await.unwrap());
    }

    #[tokio::test]
    async fn test_purgeable_requires_restaurant_and_grace() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "A Place", "a-place", 1).await;
        seed_restaurant(&pool, "b", "B Place", "b-place", 2).await;
        seed_subscription(&pool, "a", "expired", 100).await;
        seed_subscription(&pool, "b", "expired", 900).await;

        assert_eq!(list_purgeable(&pool, 500).await.unwrap(), vec!["a"]);

        crate::db::restaurants::delete(&pool, "a").await.unwrap();
        assert!(list_purgeable(&pool, 500).await.unwrap().is_empty());
    }
}
