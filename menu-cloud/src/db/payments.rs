//! Payment queries and review transactions

use shared::models::{Payment, Plan, Subscription};
use sqlx::SqlitePool;

/// Result of an admin review
#[derive(Debug)]
pub enum ReviewOutcome<T> {
    NotFound,
    AlreadyReviewed,
    Done(T),
}

/// Insert a pending payment. The partial unique index allows one pending
/// payment per tenant; a second insert fails with a unique violation.
pub async fn insert(pool: &SqlitePool, p: &Payment) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO payments
         (id, tenant_id, method, plan, amount, reference, status, note, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(p.id)
    .bind(&p.tenant_id)
    .bind(&p.method)
    .bind(&p.plan)
    .bind(p.amount)
    .bind(&p.reference)
    .bind(&p.status)
    .bind(&p.note)
    .bind(p.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_by_tenant(
    pool: &SqlitePool,
    tenant_id: &str,
) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE tenant_id = ? ORDER BY created_at DESC, id DESC")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

/// Payments in a review state, oldest first (review queue order).
pub async fn list_by_status(pool: &SqlitePool, status: &str) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM payments WHERE status = ? ORDER BY created_at, id")
        .bind(status)
        .fetch_all(pool)
        .await
}

/// Mark a pending payment verified and activate or extend the tenant's
/// subscription: `expires_at = max(now, current expires_at) + plan duration`.
pub async fn verify(
    pool: &SqlitePool,
    id: i64,
    admin_id: &str,
    now: i64,
) -> Result<ReviewOutcome<Subscription>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let payment: Option<Payment> = sqlx::query_as("SELECT * FROM payments WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(payment) = payment else {
        return Ok(ReviewOutcome::NotFound);
    };
    if payment.status != "pending" {
        return Ok(ReviewOutcome::AlreadyReviewed);
    }
    let plan = Plan::from_db(&payment.plan)
        .ok_or_else(|| sqlx::Error::Protocol(format!("unknown plan {}", payment.plan)))?;

    let current: Option<(i64,)> =
        sqlx::query_as("SELECT expires_at FROM subscriptions WHERE tenant_id = ?")
            .bind(&payment.tenant_id)
            .fetch_optional(&mut *tx)
            .await?;
    let base = current.map_or(now, |(expires_at,)| expires_at.max(now));
    let expires_at = base + plan.duration_millis();

    let subscription: Subscription = sqlx::query_as(
        "INSERT INTO subscriptions (tenant_id, plan, status, started_at, expires_at, updated_at)
         VALUES (?, ?, 'active', ?, ?, ?)
         ON CONFLICT(tenant_id) DO UPDATE SET
             plan = excluded.plan,
             started_at = CASE WHEN subscriptions.status = 'active' AND subscriptions.expires_at > ?
                               THEN subscriptions.started_at ELSE excluded.started_at END,
             status = 'active',
             expires_at = excluded.expires_at,
             updated_at = excluded.updated_at
         RETURNING *",
    )
    .bind(&payment.tenant_id)
    .bind(plan.as_db())
    .bind(now)
    .bind(expires_at)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE payments SET status = 'verified', reviewed_at = ?, reviewed_by = ? WHERE id = ?",
    )
    .bind(now)
    .bind(admin_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(ReviewOutcome::Done(subscription))
}

pub async fn reject(
    pool: &SqlitePool,
    id: i64,
    admin_id: &str,
    note: Option<&str>,
    now: i64,
) -> Result<ReviewOutcome<Payment>, sqlx::Error> {
    let updated: Option<Payment> = sqlx::query_as(
        "UPDATE payments SET status = 'rejected', note = ?, reviewed_at = ?, reviewed_by = ?
         WHERE id = ? AND status = 'pending'
         RETURNING *",
    )
    .bind(note)
    .bind(now)
    .bind(admin_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match updated {
        Some(p) => Ok(ReviewOutcome::Done(p)),
        None => match find(pool, id).await? {
            Some(_) => Ok(ReviewOutcome::AlreadyReviewed),
            None => Ok(ReviewOutcome::NotFound),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_restaurant, test_pool};
    use shared::util::DAY_MILLIS;

    fn payment(id: i64, tenant_id: &str, plan: Plan) -> Payment {
        Payment {
            id,
            tenant_id: tenant_id.into(),
            method: "cash".into(),
            plan: plan.as_db().into(),
            amount: plan.price(),
            reference: None,
            status: "pending".into(),
            note: None,
            created_at: id,
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    #[tokio::test]
    async fn test_one_pending_per_tenant() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "A Place", "a-place", 1).await;
        insert(&pool, &payment(1, "a", Plan::Monthly)).await.unwrap();
        let err = insert(&pool, &payment(2, "a", Plan::Monthly))
            .await
            .unwrap_err();
        assert!(crate::error::is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_verify_activates_then_extends() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "A Place", "a-place", 1).await;
        let now = 1_000_000;

        insert(&pool, &payment(1, "a", Plan::Monthly)).await.unwrap();
        let ReviewOutcome::Done(sub) = verify(&pool, 1, "admin", now).await.unwrap() else {
            panic!("expected verified");
        };
        assert_eq!(sub.status, "active");
        assert_eq!(sub.started_at, now);
        assert_eq!(sub.expires_at, now + 30 * DAY_MILLIS);

        // Renewal before expiry stacks on the current expiry
        insert(&pool, &payment(2, "a", Plan::Yearly)).await.unwrap();
        let later = now + DAY_MILLIS;
        let ReviewOutcome::Done(sub) = verify(&pool, 2, "admin", later).await.unwrap() else {
            panic!("expected verified");
        };
        assert_eq!(sub.plan, "yearly");
        assert_eq!(sub.started_at, now);
        assert_eq!(sub.expires_at, now + 30 * DAY_MILLIS + 365 * DAY_MILLIS);

        let p = find(&pool, 2).await.unwrap().unwrap();
        assert_eq!(p.status, "verified");
        assert_eq!(p.reviewed_by.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_verify_after_lapse_starts_from_now() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "A Place", "a-place", 1).await;
        insert(&pool, &payment(1, "a", Plan::Monthly)).await.unwrap();
        verify(&pool, 1, "admin", 0).await.unwrap();

        let much_later = 100 * DAY_MILLIS;
        insert(&pool, &payment(2, "a", Plan::Monthly)).await.unwrap();
        let ReviewOutcome::Done(sub) = verify(&pool, 2, "admin", much_later).await.unwrap() else {
            panic!("expected verified");
        };
        assert_eq!(sub.started_at, much_later);
        assert_eq!(sub.expires_at, much_later + 30 * DAY_MILLIS);
    }

    #[tokio::test]
    async fn test_review_twice_is_refused() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "A Place", "a-place", 1).await;
        insert(&pool, &payment(1, "a", Plan::Monthly)).await.unwrap();

        assert!(matches!(
            reject(&pool, 1, "admin", Some("no transfer"), 5).await.unwrap(),
            ReviewOutcome::Done(_)
        ));
        assert!(matches!(
            verify(&pool, 1, "admin", 6).await.unwrap(),
            ReviewOutcome::AlreadyReviewed
        ));
        assert!(matches!(
            reject(&pool, 1, "admin", None, 7).await.unwrap(),
            ReviewOutcome::AlreadyReviewed
        ));
        assert!(matches!(
            verify(&pool, 99, "admin", 8).await.unwrap(),
            ReviewOutcome::NotFound
        ));
        assert!(find(&pool, 1).await.unwrap().unwrap().note.is_some());
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "A Place", "a-place", 1).await;
        seed_restaurant(&pool, "b", "B Place", "b-place", 2).await;
        insert(&pool, &payment(1, "a", Plan::Monthly)).await.unwrap();
        insert(&pool, &payment(2, "b", Plan::Yearly)).await.unwrap();
        verify(&pool, 1, "admin", 10).await.unwrap();

        let pending = list_by_status(&pool, "pending").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].tenant_id, "b");
        assert_eq!(list_by_tenant(&pool, "a").await.unwrap().len(), 1);
    }
}
