//! Tenant (account) queries

use shared::models::TenantSummary;
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Tenant {
    pub id: String,
    pub email: String,
    pub hashed_password: String,
    pub role: String,
    pub status: String,
    pub created_at: i64,
}

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    email: &str,
    hashed_password: &str,
    role: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO tenants (id, email, hashed_password, role, status, created_at)
         VALUES (?, ?, ?, ?, 'active', ?)",
    )
    .bind(id)
    .bind(email)
    .bind(hashed_password)
    .bind(role)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Create an owner account and its restaurant in one transaction.
pub async fn create_owner_with_restaurant(
    pool: &SqlitePool,
    id: &str,
    email: &str,
    hashed_password: &str,
    restaurant_name: &str,
    slug: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO tenants (id, email, hashed_password, role, status, created_at)
         VALUES (?, ?, ?, 'owner', 'active', ?)",
    )
    .bind(id)
    .bind(email)
    .bind(hashed_password)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO restaurants (id, restaurant_name, slug, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(restaurant_name)
    .bind(slug)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tenants WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM tenants WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Returns `false` if no such tenant.
pub async fn update_status(
    pool: &SqlitePool,
    tenant_id: &str,
    status: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE tenants SET status = ? WHERE id = ?")
        .bind(status)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Promote to admin and reset the password (admin bootstrap).
pub async fn promote_admin(
    pool: &SqlitePool,
    tenant_id: &str,
    hashed_password: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE tenants SET role = 'admin', status = 'active', hashed_password = ? WHERE id = ?",
    )
    .bind(hashed_password)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// All accounts with their restaurant and subscription, newest first.
pub async fn list_summaries(pool: &SqlitePool) -> Result<Vec<TenantSummary>, sqlx::Error> {
    sqlx::query_as(
        "SELECT t.id, t.email, t.role, t.status, t.created_at,
                r.restaurant_name, r.slug,
                s.plan, s.status AS subscription_status, s.expires_at
         FROM tenants t
         LEFT JOIN restaurants r ON r.id = t.id
         LEFT JOIN subscriptions s ON s.tenant_id = t.id
         ORDER BY t.created_at DESC, t.id",
    )
    .fetch_all(pool)
    .await
}
