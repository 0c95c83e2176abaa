//! Restaurant profile queries

use shared::models::Restaurant;
use sqlx::SqlitePool;

pub async fn create(
    pool: &SqlitePool,
    id: &str,
    restaurant_name: &str,
    slug: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO restaurants (id, restaurant_name, slug, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(restaurant_name)
    .bind(slug)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// All restaurants in creation order.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants ORDER BY created_at, id")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM restaurants WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Is `slug` used by a restaurant other than `owner_id`?
pub async fn slug_taken(
    pool: &SqlitePool,
    slug: &str,
    owner_id: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT id FROM restaurants WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some_and(|(id,)| Some(id.as_str()) != owner_id))
}

/// Write every mutable profile column.
pub async fn update(pool: &SqlitePool, r: &Restaurant) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE restaurants
         SET restaurant_name = ?, slug = ?, logo_url = ?, theme = ?, currency = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&r.restaurant_name)
    .bind(&r.slug)
    .bind(&r.logo_url)
    .bind(&r.theme)
    .bind(&r.currency)
    .bind(r.updated_at)
    .bind(&r.id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Insert a full row (profile recreated after a purge).
pub async fn insert(pool: &SqlitePool, r: &Restaurant) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO restaurants
         (id, restaurant_name, slug, logo_url, theme, currency, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&r.id)
    .bind(&r.restaurant_name)
    .bind(&r.slug)
    .bind(&r.logo_url)
    .bind(&r.theme)
    .bind(&r.currency)
    .bind(r.created_at)
    .bind(r.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Delete a restaurant; categories and items cascade. Returns `false` if absent.
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM restaurants WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
