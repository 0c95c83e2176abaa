//! Menu item queries

use shared::models::MenuItem;
use sqlx::SqlitePool;

pub async fn list_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: &str,
) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM menu_items WHERE restaurant_id = ? ORDER BY sort_order, created_at, id",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

/// Every item of every tenant. Only the legacy recovery search uses this.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<MenuItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_items ORDER BY created_at, id")
        .fetch_all(pool)
        .await
}

pub async fn find(
    pool: &SqlitePool,
    restaurant_id: &str,
    id: i64,
) -> Result<Option<MenuItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM menu_items WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await
}

pub async fn insert(pool: &SqlitePool, item: &MenuItem) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO menu_items
         (id, restaurant_id, category_id, name, description, price, image_url,
          is_featured, sort_order, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(item.id)
    .bind(&item.restaurant_id)
    .bind(item.category_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.price)
    .bind(&item.image_url)
    .bind(item.is_featured)
    .bind(item.sort_order)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Write every editable column except `is_featured`, which only
/// [`set_featured`] changes.
pub async fn update(pool: &SqlitePool, item: &MenuItem) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE menu_items
         SET category_id = ?, name = ?, description = ?, price = ?, image_url = ?,
             sort_order = ?, updated_at = ?
         WHERE id = ? AND restaurant_id = ?",
    )
    .bind(item.category_id)
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.price)
    .bind(&item.image_url)
    .bind(item.sort_order)
    .bind(item.updated_at)
    .bind(item.id)
    .bind(&item.restaurant_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, restaurant_id: &str, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menu_items WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Replace the featured set: clear every flag of the restaurant, then set
/// the chosen ones, in one transaction.
///
/// Returns the first id that does not belong to the restaurant; the
/// transaction is rolled back in that case.
pub async fn set_featured(
    pool: &SqlitePool,
    restaurant_id: &str,
    item_ids: &[i64],
    now: i64,
) -> Result<Option<i64>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE menu_items SET is_featured = 0, updated_at = ?
         WHERE restaurant_id = ? AND is_featured = 1",
    )
    .bind(now)
    .bind(restaurant_id)
    .execute(&mut *tx)
    .await?;

    for &id in item_ids {
        let result = sqlx::query(
            "UPDATE menu_items SET is_featured = 1, updated_at = ?
             WHERE id = ? AND restaurant_id = ?",
        )
        .bind(now)
        .bind(id)
        .bind(restaurant_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(Some(id));
        }
    }

    tx.commit().await?;
    Ok(None)
}
