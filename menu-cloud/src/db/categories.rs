//! Category queries

use shared::models::Category;
use sqlx::SqlitePool;

pub async fn list_by_restaurant(
    pool: &SqlitePool,
    restaurant_id: &str,
) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM categories WHERE restaurant_id = ? ORDER BY sort_order, created_at, id",
    )
    .bind(restaurant_id)
    .fetch_all(pool)
    .await
}

/// Category by id, scoped to its restaurant.
pub async fn find(
    pool: &SqlitePool,
    restaurant_id: &str,
    id: i64,
) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM categories WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(pool)
        .await
}

/// Case-insensitive name check, ignoring `except_id`.
pub async fn name_exists(
    pool: &SqlitePool,
    restaurant_id: &str,
    name: &str,
    except_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as(
        "SELECT id FROM categories
         WHERE restaurant_id = ? AND name = ? COLLATE NOCASE AND id != ?
         LIMIT 1",
    )
    .bind(restaurant_id)
    .bind(name)
    .bind(except_id.unwrap_or(0))
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

pub async fn insert(pool: &SqlitePool, c: &Category) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO categories (id, restaurant_id, name, image_url, sort_order, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(c.id)
    .bind(&c.restaurant_id)
    .bind(&c.name)
    .bind(&c.image_url)
    .bind(c.sort_order)
    .bind(c.created_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn update(pool: &SqlitePool, c: &Category) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE categories SET name = ?, image_url = ?, sort_order = ?
         WHERE id = ? AND restaurant_id = ?",
    )
    .bind(&c.name)
    .bind(&c.image_url)
    .bind(c.sort_order)
    .bind(c.id)
    .bind(&c.restaurant_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Number of items still referencing the category.
pub async fn item_count(pool: &SqlitePool, id: i64) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM menu_items WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn delete(pool: &SqlitePool, restaurant_id: &str, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = ? AND restaurant_id = ?")
        .bind(id)
        .bind(restaurant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{seed_restaurant, test_pool};

    fn category(id: i64, restaurant_id: &str, name: &str, sort_order: i32) -> Category {
        Category {
            id,
            restaurant_id: restaurant_id.into(),
            name: name.into(),
            image_url: None,
            sort_order,
            created_at: id,
        }
    }

    #[tokio::test]
    async fn test_list_sorted_and_scoped() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "Burger Town", "burger-town", 1).await;
        seed_restaurant(&pool, "b", "Burger House", "burger-house", 2).await;

        insert(&pool, &category(1, "a", "Drinks", 2)).await.unwrap();
        insert(&pool, &category(2, "a", "Burgers", 1)).await.unwrap();
        insert(&pool, &category(3, "b", "Sides", 0)).await.unwrap();

        let names: Vec<_> = list_by_restaurant(&pool, "a")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Burgers", "Drinks"]);

        assert!(find(&pool, "b", 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_name_exists_is_case_insensitive() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "Burger Town", "burger-town", 1).await;
        insert(&pool, &category(1, "a", "Drinks", 0)).await.unwrap();

        assert!(name_exists(&pool, "a", "drinks", None).await.unwrap());
        assert!(!name_exists(&pool, "a", "drinks", Some(1)).await.unwrap());
        assert!(!name_exists(&pool, "b", "drinks", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_scoped_to_restaurant() {
        let pool = test_pool().await;
        seed_restaurant(&pool, "a", "Burger Town", "burger-town", 1).await;
        insert(&pool, &category(1, "a", "Drinks", 0)).await.unwrap();

        assert!(!delete(&pool, "b", 1).await.unwrap());
        assert_eq!(item_count(&pool, 1).await.unwrap(), 0);
        assert!(delete(&pool, "a", 1).await.unwrap());
    }
}
