//! Read-only data access for the public menu flow

use async_trait::async_trait;
use shared::models::{Category, MenuItem, Restaurant};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::db;

/// A storage query failed. Distinct from an empty result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}")]
pub struct QueryError {
    pub operation: &'static str,
    pub message: String,
}

impl QueryError {
    pub fn new(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            operation,
            message: err.to_string(),
        }
    }
}

/// Everything the public menu flow reads.
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// All restaurants, in creation order
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, QueryError>;

    async fn get_restaurant(&self, id: &str) -> Result<Option<Restaurant>, QueryError>;

    async fn get_restaurant_by_slug(&self, slug: &str) -> Result<Option<Restaurant>, QueryError>;

    async fn list_categories(&self, restaurant_id: &str) -> Result<Vec<Category>, QueryError>;

    async fn list_menu_items(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, QueryError>;

    /// Items of every tenant (recovery search only)
    async fn list_all_menu_items(&self) -> Result<Vec<MenuItem>, QueryError>;
}

/// [`MenuSource`] over the SQLite pool
#[derive(Clone)]
pub struct SqlMenuSource {
    pool: SqlitePool,
}

impl SqlMenuSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MenuSource for SqlMenuSource {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, QueryError> {
        db::restaurants::list_all(&self.pool)
            .await
            .map_err(|e| QueryError::new("list_restaurants", e))
    }

    async fn get_restaurant(&self, id: &str) -> Result<Option<Restaurant>, QueryError> {
        db::restaurants::find_by_id(&self.pool, id)
            .await
            .map_err(|e| QueryError::new("get_restaurant", e))
    }

    async fn get_restaurant_by_slug(&self, slug: &str) -> Result<Option<Restaurant>, QueryError> {
        db::restaurants::find_by_slug(&self.pool, slug)
            .await
            .map_err(|e| QueryError::new("get_restaurant_by_slug", e))
    }

    async fn list_categories(&self, restaurant_id: &str) -> Result<Vec<Category>, QueryError> {
        db::categories::list_by_restaurant(&self.pool, restaurant_id)
            .await
            .map_err(|e| QueryError::new("list_categories", e))
    }

    async fn list_menu_items(&self, restaurant_id: &str) -> Result<Vec<MenuItem>, QueryError> {
        db::menu_items::list_by_restaurant(&self.pool, restaurant_id)
            .await
            .map_err(|e| QueryError::new("list_menu_items", e))
    }

    async fn list_all_menu_items(&self) -> Result<Vec<MenuItem>, QueryError> {
        db::menu_items::list_all(&self.pool)
            .await
            .map_err(|e| QueryError::new("list_all_menu_items", e))
    }
}
