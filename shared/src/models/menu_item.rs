//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: String,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    /// Price in minor units (cents), never negative
    pub price: i64,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub sort_order: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub price: i64,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
}

/// Replace the featured set of a restaurant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturedUpdate {
    pub item_ids: Vec<i64>,
}
