//! Public menu view model
//!
//! The fully assembled, read-only menu returned by `GET /api/menu/{slug}`.

use serde::{Deserialize, Serialize};

use super::trace::DebugTrace;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuHeader {
    pub restaurant_id: String,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub theme: String,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemView {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    /// Price rendered in the restaurant currency
    pub price_display: String,
    pub image_url: Option<String>,
    pub is_featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySection {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub items: Vec<MenuItemView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuView {
    pub header: MenuHeader,
    /// Carousel, in item order
    pub featured: Vec<MenuItemView>,
    /// Category rail + grid, in category order
    pub sections: Vec<CategorySection>,
    /// Items without a category, or whose category is gone
    pub uncategorized: Vec<MenuItemView>,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<DebugTrace>,
}
