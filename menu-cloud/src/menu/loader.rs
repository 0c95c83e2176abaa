//! Menu data loading for a resolved restaurant

use shared::models::{Category, DebugTrace, MenuItem};

use super::source::{MenuSource, QueryError};

/// Categories and items of one restaurant, in display order.
#[derive(Debug, Clone, Default)]
pub struct LoadedMenu {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
    /// `items` filtered by `is_featured`, same order
    pub featured: Vec<MenuItem>,
}

impl LoadedMenu {
    pub fn new(categories: Vec<Category>, items: Vec<MenuItem>) -> Self {
        let featured = items.iter().filter(|i| i.is_featured).cloned().collect();
        Self {
            categories,
            items,
            featured,
        }
    }

    /// No categories and no items. Triggers the recovery search.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.items.is_empty()
    }
}

/// Load categories and items for `restaurant_id`.
///
/// Both queries always run and both outcomes land in `trace`. A failure of
/// either one is returned as an error, never as an empty list.
pub async fn load<S>(
    source: &S,
    restaurant_id: &str,
    trace: &mut DebugTrace,
) -> Result<LoadedMenu, QueryError>
where
    S: MenuSource + ?Sized,
{
    let categories = source.list_categories(restaurant_id).await;
    record(trace, "list_categories", restaurant_id, &categories);

    let items = source.list_menu_items(restaurant_id).await;
    record(trace, "list_menu_items", restaurant_id, &items);

    Ok(LoadedMenu::new(categories?, items?))
}

fn record<T>(
    trace: &mut DebugTrace,
    query: &str,
    restaurant_id: &str,
    result: &Result<Vec<T>, QueryError>,
) {
    match result {
        Ok(rows) => {
            tracing::debug!(query, restaurant_id, rows = rows.len(), "Menu query");
            trace.record_rows(query, Some(restaurant_id), rows.len());
        }
        Err(e) => {
            tracing::warn!(query, restaurant_id, error = %e, "Menu query failed");
            trace.record_error(query, Some(restaurant_id), e.message.clone());
        }
    }
}
