//! Recovery search after a name match landed on an empty restaurant
//!
//! Scans every menu item, collects the restaurants that own at least one,
//! and re-runs the containment match against just those. At most one pass
//! per request; the caller never loops.

use shared::models::{DebugTrace, Restaurant};

use super::loader::{self, LoadedMenu};
use super::resolver;
use super::source::{MenuSource, QueryError};

/// One recovery pass.
///
/// Returns `Ok(None)` when no restaurant with items matches `match_key`.
pub async fn recover<S>(
    source: &S,
    match_key: &str,
    trace: &mut DebugTrace,
) -> Result<Option<(Restaurant, LoadedMenu)>, QueryError>
where
    S: MenuSource + ?Sized,
{
    trace.fallback_triggered = true;

    let all_items = match source.list_all_menu_items().await {
        Ok(items) => {
            trace.record_rows("list_all_menu_items", None, items.len());
            items
        }
        Err(e) => {
            trace.record_error("list_all_menu_items", None, e.message.clone());
            return Err(e);
        }
    };

    let mut owner_ids: Vec<String> = Vec::new();
    for item in &all_items {
        if !owner_ids.contains(&item.restaurant_id) {
            owner_ids.push(item.restaurant_id.clone());
        }
    }
    trace.fallback_candidates = owner_ids.clone();
    tracing::debug!(
        items = all_items.len(),
        owners = owner_ids.len(),
        "Recovery scan collected candidate owners"
    );

    let mut candidates = Vec::with_capacity(owner_ids.len());
    for id in &owner_ids {
        match source.get_restaurant(id).await {
            Ok(Some(r)) => {
                trace.record_rows("get_restaurant", Some(id), 1);
                candidates.push(r);
            }
            // Items without an owner profile are skipped
            Ok(None) => trace.record_rows("get_restaurant", Some(id), 0),
            Err(e) => {
                trace.record_error("get_restaurant", Some(id), e.message.clone());
                return Err(e);
            }
        }
    }

    let Some(found) = resolver::containment_match(match_key, &candidates).cloned() else {
        tracing::debug!(match_key, "Recovery found no owner matching the key");
        return Ok(None);
    };

    let menu = loader::load(source, &found.id, trace).await?;
    trace.recovered_restaurant_id = Some(found.id.clone());
    Ok(Some((found, menu)))
}
