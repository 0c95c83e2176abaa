use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{FeaturedUpdate, MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::api::{ApiResult, internal};
use crate::auth::TenantIdentity;
use crate::db;
use crate::state::AppState;
use crate::util::{now_millis, snowflake_id};

use super::own_restaurant;

fn validate_price(price: i64) -> Result<i64, AppError> {
    if price < 0 {
        return Err(AppError::new(ErrorCode::MenuItemInvalidPrice).with_detail("price", price));
    }
    Ok(price)
}

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Item name is required",
        ));
    }
    Ok(name.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// The category must belong to the same restaurant
async fn ensure_category(
    state: &AppState,
    restaurant_id: &str,
    category_id: Option<i64>,
) -> Result<(), AppError> {
    let Some(id) = category_id else {
        return Ok(());
    };
    db::categories::find(&state.pool, restaurant_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound).with_detail("category_id", id))?;
    Ok(())
}

pub async fn list_items(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<Vec<MenuItem>> {
    let restaurant = own_restaurant(&state, &identity.tenant_id).await?;
    let items = db::menu_items::list_by_restaurant(&state.pool, &restaurant.id)
        .await
        .map_err(internal)?;
    Ok(Json(items))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(data): Json<MenuItemCreate>,
) -> ApiResult<MenuItem> {
    let restaurant = own_restaurant(&state, &identity.tenant_id).await?;
    let name = validate_name(&data.name)?;
    let price = validate_price(data.price)?;
    ensure_category(&state, &restaurant.id, data.category_id).await?;

    let now = now_millis();
    let item = MenuItem {
        id: snowflake_id(),
        restaurant_id: restaurant.id,
        category_id: data.category_id,
        name,
        description: non_blank(data.description),
        price,
        image_url: non_blank(data.image_url),
        is_featured: data.is_featured.unwrap_or(false),
        sort_order: data.sort_order.unwrap_or(0),
        created_at: now,
        updated_at: now,
    };
    db::menu_items::insert(&state.pool, &item)
        .await
        .map_err(internal)?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(item_id): Path<i64>,
    Json(data): Json<MenuItemUpdate>,
) -> ApiResult<MenuItem> {
    let mut item = db::menu_items::find(&state.pool, &identity.tenant_id, item_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    if let Some(name) = &data.name {
        item.name = validate_name(name)?;
    }
    if let Some(price) = data.price {
        item.price = validate_price(price)?;
    }
    if data.category_id.is_some() {
        ensure_category(&state, &item.restaurant_id, data.category_id).await?;
        item.category_id = data.category_id;
    }
    if data.description.is_some() {
        item.description = non_blank(data.description);
    }
    if data.image_url.is_some() {
        item.image_url = non_blank(data.image_url);
    }
    if let Some(sort_order) = data.sort_order {
        item.sort_order = sort_order;
    }
    item.updated_at = now_millis();

    db::menu_items::update(&state.pool, &item)
        .await
        .map_err(internal)?;
    Ok(Json(item))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(item_id): Path<i64>,
) -> ApiResult<bool> {
    let deleted = db::menu_items::delete(&state.pool, &identity.tenant_id, item_id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::MenuItemNotFound));
    }
    Ok(Json(true))
}

/// PUT /api/tenant/items/featured: replace the featured set, all or nothing
pub async fn set_featured(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(data): Json<FeaturedUpdate>,
) -> ApiResult<Vec<MenuItem>> {
    let restaurant = own_restaurant(&state, &identity.tenant_id).await?;
    let mut ids = data.item_ids;
    ids.sort_unstable();
    ids.dedup();

    if let Some(unknown) = db::menu_items::set_featured(&state.pool, &restaurant.id, &ids, now_millis())
        .await
        .map_err(internal)?
    {
        return Err(AppError::new(ErrorCode::MenuItemNotFound).with_detail("item_id", unknown));
    }

    let featured = db::menu_items::list_by_restaurant(&state.pool, &restaurant.id)
        .await
        .map_err(internal)?
        .into_iter()
        .filter(|i| i.is_featured)
        .collect();
    Ok(Json(featured))
}
