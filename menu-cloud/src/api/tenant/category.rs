use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::api::{ApiResult, internal};
use crate::auth::TenantIdentity;
use crate::db;
use crate::error::is_unique_violation;
use crate::state::AppState;
use crate::util::{now_millis, snowflake_id};

use super::own_restaurant;

fn validate_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Category name is required",
        ));
    }
    Ok(name.to_string())
}

fn name_conflict(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::new(ErrorCode::CategoryNameExists)
    } else {
        internal(e)
    }
}

async fn ensure_unique_name(
    state: &AppState,
    restaurant_id: &str,
    name: &str,
    except_id: Option<i64>,
) -> Result<(), AppError> {
    if db::categories::name_exists(&state.pool, restaurant_id, name, except_id)
        .await
        .map_err(internal)?
    {
        return Err(AppError::new(ErrorCode::CategoryNameExists).with_detail("name", name));
    }
    Ok(())
}

pub async fn list_categories(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<Vec<Category>> {
    let restaurant = own_restaurant(&state, &identity.tenant_id).await?;
    let categories = db::categories::list_by_restaurant(&state.pool, &restaurant.id)
        .await
        .map_err(internal)?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(data): Json<CategoryCreate>,
) -> ApiResult<Category> {
    let restaurant = own_restaurant(&state, &identity.tenant_id).await?;
    let name = validate_name(&data.name)?;
    ensure_unique_name(&state, &restaurant.id, &name, None).await?;

    let category = Category {
        id: snowflake_id(),
        restaurant_id: restaurant.id,
        name,
        image_url: data.image_url.filter(|u| !u.trim().is_empty()),
        sort_order: data.sort_order.unwrap_or(0),
        created_at: now_millis(),
    };
    db::categories::insert(&state.pool, &category)
        .await
        .map_err(name_conflict)?;

    tracing::debug!(tenant_id = %identity.tenant_id, category_id = category.id, "Category created");
    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(category_id): Path<i64>,
    Json(data): Json<CategoryUpdate>,
) -> ApiResult<Category> {
    let mut category = db::categories::find(&state.pool, &identity.tenant_id, category_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    if let Some(name) = &data.name {
        let name = validate_name(name)?;
        ensure_unique_name(&state, &category.restaurant_id, &name, Some(category.id)).await?;
        category.name = name;
    }
    if let Some(image_url) = data.image_url {
        category.image_url = (!image_url.trim().is_empty()).then_some(image_url);
    }
    if let Some(sort_order) = data.sort_order {
        category.sort_order = sort_order;
    }

    db::categories::update(&state.pool, &category)
        .await
        .map_err(name_conflict)?;
    Ok(Json(category))
}

/// Refused while any item still uses the category
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(category_id): Path<i64>,
) -> ApiResult<bool> {
    db::categories::find(&state.pool, &identity.tenant_id, category_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::CategoryNotFound))?;

    let in_use = db::categories::item_count(&state.pool, category_id)
        .await
        .map_err(internal)?;
    if in_use > 0 {
        return Err(AppError::new(ErrorCode::CategoryHasItems).with_detail("item_count", in_use));
    }

    let deleted = db::categories::delete(&state.pool, &identity.tenant_id, category_id)
        .await
        .map_err(internal)?;
    Ok(Json(deleted))
}
