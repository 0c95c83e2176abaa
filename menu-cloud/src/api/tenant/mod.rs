//! Tenant (owner) API endpoints, split into sub-modules by domain

mod audit;
mod auth;
mod billing;
mod category;
mod item;
mod profile;

use shared::error::AppError;
use shared::models::Restaurant;

use crate::db;
use crate::state::AppState;

use super::internal;

/// The caller's restaurant, or `RestaurantNotFound` if it was purged.
pub async fn own_restaurant(state: &AppState, tenant_id: &str) -> Result<Restaurant, AppError> {
    db::restaurants::find_by_id(&state.pool, tenant_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::restaurant_not_found(tenant_id))
}

// Re-export all handlers for route registration
pub use auth::login;

pub use profile::{get_profile, update_profile};

pub use category::{create_category, delete_category, list_categories, update_category};

pub use item::{create_item, delete_item, list_items, set_featured, update_item};

pub use billing::{get_subscription, list_payments, submit_payment};

pub use audit::audit_log;
