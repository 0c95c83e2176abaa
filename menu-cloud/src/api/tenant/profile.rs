//! Restaurant profile: GET/PUT /api/tenant/profile

use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::format::Currency;
use shared::models::{Restaurant, RestaurantUpdate, Theme, is_valid_slug};

use crate::api::register::unique_slug;
use crate::api::{ApiResult, internal};
use crate::auth::TenantIdentity;
use crate::db;
use crate::error::is_unique_violation;
use crate::state::AppState;
use crate::util::now_millis;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<Restaurant> {
    Ok(Json(super::own_restaurant(&state, &identity.tenant_id).await?))
}

/// Update the profile. A purged restaurant row is recreated (name required).
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(req): Json<RestaurantUpdate>,
) -> ApiResult<Restaurant> {
    let now = now_millis();
    let existing = db::restaurants::find_by_id(&state.pool, &identity.tenant_id)
        .await
        .map_err(internal)?;

    let restaurant = match existing {
        Some(mut r) => {
            apply_update(&state, &identity.tenant_id, &mut r, &req).await?;
            r.updated_at = now;
            db::restaurants::update(&state.pool, &r)
                .await
                .map_err(slug_conflict)?;
            r
        }
        None => {
            let name = req.restaurant_name.as_deref().map(str::trim).unwrap_or("");
            if name.is_empty() {
                return Err(AppError::with_message(
                    ErrorCode::RequiredField,
                    "Restaurant name is required",
                ));
            }
            let mut r = Restaurant {
                id: identity.tenant_id.clone(),
                restaurant_name: name.to_string(),
                slug: String::new(),
                logo_url: None,
                theme: Theme::default().as_db().to_string(),
                currency: Currency::default().as_db().to_string(),
                created_at: now,
                updated_at: now,
            };
            apply_update(&state, &identity.tenant_id, &mut r, &req).await?;
            if r.slug.is_empty() {
                r.slug = unique_slug(&state.pool, &r.restaurant_name, Some(&identity.tenant_id)).await?;
            }
            db::restaurants::insert(&state.pool, &r)
                .await
                .map_err(slug_conflict)?;
            tracing::info!(tenant_id = %identity.tenant_id, "Restaurant profile recreated");
            r
        }
    };

    let detail = serde_json::json!({ "slug": restaurant.slug });
    if let Err(e) = db::audit::log(
        &state.pool,
        &identity.tenant_id,
        "profile_updated",
        Some(&detail),
        None,
        now,
    )
    .await
    {
        tracing::warn!("Audit log write failed: {e}");
    }

    Ok(Json(restaurant))
}

/// Validate and copy the provided fields onto `r`.
async fn apply_update(
    state: &AppState,
    tenant_id: &str,
    r: &mut Restaurant,
    req: &RestaurantUpdate,
) -> Result<(), AppError> {
    if let Some(name) = &req.restaurant_name {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::with_message(
                ErrorCode::RequiredField,
                "Restaurant name is required",
            ));
        }
        r.restaurant_name = name.to_string();
    }

    if let Some(slug) = &req.slug {
        let slug = slug.trim().to_lowercase();
        if !is_valid_slug(&slug) {
            return Err(AppError::new(ErrorCode::SlugInvalid).with_detail("slug", slug));
        }
        if db::restaurants::slug_taken(&state.pool, &slug, Some(tenant_id))
            .await
            .map_err(internal)?
        {
            return Err(AppError::new(ErrorCode::SlugTaken).with_detail("slug", slug));
        }
        r.slug = slug;
    }

    if let Some(logo_url) = &req.logo_url {
        let logo_url = logo_url.trim();
        r.logo_url = (!logo_url.is_empty()).then(|| logo_url.to_string());
    }

    if let Some(theme) = &req.theme {
        let theme = Theme::from_db(theme)
            .ok_or_else(|| AppError::new(ErrorCode::ThemeInvalid).with_detail("theme", theme.as_str()))?;
        r.theme = theme.as_db().to_string();
    }

    if let Some(currency) = &req.currency {
        let currency = Currency::from_db(currency).ok_or_else(|| {
            AppError::new(ErrorCode::CurrencyInvalid).with_detail("currency", currency.as_str())
        })?;
        r.currency = currency.as_db().to_string();
    }

    Ok(())
}

fn slug_conflict(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::new(ErrorCode::SlugTaken)
    } else {
        internal(e)
    }
}
