//! Registration API handler
//!
//! POST /api/register: create owner account + restaurant, return a token

use axum::Json;
use axum::extract::State;
use shared::error::{AppError, ErrorCode};
use shared::models::{AuthResponse, RegisterRequest, SLUG_MAX_LEN, TenantRole, slugify};
use sqlx::SqlitePool;

use crate::auth::tenant_auth::create_token;
use crate::db;
use crate::error::{ServiceResult, is_unique_violation};
use crate::state::AppState;
use crate::util::{MIN_PASSWORD_LEN, hash_password, normalize_email, now_millis};

/// Sequential suffixes tried before falling back to a random one
const MAX_SEQUENTIAL_SUFFIX: u32 = 20;

/// Slug used when a name has no usable ASCII characters
const FALLBACK_SLUG: &str = "restaurant";

/// First free slug derived from `name`: `base`, `base-2`, `base-3`, ...
pub(crate) async fn unique_slug(
    pool: &SqlitePool,
    name: &str,
    owner_id: Option<&str>,
) -> ServiceResult<String> {
    let base = slugify(name).unwrap_or_else(|| FALLBACK_SLUG.to_string());
    if !db::restaurants::slug_taken(pool, &base, owner_id).await? {
        return Ok(base);
    }

    for n in 2..=MAX_SEQUENTIAL_SUFFIX {
        let candidate = with_suffix(&base, &n.to_string());
        if !db::restaurants::slug_taken(pool, &candidate, owner_id).await? {
            return Ok(candidate);
        }
    }

    loop {
        let suffix = {
            use rand::Rng;
            rand::thread_rng().gen_range(1000..10_000u32).to_string()
        };
        let candidate = with_suffix(&base, &suffix);
        if !db::restaurants::slug_taken(pool, &candidate, owner_id).await? {
            return Ok(candidate);
        }
    }
}

/// `base-suffix`, shortening `base` so the result stays a valid slug.
fn with_suffix(base: &str, suffix: &str) -> String {
    let room = SLUG_MAX_LEN - suffix.len() - 1;
    let head = base[..base.len().min(room)].trim_end_matches('-');
    format!("{head}-{suffix}")
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = normalize_email(&req.email)
        .ok_or_else(|| AppError::with_message(ErrorCode::InvalidFormat, "Invalid email"))?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    let restaurant_name = req.restaurant_name.trim();
    if restaurant_name.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Restaurant name is required",
        ));
    }

    if db::tenants::find_by_email(&state.pool, &email)
        .await
        .map_err(super::internal)?
        .is_some()
    {
        return Err(AppError::already_exists("Email"));
    }

    let hashed_password = hash_password(&req.password).map_err(super::internal)?;
    let slug = unique_slug(&state.pool, restaurant_name, None).await?;

    let tenant_id = uuid::Uuid::new_v4().to_string();
    let now = now_millis();

    db::tenants::create_owner_with_restaurant(
        &state.pool,
        &tenant_id,
        &email,
        &hashed_password,
        restaurant_name,
        &slug,
        now,
    )
    .await
    .map_err(|e| {
        // Lost a race on email or slug
        if is_unique_violation(&e) {
            AppError::already_exists("Account")
        } else {
            super::internal(e)
        }
    })?;

    let token =
        create_token(&tenant_id, &email, TenantRole::Owner, &state.jwt_secret).map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    let detail = serde_json::json!({ "slug": slug });
    if let Err(e) = db::audit::log(&state.pool, &tenant_id, "register", Some(&detail), None, now).await {
        tracing::warn!("Audit log write failed: {e}");
    }
    tracing::info!(tenant_id = %tenant_id, slug = %slug, "Tenant registered");

    Ok(Json(AuthResponse {
        token,
        tenant_id,
        role: TenantRole::Owner.as_db().to_string(),
    }))
}
