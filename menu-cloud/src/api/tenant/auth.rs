//! POST /api/login

use axum::{Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{AuthResponse, LoginRequest, TenantRole, TenantStatus};

use crate::db;
use crate::state::AppState;
use crate::util::{normalize_email, now_millis, verify_password};

use crate::api::ApiResult;

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let email = normalize_email(&req.email).ok_or_else(AppError::invalid_credentials)?;
    let tenant = db::tenants::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| {
            tracing::error!("DB error during login: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &tenant.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    let status = TenantStatus::from_db(&tenant.status);
    if !status.is_some_and(|s| s.can_login()) {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let role = TenantRole::from_db(&tenant.role).unwrap_or(TenantRole::Owner);
    let token = crate::auth::tenant_auth::create_token(
        &tenant.id,
        &tenant.email,
        role,
        &state.jwt_secret,
    )
    .map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    if let Err(e) = db::audit::log(&state.pool, &tenant.id, "login", None, None, now_millis()).await {
        tracing::warn!("Audit log write failed: {e}");
    }

    Ok(Json(AuthResponse {
        token,
        tenant_id: tenant.id,
        role: role.as_db().to_string(),
    }))
}
