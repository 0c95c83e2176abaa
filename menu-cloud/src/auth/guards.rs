//! Role and subscription guards
//!
//! Both must run AFTER `tenant_auth_middleware` (they read `TenantIdentity`
//! from request extensions).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use shared::models::TenantStatus;
use sqlx::SqlitePool;

use crate::auth::TenantIdentity;
use crate::db;
use crate::state::AppState;
use crate::util::now_millis;

/// Admin role required
pub async fn require_admin(request: Request, next: Next) -> Result<Response, Response> {
    let identity = request
        .extensions()
        .get::<TenantIdentity>()
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    if !identity.is_admin() {
        tracing::warn!(tenant_id = %identity.tenant_id, "Admin route refused");
        return Err(AppError::new(ErrorCode::AdminRequired).into_response());
    }
    Ok(next.run(request).await)
}

/// Active account with an active subscription required (builder routes)
pub async fn require_subscription(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = request
        .extensions()
        .get::<TenantIdentity>()
        .cloned()
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    if let Some(code) = check_subscription(&state.pool, &identity.tenant_id, now_millis()).await {
        return Err(AppError::new(code).into_response());
    }
    Ok(next.run(request).await)
}

/// Returns `None` if the tenant may use the builder, or the refusal code.
async fn check_subscription(pool: &SqlitePool, tenant_id: &str, now: i64) -> Option<ErrorCode> {
    let tenant = match db::tenants::find_by_id(pool, tenant_id).await {
        Ok(row) => row,
        Err(e) => {
            tracing::error!("Subscription check DB error: {e}");
            return Some(ErrorCode::InternalError);
        }
    };
    let Some(tenant) = tenant else {
        return Some(ErrorCode::TenantNotFound);
    };
    if !TenantStatus::from_db(&tenant.status).is_some_and(|s| s.can_login()) {
        tracing::warn!(tenant_id = %tenant_id, status = %tenant.status, "Tenant not active");
        return Some(ErrorCode::AccountDisabled);
    }

    match db::subscriptions::find(pool, tenant_id).await {
        Ok(Some(sub)) if sub.is_active_at(now) => None,
        Ok(Some(_)) => Some(ErrorCode::SubscriptionExpired),
        Ok(None) => Some(ErrorCode::SubscriptionRequired),
        Err(e) => {
            tracing::error!("Subscription query error: {e}");
            Some(ErrorCode::InternalError)
        }
    }
}
