use axum::{
    Extension, Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{TenantStatus, TenantStatusUpdate, TenantSummary};

use crate::api::{ApiResult, internal};
use crate::auth::TenantIdentity;
use crate::db;
use crate::state::AppState;
use crate::util::now_millis;

use super::record;

/// GET /api/admin/tenants
pub async fn list_tenants(State(state): State<AppState>) -> ApiResult<Vec<TenantSummary>> {
    let tenants = db::tenants::list_summaries(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(tenants))
}

/// PUT /api/admin/tenants/{id}/status
pub async fn update_tenant_status(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(tenant_id): Path<String>,
    Json(req): Json<TenantStatusUpdate>,
) -> ApiResult<bool> {
    let status = TenantStatus::from_db(&req.status).ok_or_else(|| {
        AppError::new(ErrorCode::ValidationFailed).with_detail("status", req.status.as_str())
    })?;
    if tenant_id == identity.tenant_id && status != TenantStatus::Active {
        return Err(AppError::with_message(
            ErrorCode::PermissionDenied,
            "Admins cannot suspend their own account",
        ));
    }

    let updated = db::tenants::update_status(&state.pool, &tenant_id, status.as_db())
        .await
        .map_err(internal)?;
    if !updated {
        return Err(AppError::new(ErrorCode::TenantNotFound).with_detail("tenant_id", tenant_id));
    }

    let detail = serde_json::json!({ "tenant_id": tenant_id, "status": status.as_db() });
    record(&state, &identity.tenant_id, "tenant_status_changed", &detail, now_millis()).await;
    Ok(Json(true))
}

/// POST /api/admin/subscriptions/{tenant_id}/cancel: the public menu goes dark immediately
pub async fn cancel_subscription(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(tenant_id): Path<String>,
) -> ApiResult<bool> {
    let now = now_millis();
    let canceled = db::subscriptions::cancel(&state.pool, &tenant_id, now)
        .await
        .map_err(internal)?;
    if !canceled {
        return Err(
            AppError::with_message(ErrorCode::NotFound, "Subscription not found")
                .with_detail("tenant_id", tenant_id),
        );
    }

    let detail = serde_json::json!({ "tenant_id": tenant_id });
    record(&state, &identity.tenant_id, "subscription_canceled", &detail, now).await;
    Ok(Json(true))
}
