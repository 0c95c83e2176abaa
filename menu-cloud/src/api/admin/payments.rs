use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Payment, PaymentReject, PaymentStatus, Subscription};

use crate::api::{ApiResult, internal};
use crate::auth::TenantIdentity;
use crate::db;
use crate::db::payments::ReviewOutcome;
use crate::state::AppState;
use crate::util::now_millis;

use super::record;

#[derive(Deserialize)]
pub struct PaymentQuery {
    pub status: Option<String>,
}

/// GET /api/admin/payments?status=pending
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentQuery>,
) -> ApiResult<Vec<Payment>> {
    let status = match query.status.as_deref() {
        None => PaymentStatus::Pending,
        Some(s) => PaymentStatus::from_db(s).ok_or_else(|| {
            AppError::new(ErrorCode::ValidationFailed).with_detail("status", s)
        })?,
    };
    let payments = db::payments::list_by_status(&state.pool, status.as_db())
        .await
        .map_err(internal)?;
    Ok(Json(payments))
}

fn review_error<T>(outcome: ReviewOutcome<T>, payment_id: i64) -> Result<T, AppError> {
    match outcome {
        ReviewOutcome::Done(value) => Ok(value),
        ReviewOutcome::NotFound => {
            Err(AppError::new(ErrorCode::PaymentNotFound).with_detail("payment_id", payment_id))
        }
        ReviewOutcome::AlreadyReviewed => Err(
            AppError::new(ErrorCode::PaymentAlreadyReviewed).with_detail("payment_id", payment_id),
        ),
    }
}

/// POST /api/admin/payments/{id}/verify: activates or extends the subscription
pub async fn verify_payment(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(payment_id): Path<i64>,
) -> ApiResult<Subscription> {
    let now = now_millis();
    let outcome = db::payments::verify(&state.pool, payment_id, &identity.tenant_id, now)
        .await
        .map_err(internal)?;
    let subscription = review_error(outcome, payment_id)?;

    let detail = serde_json::json!({
        "payment_id": payment_id,
        "tenant_id": subscription.tenant_id,
        "expires_at": subscription.expires_at,
    });
    record(&state, &identity.tenant_id, "payment_verified", &detail, now).await;

    Ok(Json(subscription))
}

/// POST /api/admin/payments/{id}/reject
pub async fn reject_payment(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Path(payment_id): Path<i64>,
    body: Option<Json<PaymentReject>>,
) -> ApiResult<Payment> {
    let note = body
        .and_then(|Json(b)| b.note)
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    let now = now_millis();
    let outcome = db::payments::reject(
        &state.pool,
        payment_id,
        &identity.tenant_id,
        note.as_deref(),
        now,
    )
    .await
    .map_err(internal)?;
    let payment = review_error(outcome, payment_id)?;

    let detail = serde_json::json!({ "payment_id": payment_id, "tenant_id": payment.tenant_id });
    record(&state, &identity.tenant_id, "payment_rejected", &detail, now).await;

    Ok(Json(payment))
}
