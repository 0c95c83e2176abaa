//! Owner-side billing: payment submission and subscription status

use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Payment, PaymentMethod, PaymentStatus, PaymentSubmit, Plan, SubscriptionInfo,
};

use crate::api::{ApiResult, internal};
use crate::auth::TenantIdentity;
use crate::db;
use crate::error::is_unique_violation;
use crate::state::AppState;
use crate::util::{now_millis, snowflake_id};

/// POST /api/tenant/payments: one pending payment per tenant
pub async fn submit_payment(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
    Json(req): Json<PaymentSubmit>,
) -> ApiResult<Payment> {
    let plan = Plan::from_db(&req.plan)
        .ok_or_else(|| AppError::new(ErrorCode::PlanInvalid).with_detail("plan", req.plan.as_str()))?;
    let method = PaymentMethod::from_db(&req.method).ok_or_else(|| {
        AppError::new(ErrorCode::PaymentInvalidMethod).with_detail("method", req.method.as_str())
    })?;
    let reference = req
        .reference
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    if method == PaymentMethod::Wallet && reference.is_none() {
        return Err(AppError::new(ErrorCode::PaymentReferenceRequired));
    }

    let now = now_millis();
    let payment = Payment {
        id: snowflake_id(),
        tenant_id: identity.tenant_id.clone(),
        method: method.as_db().to_string(),
        plan: plan.as_db().to_string(),
        amount: plan.price(),
        reference,
        status: PaymentStatus::Pending.as_db().to_string(),
        note: None,
        created_at: now,
        reviewed_at: None,
        reviewed_by: None,
    };

    db::payments::insert(&state.pool, &payment)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::new(ErrorCode::PaymentPending)
            } else {
                internal(e)
            }
        })?;

    let detail = serde_json::json!({ "payment_id": payment.id, "plan": payment.plan });
    if let Err(e) = db::audit::log(
        &state.pool,
        &identity.tenant_id,
        "payment_submitted",
        Some(&detail),
        None,
        now,
    )
    .await
    {
        tracing::warn!("Audit log write failed: {e}");
    }
    tracing::info!(
        tenant_id = %identity.tenant_id,
        payment_id = payment.id,
        method = %payment.method,
        "Payment submitted for review"
    );

    Ok(Json(payment))
}

/// GET /api/tenant/payments: newest first
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<Vec<Payment>> {
    let payments = db::payments::list_by_tenant(&state.pool, &identity.tenant_id)
        .await
        .map_err(internal)?;
    Ok(Json(payments))
}

/// GET /api/tenant/subscription
pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(identity): Extension<TenantIdentity>,
) -> ApiResult<SubscriptionInfo> {
    let sub = db::subscriptions::find(&state.pool, &identity.tenant_id)
        .await
        .map_err(internal)?;
    Ok(Json(SubscriptionInfo::from_subscription(
        sub.as_ref(),
        now_millis(),
    )))
}
