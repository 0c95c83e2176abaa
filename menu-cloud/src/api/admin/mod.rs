//! Platform admin endpoints: payment review and account management
//!
//! All routes sit behind `tenant_auth_middleware` + `require_admin`.

mod payments;
mod tenants;

use serde_json::Value;

use crate::db;
use crate::state::AppState;

pub use payments::{list_payments, reject_payment, verify_payment};
pub use tenants::{cancel_subscription, list_tenants, update_tenant_status};

/// Record an admin action against the admin's own audit trail.
async fn record(state: &AppState, admin_id: &str, action: &str, detail: &Value, now: i64) {
    tracing::info!(target: "audit", admin_id = %admin_id, action = %action, detail = %detail, "Admin action");
    if let Err(e) = db::audit::log(&state.pool, admin_id, action, Some(detail), None, now).await {
        tracing::warn!(action = %action, "Failed to write audit entry: {e}");
    }
}
