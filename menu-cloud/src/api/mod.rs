//! API routes for menu-cloud

pub mod admin;
pub mod health;
pub mod image;
pub mod menu;
pub mod register;
pub mod tenant;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use shared::error::{AppError, ErrorCode};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::guards::{require_admin, require_subscription};
use crate::auth::rate_limit::{login_rate_limit, register_rate_limit};
use crate::auth::tenant_auth::tenant_auth_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Log a storage failure and hide it behind `InternalError`
pub(crate) fn internal(e: impl std::fmt::Display) -> AppError {
    tracing::error!("Query error: {e}");
    AppError::new(ErrorCode::InternalError)
}

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");

    // Public menu + account entry points (no auth)
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/menu/{slug}", get(menu::public_menu))
        .route(
            "/api/register",
            post(register::register).route_layer(middleware::from_fn_with_state(
                state.clone(),
                register_rate_limit,
            )),
        )
        .route(
            "/api/login",
            post(tenant::login).route_layer(middleware::from_fn_with_state(
                state.clone(),
                login_rate_limit,
            )),
        );

    // Owner account (JWT, no subscription needed)
    let account = Router::new()
        .route(
            "/api/tenant/profile",
            get(tenant::get_profile).put(tenant::update_profile),
        )
        .route("/api/tenant/subscription", get(tenant::get_subscription))
        .route(
            "/api/tenant/payments",
            get(tenant::list_payments).post(tenant::submit_payment),
        )
        .route("/api/tenant/audit-log", get(tenant::audit_log));

    // Menu builder (JWT + active subscription)
    let builder = Router::new()
        .route(
            "/api/tenant/categories",
            get(tenant::list_categories).post(tenant::create_category),
        )
        .route(
            "/api/tenant/categories/{id}",
            put(tenant::update_category).delete(tenant::delete_category),
        )
        .route(
            "/api/tenant/items",
            get(tenant::list_items).post(tenant::create_item),
        )
        .route("/api/tenant/items/featured", put(tenant::set_featured))
        .route(
            "/api/tenant/items/{id}",
            put(tenant::update_item).delete(tenant::delete_item),
        )
        .route(
            "/api/tenant/images",
            post(image::upload_image).layer(DefaultBodyLimit::max(image::MAX_FILE_SIZE + 64 * 1024)),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_subscription,
        ));

    // Admin console (JWT + admin role)
    let admin = Router::new()
        .route("/api/admin/payments", get(admin::list_payments))
        .route("/api/admin/payments/{id}/verify", post(admin::verify_payment))
        .route("/api/admin/payments/{id}/reject", post(admin::reject_payment))
        .route("/api/admin/tenants", get(admin::list_tenants))
        .route("/api/admin/tenants/{id}/status", put(admin::update_tenant_status))
        .route(
            "/api/admin/subscriptions/{tenant_id}/cancel",
            post(admin::cancel_subscription),
        )
        .route_layer(middleware::from_fn(require_admin));

    let authenticated = Router::new()
        .merge(account)
        .merge(builder)
        .merge(admin)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            tenant_auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .nest_service("/images", ServeDir::new(&state.images_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, XRequestId))
        .with_state(state)
}
