use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use menu_cloud::{AppState, Config, api, bootstrap, db};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin-password";

struct TestApp {
    router: Router,
    state: AppState,
    _images: TempDir,
}

async fn test_app() -> TestApp {
    let images = TempDir::new().unwrap();
    let config = Config::for_tests(images.path().to_string_lossy().to_string());
    let pool = db::connect(&config.database_url).await.unwrap();
    let state = AppState::with_pool(pool, &config);
    TestApp {
        router: api::create_router(state.clone()),
        state,
        _images: images,
    }
}

impl TestApp {
    async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    async fn register(&self, email: &str, restaurant_name: &str) -> (String, String) {
        let (status, body) = self
            .post(
                "/api/register",
                None,
                json!({ "email": email, "password": "password123", "restaurant_name": restaurant_name }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["tenant_id"].as_str().unwrap().to_string(),
        )
    }

    async fn admin_token(&self) -> String {
        bootstrap::ensure_admin(&self.state.pool, ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .unwrap();
        let (status, body) = self
            .post(
                "/api/login",
                None,
                json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["role"], "admin");
        body["token"].as_str().unwrap().to_string()
    }

    /// Submit a cash payment as the owner and have the admin verify it.
    async fn activate(&self, owner_token: &str, admin_token: &str) {
        let (status, payment) = self
            .post(
                "/api/tenant/payments",
                Some(owner_token),
                json!({ "plan": "monthly", "method": "cash" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{payment}");
        let id = payment["id"].as_i64().unwrap();
        let (status, _) = self
            .post(&format!("/api/admin/payments/{id}/verify"), Some(admin_token), json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_owner_journey_to_public_menu() {
    let app = test_app().await;
    let (owner, _) = app.register("joe@example.com", "Joe's Pizza").await;
    let admin = app.admin_token().await;

    let (status, profile) = app.get("/api/tenant/profile", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["slug"], "joes-pizza");

    // Builder is locked until a payment is verified
    let (status, body) = app.get("/api/tenant/categories", Some(&owner)).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], 3201);

    let (status, payment) = app
        .post(
            "/api/tenant/payments",
            Some(&owner),
            json!({ "plan": "monthly", "method": "wallet", "reference": "TX-42" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payment["status"], "pending");
    let payment_id = payment["id"].as_i64().unwrap();

    // One pending payment at a time
    let (status, body) = app
        .post(
            "/api/tenant/payments",
            Some(&owner),
            json!({ "plan": "yearly", "method": "cash" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5007);

    let (status, pending) = app.get("/api/admin/payments", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, subscription) = app
        .post(&format!("/api/admin/payments/{payment_id}/verify"), Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(subscription["status"], "active");

    let (status, body) = app
        .post(&format!("/api/admin/payments/{payment_id}/verify"), Some(&admin), json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 5006);

    let (_, info) = app.get("/api/tenant/subscription", Some(&owner)).await;
    assert_eq!(info["is_active"], true);
    assert_eq!(info["remaining_days"], 30);

    // Build the menu
    let (status, pizzas) = app
        .post("/api/tenant/categories", Some(&owner), json!({ "name": "Pizzas" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    let pizzas_id = pizzas["id"].as_i64().unwrap();

    let (status, _) = app
        .post(
            "/api/tenant/items",
            Some(&owner),
            json!({ "name": "Margherita", "price": 1299, "category_id": pizzas_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, bread) = app
        .post(
            "/api/tenant/items",
            Some(&owner),
            json!({ "name": "Garlic Bread", "price": 450 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, featured) = app
        .request(
            Method::PUT,
            "/api/tenant/items/featured",
            Some(&owner),
            Some(json!({ "item_ids": [bread["id"]] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(featured.as_array().unwrap().len(), 1);

    let (status, body) = app
        .post(
            "/api/tenant/items",
            Some(&owner),
            json!({ "name": "Refund", "price": -100 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6202);

    // Public page, no auth
    let (status, menu) = app.get("/api/menu/joes-pizza", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["header"]["name"], "Joe's Pizza");
    assert_eq!(menu["item_count"], 2);
    assert_eq!(menu["sections"][0]["name"], "Pizzas");
    assert_eq!(menu["sections"][0]["items"][0]["price_display"], "$12.99");
    assert_eq!(menu["featured"][0]["name"], "Garlic Bread");
    assert_eq!(menu["uncategorized"][0]["price_display"], "$4.50");
    assert!(menu.get("trace").is_none());

    // A category in use cannot be deleted
    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/tenant/categories/{pizzas_id}"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6102);
}

#[tokio::test]
async fn test_public_menu_unknown_slug() {
    let app = test_app().await;
    let (status, body) = app.get("/api/menu/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3101);
}

#[tokio::test]
async fn test_public_menu_debug_trace() {
    let app = test_app().await;
    app.register("solo@example.com", "Solo Diner").await;

    // Only one restaurant: the legacy fallback serves it for any key
    let (status, menu) = app.get("/api/menu/anything-at-all?debug=true", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["header"]["slug"], "solo-diner");
    let trace = &menu["trace"];
    assert_eq!(trace["search_key"], "anything-at-all");
    assert_eq!(trace["match_key"], "anything at all");
    assert_eq!(trace["resolved_by"], "single_tenant");

    // Slug hit is recorded as such
    let (_, menu) = app.get("/api/menu/solo-diner?debug=true", None).await;
    assert_eq!(menu["trace"]["resolved_by"], "slug");
}

#[tokio::test]
async fn test_auth_and_roles() {
    let app = test_app().await;

    let (status, body) = app.get("/api/tenant/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = app.get("/api/tenant/profile", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (owner, owner_id) = app.register("owner@example.com", "Corner Cafe").await;
    let (status, body) = app.get("/api/admin/tenants", Some(&owner)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);

    let (status, body) = app
        .post(
            "/api/register",
            None,
            json!({ "email": "OWNER@example.com", "password": "password123", "restaurant_name": "Other" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4);

    let (status, _) = app
        .post(
            "/api/login",
            None,
            json!({ "email": "owner@example.com", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Suspension blocks login
    let admin = app.admin_token().await;
    let (status, _) = app
        .request(
            Method::PUT,
            &format!("/api/admin/tenants/{owner_id}/status"),
            Some(&admin),
            Some(json!({ "status": "suspended" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/login",
            None,
            json!({ "email": "owner@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1007);

    let (status, tenants) = app.get("/api/admin/tenants", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tenants.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cancel_locks_builder() {
    let app = test_app().await;
    let (owner, owner_id) = app.register("owner@example.com", "Corner Cafe").await;
    let admin = app.admin_token().await;
    app.activate(&owner, &admin).await;

    let (status, _) = app.get("/api/tenant/items", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            &format!("/api/admin/subscriptions/{owner_id}/cancel"),
            Some(&admin),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/api/tenant/items", Some(&owner)).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["code"], 3202);
}

#[tokio::test]
async fn test_image_upload_is_served() {
    let app = test_app().await;
    let (owner, owner_id) = app.register("owner@example.com", "Corner Cafe").await;
    let admin = app.admin_token().await;
    app.activate(&owner, &admin).await;

    let mut png = Vec::new();
    image::RgbImage::from_pixel(64, 32, image::Rgb([10, 120, 200]))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let boundary = "menu-cloud-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"logo.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(&png);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tenant/images")
        .header(header::AUTHORIZATION, format!("Bearer {owner}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    let (status, uploaded) = app.send(request).await;
    assert_eq!(status, StatusCode::OK, "{uploaded}");

    let hash = uploaded["hash"].as_str().unwrap();
    let url = uploaded["url"].as_str().unwrap();
    assert_eq!(url, format!("/images/{owner_id}/{hash}.jpg"));

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri(url).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let stored = image::load_from_memory(&bytes).unwrap();
    assert_eq!((stored.width(), stored.height()), (64, 32));
}

#[tokio::test]
async fn test_owner_actions_reach_audit_log() {
    let app = test_app().await;
    let (owner, _) = app.register("audit@example.com", "Audit Cafe").await;

    let (status, _) = app
        .post(
            "/api/login",
            None,
            json!({ "email": "audit@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::PUT,
            "/api/tenant/profile",
            Some(&owner),
            Some(json!({ "theme": "dark" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .post(
            "/api/tenant/payments",
            Some(&owner),
            json!({ "plan": "monthly", "method": "cash" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, entries) = app.get("/api/tenant/audit-log", Some(&owner)).await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    for expected in ["register", "login", "profile_updated", "payment_submitted"] {
        assert!(actions.contains(&expected), "missing {expected} in {actions:?}");
    }
}
