//! Shared helpers for the HTTP-level integration tests.
//!
//! `build_test_app` reuses the production router builder so the tests
//! exercise the same middleware stack (CORS, request ID, timeout, panic
//! recovery) the binary runs with. Storage and payments are left
//! unconfigured; tests insert image and payment rows directly where needed.

#![allow(dead_code)] // not every test binary uses every helper

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use plinth_api::auth::jwt::{generate_access_token, JwtConfig};
use plinth_api::auth::password::hash_password;
use plinth_api::config::{ExhibitionConfig, ServerConfig};
use plinth_api::router::build_app_router;
use plinth_api::state::AppState;
use plinth_core::roles::ROLE_ADMIN;
use plinth_core::types::DbId;
use plinth_db::models::image::{CreateImage, Image, ImageParent};
use plinth_db::models::payment::CreatePayment;
use plinth_db::models::user::CreateUser;
use plinth_db::repositories::{ImageRepo, PaymentRepo, UserRepo};
use plinth_events::EventBus;

/// Exhibition year the test config is pinned to.
pub const TEST_YEAR: i32 = 2031;

/// Password used for all test accounts (meets the strength requirement).
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults and a fixed secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        exhibition: ExhibitionConfig {
            name: "Sculpture Triennial".to_string(),
            year: TEST_YEAR,
            fee_cents: 3500,
        },
    }
}

/// Build the full application router against the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        event_bus: Arc::new(EventBus::default()),
        storage: None,
        payments: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST without a body, for action endpoints like submit and confirm.
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// PUT without a body, for flag endpoints like make-primary.
pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a URL-encoded form body, the shape gateway webhooks arrive in.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST an empty multipart body, enough to reach the handler's own checks.
pub async fn post_multipart_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let boundary = "test-boundary";
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(format!("--{boundary}--\r\n")))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "Response body is not JSON: {e}: {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register an artist via the API; returns the access token and the
/// response JSON.
pub async fn register_artist(app: Router, email: &str) -> (String, serde_json::Value) {
    let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap().to_string();
    (token, json)
}

/// Create an admin account directly in the database and mint a token for it.
pub async fn create_admin(pool: &PgPool) -> String {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        email: "admin@test.com".to_string(),
        password_hash: hashed,
        role: ROLE_ADMIN.to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("admin creation should succeed");
    generate_access_token(user.id, ROLE_ADMIN, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Domain fixtures
// ---------------------------------------------------------------------------

/// A complete artist profile body for `PUT /artists/me`.
pub fn full_profile_body() -> serde_json::Value {
    serde_json::json!({
        "first_name": "Maria",
        "last_name": "Stone",
        "street": "Kade 12",
        "postal_code": "1011 AB",
        "city": "Amsterdam",
        "country": "NL",
        "phone": "+31612345678",
    })
}

/// A valid entry body for `POST /registrations/{id}/entries`.
pub fn valid_entry_body() -> serde_json::Value {
    serde_json::json!({
        "title": "Bronze Wave",
        "material": "bronze",
        "height_cm": 120,
        "width_cm": 60,
        "depth_cm": 45,
        "weight_kg": 80,
        "is_for_sale": true,
        "price_cents": 250_000,
        "placement": "outdoor",
    })
}

/// Fill the profile, create a draft registration for [`TEST_YEAR`] and
/// return its id.
pub async fn create_registration(app: Router, token: &str) -> DbId {
    let response = put_json_auth(
        app.clone(),
        "/api/v1/artists/me",
        token,
        full_profile_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(
        app,
        "/api/v1/registrations",
        token,
        serde_json::json!({ "year": TEST_YEAR }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Add a valid entry to a registration and return its id.
pub async fn create_entry(app: Router, token: &str, registration_id: DbId) -> DbId {
    let response = post_json_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/entries"),
        token,
        valid_entry_body(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Insert an image row directly (uploads need object storage, which the
/// test app runs without).
pub async fn insert_image(pool: &PgPool, parent: ImageParent, is_primary: bool) -> Image {
    let key = format!("images/{}.jpg", uuid::Uuid::new_v4());
    let input = CreateImage {
        parent,
        storage_key: key.clone(),
        public_url: format!("https://img.test/{key}"),
        content_type: "image/jpeg".to_string(),
        width: 800,
        height: 600,
        byte_size: 1234,
        is_primary,
    };
    ImageRepo::create(pool, &input)
        .await
        .expect("image insert should succeed")
}

/// [`insert_image`] for the common case of an entry image.
pub async fn insert_entry_image(pool: &PgPool, entry_id: DbId, is_primary: bool) -> Image {
    insert_image(pool, ImageParent::Entry(entry_id), is_primary).await
}

/// Insert a payment row directly, optionally already settled.
pub async fn insert_payment(pool: &PgPool, registration_id: DbId, status: &str) -> DbId {
    let input = CreatePayment {
        registration_id,
        provider: "mollie".to_string(),
        provider_payment_id: format!("tr_{}", uuid::Uuid::new_v4().simple()),
        amount_cents: 3500,
        currency: "EUR".to_string(),
        status: status.to_string(),
        checkout_url: Some("https://pay.test/checkout".to_string()),
    };
    let payment = PaymentRepo::create(pool, &input)
        .await
        .expect("payment insert should succeed");
    if status == "paid" {
        PaymentRepo::update_status(pool, payment.id, "paid")
            .await
            .expect("status update should succeed");
    }
    payment.id
}
