//! Integration tests for the artist profile endpoints.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

/// The profile endpoints require a valid access token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(app, "/api/v1/artists/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Admin accounts have no artist profile; /artists/me answers 404 for them.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_admin_has_no_artist_profile(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin_token = common::create_admin(&pool).await;

    let response = common::get_auth(app, "/api/v1/artists/me", &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Updates are partial: absent fields keep their current value.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_profile_is_partial(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = common::register_artist(app.clone(), "partial@example.com").await;

    let response = common::put_json_auth(
        app.clone(),
        "/api/v1/artists/me",
        &token,
        serde_json::json!({ "first_name": "Maria" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::put_json_auth(
        app.clone(),
        "/api/v1/artists/me",
        &token,
        serde_json::json!({ "last_name": "Stone", "city": "Utrecht" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["first_name"], "Maria");
    assert_eq!(json["last_name"], "Stone");
    assert_eq!(json["city"], "Utrecht");
    assert_eq!(json["street"], serde_json::Value::Null);
}

/// An IBAN that fails the mod-97 check is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_profile_rejects_bad_iban(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = common::register_artist(app.clone(), "badiban@example.com").await;

    let response = common::put_json_auth(
        app,
        "/api/v1/artists/me",
        &token,
        serde_json::json!({ "iban": "NL91ABNA0417164301" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// A valid IBAN is stored in normalized form (uppercase, no spaces).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_profile_normalizes_iban(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = common::register_artist(app.clone(), "iban@example.com").await;

    let response = common::put_json_auth(
        app,
        "/api/v1/artists/me",
        &token,
        serde_json::json!({ "iban": "nl91 abna 0417 1643 00", "account_holder": "M. Stone" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["iban"], "NL91ABNA0417164300");
    assert_eq!(json["account_holder"], "M. Stone");
}
