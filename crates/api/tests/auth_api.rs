//! Integration tests for the auth endpoints: register, login, refresh, logout.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use common::TEST_PASSWORD;

/// Registering creates an account with an empty artist profile and logs
/// the caller straight in.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_creates_account_and_profile(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "email": "  New.Artist@Example.COM ",
        "password": TEST_PASSWORD,
    });
    let response = common::post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = common::body_json(response).await;
    assert!(!json["access_token"].as_str().unwrap().is_empty());
    assert!(!json["refresh_token"].as_str().unwrap().is_empty());
    // Email is normalized before storage.
    assert_eq!(json["user"]["email"], "new.artist@example.com");
    assert_eq!(json["user"]["role"], "artist");

    // The empty profile is reachable immediately.
    let token = json["access_token"].as_str().unwrap();
    let response = common::get_auth(app, "/api/v1/artists/me", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = common::body_json(response).await;
    assert_eq!(profile["first_name"], serde_json::Value::Null);
}

/// A second registration with the same email is rejected with 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "dup@example.com", "password": TEST_PASSWORD });
    let response = common::post_json(app.clone(), "/api/v1/auth/register", body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = common::post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

/// Malformed email addresses are rejected with a validation error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    for email in ["not-an-email", "missing@tld", "spaces in@example.com", ""] {
        let body = serde_json::json!({ "email": email, "password": TEST_PASSWORD });
        let response = common::post_json(app.clone(), "/api/v1/auth/register", body).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "email {email:?} should be rejected"
        );
        let json = common::body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

/// Passwords below the minimum length are rejected before hashing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_rejects_weak_password(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "weak@example.com", "password": "short" });
    let response = common::post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

/// A registered user can log in and receives both tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let app = common::build_test_app(pool);
    common::register_artist(app.clone(), "login@example.com").await;

    let body = serde_json::json!({ "email": "login@example.com", "password": TEST_PASSWORD });
    let response = common::post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert!(!json["access_token"].as_str().unwrap().is_empty());
    assert!(!json["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(json["expires_in"], 15 * 60);
    assert_eq!(json["user"]["email"], "login@example.com");
}

/// A wrong password yields 401 without leaking which part was wrong.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    let app = common::build_test_app(pool);
    common::register_artist(app.clone(), "wrongpw@example.com").await;

    let body = serde_json::json!({ "email": "wrongpw@example.com", "password": "not-the-password" });
    let response = common::post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

/// An unknown email yields the same 401 as a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "email": "ghost@example.com", "password": TEST_PASSWORD });
    let response = common::post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "Invalid email or password");
}

/// Deactivated accounts cannot log in even with the right password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    common::register_artist(app.clone(), "inactive@example.com").await;

    sqlx::query("UPDATE users SET is_active = false WHERE email = $1")
        .bind("inactive@example.com")
        .execute(&pool)
        .await
        .unwrap();

    let body = serde_json::json!({ "email": "inactive@example.com", "password": TEST_PASSWORD });
    let response = common::post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Five consecutive failures lock the account; the lock blocks even the
/// correct password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_lockout_after_repeated_failures(pool: PgPool) {
    let app = common::build_test_app(pool);
    common::register_artist(app.clone(), "locked@example.com").await;

    let wrong = serde_json::json!({ "email": "locked@example.com", "password": "wrong-password-1" });
    for _ in 0..5 {
        let response = common::post_json(app.clone(), "/api/v1/auth/login", wrong.clone()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let correct = serde_json::json!({ "email": "locked@example.com", "password": TEST_PASSWORD });
    let response = common::post_json(app, "/api/v1/auth/login", correct).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = common::body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("locked"));
}

/// Refreshing rotates the session: new tokens are issued and the old
/// refresh token stops working.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_token_refresh_rotates_session(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, json) = common::register_artist(app.clone(), "refresh@example.com").await;
    let old_refresh = json["refresh_token"].as_str().unwrap().to_string();

    let body = serde_json::json!({ "refresh_token": old_refresh });
    let response = common::post_json(app.clone(), "/api/v1/auth/refresh", body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = common::body_json(response).await;
    assert_ne!(rotated["refresh_token"].as_str().unwrap(), old_refresh);

    // The old token was revoked by the rotation.
    let response = common::post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A refresh token that never existed is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_with_unknown_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "refresh_token": "c0ffee00-dead-beef-0000-000000000000" });
    let response = common::post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout revokes every session of the user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout_revokes_sessions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, json) = common::register_artist(app.clone(), "logout@example.com").await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let response = common::post_auth(app.clone(), "/api/v1/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = serde_json::json!({ "refresh_token": refresh_token });
    let response = common::post_json(app, "/api/v1/auth/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
