//! Integration tests for the payment endpoints.
//!
//! The test app runs without a gateway client, so checkout creation and
//! webhook re-checks answer 503 once their guards pass; the guards
//! themselves and the listing are exercised fully. Settlement via the
//! gateway is covered by the client's own tests; the manual mark-paid
//! path is covered in the admin tests.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

/// Submit a registration with one valid entry, returning its id.
async fn submitted_registration(app: axum::Router, pool: &PgPool, token: &str) -> i64 {
    let registration_id = common::create_registration(app.clone(), token).await;
    let entry_id = common::create_entry(app.clone(), token, registration_id).await;
    common::insert_entry_image(pool, entry_id, true).await;

    let response = common::post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/submit"),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    registration_id
}

/// Checkout creation requires a submitted registration.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_checkout_requires_submitted(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = common::register_artist(app.clone(), "paydraft@example.com").await;
    let registration_id = common::create_registration(app.clone(), &token).await;

    let response = common::post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/payments"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = common::body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Submit"));
}

/// With the guards passed but no gateway configured, checkout answers 503.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_checkout_unavailable_without_gateway(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "paynogw@example.com").await;
    let registration_id = submitted_registration(app.clone(), &pool, &token).await;

    let response = common::post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/payments"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");
}

/// A settled registration refuses another checkout.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_checkout_conflicts_when_already_paid(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "paypaid@example.com").await;
    let registration_id = submitted_registration(app.clone(), &pool, &token).await;
    common::insert_payment(&pool, registration_id, "paid").await;

    let response = common::post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/payments"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = common::body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("already been paid"));
}

/// Artists see the payment trail of their own registration.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_own_payments(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "paylist@example.com").await;
    let registration_id = submitted_registration(app.clone(), &pool, &token).await;

    common::insert_payment(&pool, registration_id, "expired").await;
    common::insert_payment(&pool, registration_id, "paid").await;

    let response = common::get_auth(
        app.clone(),
        &format!("/api/v1/registrations/{registration_id}/payments"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["amount_cents"], 3500);
    assert_eq!(rows[0]["currency"], "EUR");

    // But not someone else's.
    let (intruder_token, _) = common::register_artist(app.clone(), "payintruder@example.com").await;
    let response = common::get_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/payments"),
        &intruder_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The webhook answers 404 for payment ids we never issued.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_webhook_unknown_payment_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::post_form(app, "/api/v1/payments/webhook", "id=tr_doesnotexist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

/// On a known id the webhook must re-check with the gateway; without one
/// it reports 503 so the gateway keeps retrying.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_webhook_known_id_needs_gateway(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "payhook@example.com").await;
    let registration_id = submitted_registration(app.clone(), &pool, &token).await;
    common::insert_payment(&pool, registration_id, "open").await;

    let provider_payment_id: String =
        sqlx::query_scalar("SELECT provider_payment_id FROM payments WHERE registration_id = $1")
            .bind(registration_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    let response = common::post_form(
        app,
        "/api/v1/payments/webhook",
        &format!("id={provider_payment_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

/// An open (unsettled) payment does not block a new checkout attempt;
/// only a settled one does.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_checkout_allowed_while_unpaid(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "payopen@example.com").await;
    let registration_id = submitted_registration(app.clone(), &pool, &token).await;

    common::insert_payment(&pool, registration_id, "open").await;

    // The guards pass; only the missing gateway stops the attempt.
    let response = common::post_auth(
        app,
        &format!("/api/v1/registrations/{registration_id}/payments"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
