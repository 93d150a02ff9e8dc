//! Integration tests for image listing, the primary flag, and deletion.
//!
//! The test app runs without object storage, so uploads answer 503 and the
//! tests seed image rows directly. The flag and deletion endpoints only
//! touch the database and are exercised end to end.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

use plinth_db::models::image::ImageParent;

/// Without configured object storage, uploads answer 503.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_unavailable_without_storage(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _) = common::register_artist(app.clone(), "upload@example.com").await;
    let registration_id = common::create_registration(app.clone(), &token).await;
    let entry_id = common::create_entry(app.clone(), &token, registration_id).await;

    let response = common::post_multipart_auth(
        app.clone(),
        &format!("/api/v1/entries/{entry_id}/images"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "SERVICE_UNAVAILABLE");

    let response = common::post_multipart_auth(app, "/api/v1/artists/me/images", &token).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

/// The draft check runs before the storage check: uploads to a submitted
/// registration conflict instead of answering 503.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_upload_conflict_beats_unavailable(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "uploadfrozen@example.com").await;
    let registration_id = common::create_registration(app.clone(), &token).await;
    let entry_id = common::create_entry(app.clone(), &token, registration_id).await;
    common::insert_entry_image(&pool, entry_id, true).await;

    let response = common::post_auth(
        app.clone(),
        &format!("/api/v1/registrations/{registration_id}/submit"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::post_multipart_auth(
        app,
        &format!("/api/v1/entries/{entry_id}/images"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Entry, registration and artist images list separately.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_image_listings(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, json) = common::register_artist(app.clone(), "imglist@example.com").await;
    let user_id = json["user"]["id"].as_i64().unwrap();
    let registration_id = common::create_registration(app.clone(), &token).await;
    let entry_id = common::create_entry(app.clone(), &token, registration_id).await;

    let artist_id: i64 = sqlx::query_scalar("SELECT id FROM artists WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&pool)
        .await
        .unwrap();

    common::insert_entry_image(&pool, entry_id, true).await;
    common::insert_entry_image(&pool, entry_id, false).await;
    common::insert_image(&pool, ImageParent::Registration(registration_id), false).await;
    common::insert_image(&pool, ImageParent::Artist(artist_id), false).await;

    let response = common::get_auth(
        app.clone(),
        &format!("/api/v1/entries/{entry_id}/images"),
        &token,
    )
    .await;
    let json = common::body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    let response = common::get_auth(
        app.clone(),
        &format!("/api/v1/registrations/{registration_id}/images"),
        &token,
    )
    .await;
    let json = common::body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = common::get_auth(app, "/api/v1/artists/me/images", &token).await;
    let json = common::body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// Making another image primary demotes the current one atomically.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_primary_moves_flag(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "primary@example.com").await;
    let registration_id = common::create_registration(app.clone(), &token).await;
    let entry_id = common::create_entry(app.clone(), &token, registration_id).await;

    common::insert_entry_image(&pool, entry_id, true).await;
    let second = common::insert_entry_image(&pool, entry_id, false).await;

    let response = common::put_auth(
        app.clone(),
        &format!("/api/v1/entries/{entry_id}/images/{}/primary", second.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["id"].as_i64().unwrap(), second.id);
    assert_eq!(json["is_primary"], true);

    let response = common::get_auth(
        app,
        &format!("/api/v1/entries/{entry_id}/images"),
        &token,
    )
    .await;
    let json = common::body_json(response).await;
    let primaries: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["is_primary"] == true)
        .map(|i| i["id"].as_i64().unwrap())
        .collect();
    assert_eq!(primaries, vec![second.id]);
}

/// The primary flag cannot be pointed at an image of a different entry.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_primary_rejects_foreign_image(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "primaryforeign@example.com").await;
    let registration_id = common::create_registration(app.clone(), &token).await;
    let entry_a = common::create_entry(app.clone(), &token, registration_id).await;
    let entry_b = common::create_entry(app.clone(), &token, registration_id).await;

    let image_a = common::insert_entry_image(&pool, entry_a, true).await;
    common::insert_entry_image(&pool, entry_b, true).await;

    // An image of entry A cannot become primary of entry B.
    let response = common::put_auth(
        app,
        &format!("/api/v1/entries/{entry_b}/images/{}/primary", image_a.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Deleting the primary image promotes the oldest remaining one.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_primary_promotes_oldest(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "promote@example.com").await;
    let registration_id = common::create_registration(app.clone(), &token).await;
    let entry_id = common::create_entry(app.clone(), &token, registration_id).await;

    let first = common::insert_entry_image(&pool, entry_id, true).await;
    let second = common::insert_entry_image(&pool, entry_id, false).await;
    let third = common::insert_entry_image(&pool, entry_id, false).await;

    let response = common::delete_auth(
        app.clone(),
        &format!("/api/v1/images/{}", first.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::get_auth(
        app,
        &format!("/api/v1/entries/{entry_id}/images"),
        &token,
    )
    .await;
    let json = common::body_json(response).await;
    let images = json["data"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    // The oldest remaining image took over the flag.
    assert_eq!(images[0]["id"].as_i64().unwrap(), second.id);
    assert_eq!(images[0]["is_primary"], true);
    assert_eq!(images[1]["id"].as_i64().unwrap(), third.id);
    assert_eq!(images[1]["is_primary"], false);
}

/// Deleting a non-primary image leaves the flag alone.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_secondary_keeps_primary(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "keepprimary@example.com").await;
    let registration_id = common::create_registration(app.clone(), &token).await;
    let entry_id = common::create_entry(app.clone(), &token, registration_id).await;

    let first = common::insert_entry_image(&pool, entry_id, true).await;
    let second = common::insert_entry_image(&pool, entry_id, false).await;

    let response = common::delete_auth(
        app.clone(),
        &format!("/api/v1/images/{}", second.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = common::get_auth(
        app,
        &format!("/api/v1/entries/{entry_id}/images"),
        &token,
    )
    .await;
    let json = common::body_json(response).await;
    let images = json["data"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["id"].as_i64().unwrap(), first.id);
    assert_eq!(images[0]["is_primary"], true);
}

/// Another artist's image answers 404 on delete.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_foreign_image_is_404(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (owner_token, _) = common::register_artist(app.clone(), "imgowner@example.com").await;
    let (intruder_token, _) = common::register_artist(app.clone(), "imgintruder@example.com").await;
    let registration_id = common::create_registration(app.clone(), &owner_token).await;
    let entry_id = common::create_entry(app.clone(), &owner_token, registration_id).await;
    let image = common::insert_entry_image(&pool, entry_id, true).await;

    let response = common::delete_auth(
        app,
        &format!("/api/v1/images/{}", image.id),
        &intruder_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// After submit, the primary flag and image deletion are frozen.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_image_mutations_frozen_after_submit(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::register_artist(app.clone(), "imgfrozen@example.com").await;
    let registration_id = common::create_registration(app.clone(), &token).await;
    let entry_id = common::create_entry(app.clone(), &token, registration_id).await;
    let first = common::insert_entry_image(&pool, entry_id, true).await;
    let second = common::insert_entry_image(&pool, entry_id, false).await;

    let response = common::post_auth(
        app.clone(),
        &format!("/api/v1/registrations/{registration_id}/submit"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::put_auth(
        app.clone(),
        &format!("/api/v1/entries/{entry_id}/images/{}/primary", second.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = common::delete_auth(
        app,
        &format!("/api/v1/images/{}", first.id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
