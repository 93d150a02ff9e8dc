pub mod admin;
pub mod artist;
pub mod auth;
pub mod entry;
pub mod health;
pub mod image;
pub mod payment;
pub mod registration;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/refresh                           refresh (public)
/// /auth/logout                            logout (requires auth)
///
/// /artists/me                             get, update own profile
/// /artists/me/wizard                      derived wizard state (?year=&step=)
/// /artists/me/images                      upload, list portfolio images
///
/// /registrations                          create draft, list own (?year=)
/// /registrations/{id}                     get, update (draft only)
/// /registrations/{id}/submit              submit for review (POST)
/// /registrations/{id}/entries             add, list entries
/// /registrations/{id}/images              upload, list supporting images
/// /registrations/{id}/payments            create checkout, list payments
///
/// /entries/{id}                           get, update, delete (draft only)
/// /entries/{id}/images                    upload, list images
/// /entries/{id}/images/{image_id}/primary make primary (PUT)
///
/// /images/{id}                            delete (DELETE)
///
/// /payments/webhook                       gateway callback (public, POST)
///
/// /admin/registrations                    overview listing (admin)
/// /admin/registrations/{id}               review detail
/// /admin/registrations/{id}/confirm       confirm participation (POST)
/// /admin/entries                          review queue
/// /admin/entries/{id}/decision            accept / reject (POST)
/// /admin/entries/{id}/placement           assign exhibit number (PUT)
/// /admin/payments                         reconciliation listing
/// /admin/payments/{id}/mark-paid          settle manually (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // The authenticated artist's own profile, wizard and portfolio.
        .nest("/artists", artist::router())
        // Registrations with nested entries, images and payments.
        .nest("/registrations", registration::router())
        // Entry-scoped sub-resources (images, primary flag).
        .nest("/entries", entry::router())
        // Direct image addressing (deletion only).
        .nest("/images", image::router())
        // Payment gateway webhook.
        .nest("/payments", payment::router())
        // Review, confirmation and reconciliation (admin only).
        .nest("/admin", admin::router())
}
