//! Route definitions for the `/registrations` resource.
//!
//! Also nests the entry, image and payment sub-resources under
//! `/registrations/{id}/...`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::image::UPLOAD_BODY_LIMIT;
use crate::handlers::{entry, image, payment, registration};
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// POST   /                -> create (draft)
/// GET    /                -> list own
/// GET    /{id}            -> get
/// PUT    /{id}            -> update (draft only)
/// POST   /{id}/submit     -> submit for review
///
/// POST   /{id}/entries    -> add entry (draft only)
/// GET    /{id}/entries    -> list entries
///
/// POST   /{id}/images     -> upload supporting image (multipart, draft only)
/// GET    /{id}/images     -> list supporting images
///
/// POST   /{id}/payments   -> create fee checkout (submitted only)
/// GET    /{id}/payments   -> list payments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registration::create).get(registration::list))
        .route(
            "/{id}",
            get(registration::get).put(registration::update),
        )
        .route("/{id}/submit", post(registration::submit))
        .route("/{id}/entries", post(entry::create).get(entry::list))
        .route(
            "/{id}/images",
            post(image::upload_registration_image)
                .get(image::list_registration_images)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/{id}/payments",
            post(payment::create_checkout).get(payment::list),
        )
}
