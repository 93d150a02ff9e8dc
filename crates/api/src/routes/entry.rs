//! Route definitions for the `/entries` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::image::UPLOAD_BODY_LIMIT;
use crate::handlers::{entry, image};
use crate::state::AppState;

/// Routes mounted at `/entries`.
///
/// ```text
/// GET    /{id}                              -> get
/// PUT    /{id}                              -> update (draft only)
/// DELETE /{id}                              -> delete (draft only)
///
/// POST   /{id}/images                       -> upload image (multipart)
/// GET    /{id}/images                       -> list images
/// PUT    /{id}/images/{image_id}/primary    -> make primary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(entry::get).put(entry::update).delete(entry::delete),
        )
        .route(
            "/{id}/images",
            post(image::upload_entry_image)
                .get(image::list_entry_images)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/{id}/images/{image_id}/primary", put(image::set_primary))
}
