//! Route definitions for the `/artists` resource.
//!
//! Everything here is scoped to the authenticated artist; there is no
//! artist-by-id surface for non-admins.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::image::UPLOAD_BODY_LIMIT;
use crate::handlers::{artist, image, wizard};
use crate::state::AppState;

/// Routes mounted at `/artists`.
///
/// ```text
/// GET  /me         -> get_profile
/// PUT  /me         -> update_profile
/// GET  /me/wizard  -> wizard state for a year
/// POST /me/images  -> upload portfolio image (multipart)
/// GET  /me/images  -> list portfolio images
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(artist::get_profile).put(artist::update_profile))
        .route("/me/wizard", get(wizard::get_state))
        .route(
            "/me/images",
            post(image::upload_artist_image)
                .get(image::list_artist_images)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}
