//! Route definitions for the `/images` resource.
//!
//! Uploads and listings live under the owning parent (artist, registration,
//! entry); only deletion addresses an image directly.

use axum::routing::delete;
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// DELETE /{id} -> delete (owner only; promotes a new primary if needed)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(image::delete))
}
