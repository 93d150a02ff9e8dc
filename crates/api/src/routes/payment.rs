//! Route definitions for the `/payments` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST /webhook -> gateway status callback (public, form-encoded)
/// ```
///
/// Checkout creation and listing live under `/registrations/{id}/payments`.
pub fn router() -> Router<AppState> {
    Router::new().route("/webhook", post(payment::webhook))
}
