//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the admin role.
///
/// ```text
/// GET  /registrations                -> list with artist names and counts
/// GET  /registrations/{id}           -> full review detail
/// POST /registrations/{id}/confirm   -> confirm (submitted + paid)
///
/// GET  /entries                      -> review queue
/// POST /entries/{id}/decision        -> accept / reject
/// PUT  /entries/{id}/placement       -> assign exhibit number
///
/// GET  /payments                     -> reconciliation listing
/// POST /payments/{id}/mark-paid      -> settle manually (bank transfer)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registrations", get(admin::list_registrations))
        .route("/registrations/{id}", get(admin::get_registration))
        .route(
            "/registrations/{id}/confirm",
            post(admin::confirm_registration),
        )
        .route("/entries", get(admin::list_entries))
        .route("/entries/{id}/decision", post(admin::decide_entry))
        .route("/entries/{id}/placement", put(admin::place_entry))
        .route("/payments", get(admin::list_payments))
        .route("/payments/{id}/mark-paid", post(admin::mark_paid))
}
