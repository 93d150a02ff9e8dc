//! Handlers for the `/registrations` resource (artist-facing).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use plinth_core::error::CoreError;
use plinth_core::registration_rules::{self, RegistrationStatus};
use plinth_core::types::DbId;
use plinth_db::models::registration::{CreateRegistration, Registration, UpdateRegistration};
use plinth_db::repositories::RegistrationRepo;
use plinth_events::ExhibitionEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::{current_artist, ensure_mutable, owned_registration};
use crate::middleware::auth::AuthUser;
use crate::query::YearParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Sanity bounds for the exhibition year; anything outside is a typo.
const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

/// POST /api/v1/registrations
///
/// Create a draft registration for an exhibition year. One per artist per
/// year; a duplicate answers 409.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateRegistration>,
) -> AppResult<(StatusCode, Json<Registration>)> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&input.year) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Year must be between {MIN_YEAR} and {MAX_YEAR}"
        ))));
    }

    let artist = current_artist(&state, &user).await?;
    let registration = RegistrationRepo::create(&state.pool, artist.id, input.year).await?;

    tracing::info!(
        registration_id = registration.id,
        artist_id = artist.id,
        year = registration.year,
        "Registration created"
    );

    Ok((StatusCode::CREATED, Json(registration)))
}

/// GET /api/v1/registrations?year=
///
/// The authenticated artist's own registrations, newest year first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<YearParams>,
) -> AppResult<Json<DataResponse<Vec<Registration>>>> {
    let artist = current_artist(&state, &user).await?;
    let rows = RegistrationRepo::list_for_artist(&state.pool, artist.id, params.year).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/registrations/{id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Registration>> {
    let (_, registration) = owned_registration(&state, &user, id).await?;
    Ok(Json(registration))
}

/// PUT /api/v1/registrations/{id}
///
/// Partial update of the logistics fields. Only allowed while draft.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRegistration>,
) -> AppResult<Json<Registration>> {
    let (_, registration) = owned_registration(&state, &user, id).await?;
    ensure_mutable(&registration)?;

    let updated = RegistrationRepo::update(&state.pool, registration.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id,
        }))?;

    Ok(Json(updated))
}

/// POST /api/v1/registrations/{id}/submit
///
/// Submit a draft registration for jury review. Requires at least one entry
/// and a primary image on every entry; afterwards the registration and its
/// entries are frozen.
pub async fn submit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Registration>> {
    let (artist, registration) = owned_registration(&state, &user, id).await?;

    let status = RegistrationStatus::from_str_db(&registration.status)?;
    registration_rules::validate_submit(status)?;

    let facts = RegistrationRepo::submission_facts(&state.pool, artist.id, registration.year)
        .await?
        .unwrap_or_default();
    if !facts.has_entries {
        return Err(AppError::Core(CoreError::Validation(
            "At least one entry is required before submitting".to_string(),
        )));
    }
    if !facts.all_entries_have_primary_image {
        return Err(AppError::Core(CoreError::Validation(
            "Every entry needs a primary image before submitting".to_string(),
        )));
    }

    // The status guard in the UPDATE catches a concurrent submit.
    let submitted = RegistrationRepo::set_submitted(&state.pool, registration.id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Registration was already submitted".to_string(),
            ))
        })?;

    state.event_bus.publish(
        ExhibitionEvent::new("registration.submitted")
            .with_entity("registration", submitted.id)
            .with_actor(user.user_id)
            .with_payload(json!({ "year": submitted.year })),
    );

    tracing::info!(
        registration_id = submitted.id,
        artist_id = artist.id,
        year = submitted.year,
        "Registration submitted"
    );

    Ok(Json(submitted))
}
