//! Handlers for the `/entries` resource (artist-facing).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use plinth_core::entry_rules::{self, Placement};
use plinth_core::error::CoreError;
use plinth_core::types::DbId;
use plinth_db::models::entry::{CreateEntry, Entry, UpdateEntry};
use plinth_db::repositories::{EntryRepo, ImageRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{ensure_mutable, owned_entry, owned_registration};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/registrations/{id}/entries
///
/// Add an entry to a draft registration.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(registration_id): Path<DbId>,
    Json(input): Json<CreateEntry>,
) -> AppResult<(StatusCode, Json<Entry>)> {
    let (_, registration) = owned_registration(&state, &user, registration_id).await?;
    ensure_mutable(&registration)?;
    validate_fields(
        &input.title,
        input.height_cm,
        input.width_cm,
        input.depth_cm,
        input.weight_kg,
        &input.placement,
        input.is_for_sale,
        input.price_cents,
    )?;

    let entry = EntryRepo::create(&state.pool, registration.id, &input).await?;

    tracing::info!(
        entry_id = entry.id,
        registration_id = registration.id,
        title = %entry.title,
        "Entry created"
    );

    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/registrations/{id}/entries
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(registration_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Entry>>>> {
    let (_, registration) = owned_registration(&state, &user, registration_id).await?;
    let rows = EntryRepo::list_for_registration(&state.pool, registration.id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/entries/{id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Entry>> {
    let (_, _, entry) = owned_entry(&state, &user, id).await?;
    Ok(Json(entry))
}

/// PUT /api/v1/entries/{id}
///
/// Partial update. Only allowed while the registration is draft; the fields
/// are validated against the merged result, not just the patch.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEntry>,
) -> AppResult<Json<Entry>> {
    let (_, registration, entry) = owned_entry(&state, &user, id).await?;
    ensure_mutable(&registration)?;

    // Validate the values the row would have after the partial update.
    validate_fields(
        input.title.as_deref().unwrap_or(&entry.title),
        input.height_cm.unwrap_or(entry.height_cm),
        input.width_cm.unwrap_or(entry.width_cm),
        input.depth_cm.unwrap_or(entry.depth_cm),
        input.weight_kg.or(entry.weight_kg),
        input.placement.as_deref().unwrap_or(&entry.placement),
        input.is_for_sale.unwrap_or(entry.is_for_sale),
        input.price_cents.or(entry.price_cents),
    )?;

    let updated = EntryRepo::update(&state.pool, entry.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Entry", id }))?;

    Ok(Json(updated))
}

/// DELETE /api/v1/entries/{id}
///
/// Remove an entry from a draft registration. Its image rows go with it
/// (cascade); the stored objects are cleaned up best-effort.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let (_, registration, entry) = owned_entry(&state, &user, id).await?;
    ensure_mutable(&registration)?;

    let images = ImageRepo::list_for_entry(&state.pool, entry.id).await?;
    EntryRepo::delete(&state.pool, entry.id).await?;

    if let Some(storage) = &state.storage {
        for image in &images {
            if let Err(e) = storage.delete_object(&image.storage_key).await {
                tracing::warn!(
                    storage_key = %image.storage_key,
                    error = %e,
                    "Failed to delete stored object for removed entry"
                );
            }
        }
    }

    tracing::info!(
        entry_id = entry.id,
        registration_id = registration.id,
        "Entry deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate all artist-editable entry fields as one coherent set.
#[allow(clippy::too_many_arguments)]
fn validate_fields(
    title: &str,
    height_cm: i32,
    width_cm: i32,
    depth_cm: i32,
    weight_kg: Option<i32>,
    placement: &str,
    is_for_sale: bool,
    price_cents: Option<i64>,
) -> AppResult<()> {
    entry_rules::validate_title(title)?;
    entry_rules::validate_dimension_cm("Height", height_cm)?;
    entry_rules::validate_dimension_cm("Width", width_cm)?;
    entry_rules::validate_dimension_cm("Depth", depth_cm)?;
    if let Some(weight) = weight_kg {
        entry_rules::validate_weight_kg(weight)?;
    }
    parse_placement(placement)?;

    match (is_for_sale, price_cents) {
        (true, Some(price)) => entry_rules::validate_price_cents(price)?,
        (true, None) => {
            return Err(AppError::Core(CoreError::Validation(
                "An entry for sale needs an asking price".to_string(),
            )))
        }
        // A lingering price on a not-for-sale entry is ignored, not an error,
        // so toggling is_for_sale off does not require clearing the price.
        (false, _) => {}
    }
    Ok(())
}

/// Parse a client-supplied placement string.
///
/// [`Placement::from_str_db`] reports unknown values as internal corruption;
/// user input gets a validation error instead.
fn parse_placement(raw: &str) -> AppResult<Placement> {
    match raw {
        "indoor" => Ok(Placement::Indoor),
        "outdoor" => Ok(Placement::Outdoor),
        _ => Err(AppError::Core(CoreError::Validation(
            "Placement must be indoor or outdoor".to_string(),
        ))),
    }
}
