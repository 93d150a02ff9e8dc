//! Handlers for the `/artists/me` resource (own profile).

use axum::extract::State;
use axum::Json;

use plinth_core::error::CoreError;
use plinth_core::iban;
use plinth_db::models::artist::{Artist, UpdateArtistProfile};
use plinth_db::repositories::ArtistRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::current_artist;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/artists/me
///
/// The authenticated user's own artist profile.
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Artist>> {
    let artist = current_artist(&state, &user).await?;
    Ok(Json(artist))
}

/// PUT /api/v1/artists/me
///
/// Partial profile update. Only fields present in the body are changed.
/// A supplied IBAN is checksum-validated and stored in normalized form.
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<UpdateArtistProfile>,
) -> AppResult<Json<Artist>> {
    let artist = current_artist(&state, &user).await?;

    if let Some(raw) = &input.iban {
        input.iban = Some(iban::validate(raw)?);
    }

    let updated = ArtistRepo::update(&state.pool, artist.id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artist profile",
            id: artist.id,
        }))?;

    tracing::info!(artist_id = updated.id, "Artist profile updated");

    Ok(Json(updated))
}
