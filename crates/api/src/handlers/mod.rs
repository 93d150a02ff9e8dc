//! Request handlers, one submodule per resource.
//!
//! Handlers delegate to the repositories in `plinth_db`, enforce ownership
//! and status rules from `plinth_core`, and map errors via [`AppError`].
//! Artist-facing resources are always scoped to the authenticated user;
//! requests for rows belonging to another artist answer 404, never 403, so
//! the API does not leak which ids exist.

pub mod admin;
pub mod artist;
pub mod auth;
pub mod entry;
pub mod image;
pub mod payment;
pub mod registration;
pub mod wizard;

use plinth_core::error::CoreError;
use plinth_core::registration_rules::RegistrationStatus;
use plinth_core::types::DbId;
use plinth_db::models::artist::Artist;
use plinth_db::models::entry::Entry;
use plinth_db::models::registration::Registration;
use plinth_db::repositories::{ArtistRepo, EntryRepo, RegistrationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Resolve the artist profile of the authenticated user.
///
/// Every registered user gets an empty artist profile at signup, so a
/// missing row means the caller is not an artist account (e.g. the
/// bootstrapped admin).
pub(crate) async fn current_artist(state: &AppState, user: &AuthUser) -> AppResult<Artist> {
    ArtistRepo::find_by_user_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Artist profile",
            id: user.user_id,
        }))
}

/// Fetch a registration and verify it belongs to the authenticated user.
pub(crate) async fn owned_registration(
    state: &AppState,
    user: &AuthUser,
    registration_id: DbId,
) -> AppResult<(Artist, Registration)> {
    let artist = current_artist(state, user).await?;
    let registration = RegistrationRepo::find_by_id(&state.pool, registration_id)
        .await?
        .filter(|r| r.artist_id == artist.id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Registration",
            id: registration_id,
        }))?;
    Ok((artist, registration))
}

/// Reject mutation once a registration has left the draft state.
///
/// Registration fields, entries and their images are frozen at submission
/// so the jury reviews exactly what the artist submitted.
pub(crate) fn ensure_mutable(registration: &Registration) -> AppResult<()> {
    let status = RegistrationStatus::from_str_db(&registration.status)?;
    if !status.is_mutable() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Registration is {} and can no longer be edited",
            status.as_str()
        ))));
    }
    Ok(())
}

/// Fetch an entry with its registration and verify ownership.
pub(crate) async fn owned_entry(
    state: &AppState,
    user: &AuthUser,
    entry_id: DbId,
) -> AppResult<(Artist, Registration, Entry)> {
    let entry = EntryRepo::find_by_id(&state.pool, entry_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Entry",
            id: entry_id,
        }))?;
    let (artist, registration) = owned_registration(state, user, entry.registration_id)
        .await
        // The registration exists (FK); a miss means it is someone else's.
        .map_err(|_| {
            AppError::Core(CoreError::NotFound {
                entity: "Entry",
                id: entry_id,
            })
        })?;
    Ok((artist, registration, entry))
}
