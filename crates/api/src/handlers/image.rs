//! Handlers for image uploads and the primary-image flag.
//!
//! Uploads go to object storage first and get a database row second; when
//! the row insert fails the stored object is removed again best-effort.
//! All metadata (content type, dimensions, size) is taken from the actual
//! bytes, never from what the client declares.

use std::io::Cursor;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use image::{ImageFormat, ImageReader};
use uuid::Uuid;

use plinth_core::error::CoreError;
use plinth_core::types::DbId;
use plinth_db::models::image::{CreateImage, Image, ImageParent};
use plinth_db::repositories::ImageRepo;
use plinth_storage::StorageClient;

use crate::error::{AppError, AppResult};
use crate::handlers::{current_artist, ensure_mutable, owned_entry, owned_registration};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted upload size in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Body-size ceiling for the multipart routes, slightly above
/// [`MAX_UPLOAD_BYTES`] to leave room for the multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 2 * 1024 * 1024;

// ---------------------------------------------------------------------------
// Upload handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/entries/{id}/images
///
/// Upload an image for an entry. The first image of an entry automatically
/// becomes its primary image.
pub async fn upload_entry_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Image>)> {
    let (_, registration, entry) = owned_entry(&state, &user, id).await?;
    ensure_mutable(&registration)?;

    let image = store_upload(&state, ImageParent::Entry(entry.id), multipart).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// POST /api/v1/registrations/{id}/images
///
/// Upload a supporting image (site plan, sketch) for a draft registration.
pub async fn upload_registration_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Image>)> {
    let (_, registration) = owned_registration(&state, &user, id).await?;
    ensure_mutable(&registration)?;

    let image = store_upload(&state, ImageParent::Registration(registration.id), multipart).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

/// POST /api/v1/artists/me/images
///
/// Upload a portfolio image for the artist's own profile.
pub async fn upload_artist_image(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Image>)> {
    let artist = current_artist(&state, &user).await?;

    let image = store_upload(&state, ImageParent::Artist(artist.id), multipart).await?;
    Ok((StatusCode::CREATED, Json(image)))
}

// ---------------------------------------------------------------------------
// Listing handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/entries/{id}/images
pub async fn list_entry_images(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Image>>>> {
    let (_, _, entry) = owned_entry(&state, &user, id).await?;
    let rows = ImageRepo::list_for_entry(&state.pool, entry.id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/registrations/{id}/images
pub async fn list_registration_images(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Image>>>> {
    let (_, registration) = owned_registration(&state, &user, id).await?;
    let rows = ImageRepo::list_for_registration(&state.pool, registration.id).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/artists/me/images
pub async fn list_artist_images(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Image>>>> {
    let artist = current_artist(&state, &user).await?;
    let rows = ImageRepo::list_for_artist(&state.pool, artist.id).await?;
    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// Primary flag / deletion
// ---------------------------------------------------------------------------

/// PUT /api/v1/entries/{id}/images/{image_id}/primary
///
/// Make the given image the entry's primary image, demoting the current one.
pub async fn set_primary(
    State(state): State<AppState>,
    user: AuthUser,
    Path((entry_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Image>> {
    let (_, registration, entry) = owned_entry(&state, &user, entry_id).await?;
    ensure_mutable(&registration)?;

    let moved = ImageRepo::set_primary(&state.pool, entry.id, image_id).await?;
    if !moved {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        }));
    }

    let image = ImageRepo::find_by_id(&state.pool, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        }))?;

    tracing::info!(entry_id = entry.id, image_id, "Primary image changed");

    Ok(Json(image))
}

/// DELETE /api/v1/images/{id}
///
/// Remove an image. Deleting an entry's primary image promotes its oldest
/// remaining image so a populated entry never ends up without a primary.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Image", id }))?;

    // Authorize against the image's parent; an image of another artist is
    // indistinguishable from a missing one.
    let not_found = || AppError::Core(CoreError::NotFound { entity: "Image", id });
    if let Some(artist_id) = image.artist_id {
        let artist = current_artist(&state, &user).await.map_err(|_| not_found())?;
        if artist.id != artist_id {
            return Err(not_found());
        }
    } else if let Some(registration_id) = image.registration_id {
        let (_, registration) = owned_registration(&state, &user, registration_id)
            .await
            .map_err(|_| not_found())?;
        ensure_mutable(&registration)?;
    } else if let Some(entry_id) = image.entry_id {
        let (_, registration, _) = owned_entry(&state, &user, entry_id)
            .await
            .map_err(|_| not_found())?;
        ensure_mutable(&registration)?;
    }

    ImageRepo::delete(&state.pool, image.id).await?;

    if image.is_primary {
        if let Some(entry_id) = image.entry_id {
            if let Some(promoted) = ImageRepo::promote_oldest(&state.pool, entry_id).await? {
                tracing::info!(entry_id, image_id = promoted, "Promoted replacement primary image");
            }
        }
    }

    if let Some(storage) = &state.storage {
        if let Err(e) = storage.delete_object(&image.storage_key).await {
            tracing::warn!(
                storage_key = %image.storage_key,
                error = %e,
                "Failed to delete stored object"
            );
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read the `file` field, verify it, upload it and insert the row.
async fn store_upload(
    state: &AppState,
    parent: ImageParent,
    mut multipart: Multipart,
) -> AppResult<Image> {
    let storage = state.storage.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Object storage is not configured".to_string())
    })?;

    // 1. Pull the file field out of the multipart body.
    let mut bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart data: {e}")))?
    {
        if field.name() == Some("file") {
            bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?
                    .to_vec(),
            );
        }
    }
    let bytes =
        bytes.ok_or_else(|| AppError::BadRequest("Missing 'file' field in upload".to_string()))?;

    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(format!(
            "Image exceeds the {} MiB size limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    // 2. Sniff the format from the bytes and read the dimensions from the
    //    header without decoding the full image.
    let reader = ImageReader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(|e| AppError::BadRequest(format!("Unreadable image data: {e}")))?;
    let (content_type, ext) = match reader.format() {
        Some(ImageFormat::Jpeg) => ("image/jpeg", "jpg"),
        Some(ImageFormat::Png) => ("image/png", "png"),
        Some(ImageFormat::WebP) => ("image/webp", "webp"),
        _ => {
            return Err(AppError::BadRequest(
                "Only JPEG, PNG and WebP images are accepted".to_string(),
            ))
        }
    };
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| AppError::BadRequest(format!("Could not read image dimensions: {e}")))?;
    let (width, height) = (
        i32::try_from(width)
            .map_err(|_| AppError::BadRequest("Image dimensions out of range".to_string()))?,
        i32::try_from(height)
            .map_err(|_| AppError::BadRequest("Image dimensions out of range".to_string()))?,
    );

    // 3. Upload under a fresh key.
    let key = format!("images/{}.{ext}", Uuid::new_v4());
    let byte_size = bytes.len() as i64;
    storage
        .put_object(&key, content_type, bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Upload to object storage failed: {e}")))?;

    // 4. Insert the row. The first image of an entry becomes primary.
    let is_primary = match parent {
        ImageParent::Entry(entry_id) => !ImageRepo::has_primary(&state.pool, entry_id).await?,
        _ => false,
    };
    let create = CreateImage {
        parent,
        storage_key: key.clone(),
        public_url: storage.public_url(&key),
        content_type: content_type.to_string(),
        width,
        height,
        byte_size,
        is_primary,
    };
    let image = match ImageRepo::create(&state.pool, &create).await {
        Ok(image) => image,
        Err(e) => {
            remove_orphan(storage, &key).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        image_id = image.id,
        storage_key = %image.storage_key,
        content_type,
        width,
        height,
        is_primary = image.is_primary,
        "Image uploaded"
    );

    Ok(image)
}

/// Best-effort removal of an uploaded object whose row insert failed.
async fn remove_orphan(storage: &StorageClient, key: &str) {
    if let Err(e) = storage.delete_object(key).await {
        tracing::warn!(storage_key = %key, error = %e, "Failed to remove orphaned object");
    }
}
