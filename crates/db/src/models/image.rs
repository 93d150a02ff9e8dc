//! Image entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use plinth_core::types::{DbId, Timestamp};

/// An image row from the `images` table.
///
/// Exactly one of `artist_id`, `registration_id` and `entry_id` is set
/// (CHECK constraint). Only entry images can be primary; the partial unique
/// index `uq_images_primary_per_entry` guarantees at most one per entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: DbId,
    pub artist_id: Option<DbId>,
    pub registration_id: Option<DbId>,
    pub entry_id: Option<DbId>,
    /// Object key in the storage bucket.
    pub storage_key: String,
    pub public_url: String,
    pub content_type: String,
    pub width: i32,
    pub height: i32,
    pub byte_size: i64,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The parent an image is attached to. Exactly one side of the CHECK
/// constraint, expressed as a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageParent {
    Artist(DbId),
    Registration(DbId),
    Entry(DbId),
}

/// DTO for inserting an uploaded image. Built server-side after the upload
/// to object storage succeeds, never deserialized from the client.
#[derive(Debug, Clone)]
pub struct CreateImage {
    pub parent: ImageParent,
    pub storage_key: String,
    pub public_url: String,
    pub content_type: String,
    pub width: i32,
    pub height: i32,
    pub byte_size: i64,
    pub is_primary: bool,
}
