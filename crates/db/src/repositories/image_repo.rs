//! Repository for the `images` table.

use sqlx::PgPool;

use plinth_core::types::DbId;

use crate::models::image::{CreateImage, Image, ImageParent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, artist_id, registration_id, entry_id, storage_key, public_url, \
                        content_type, width, height, byte_size, is_primary, \
                        created_at, updated_at";

/// Provides CRUD operations for images.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image row, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let (artist_id, registration_id, entry_id) = match input.parent {
            ImageParent::Artist(id) => (Some(id), None, None),
            ImageParent::Registration(id) => (None, Some(id), None),
            ImageParent::Entry(id) => (None, None, Some(id)),
        };
        let query = format!(
            "INSERT INTO images (artist_id, registration_id, entry_id, storage_key, public_url,
                                 content_type, width, height, byte_size, is_primary)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(artist_id)
            .bind(registration_id)
            .bind(entry_id)
            .bind(&input.storage_key)
            .bind(&input.public_url)
            .bind(&input.content_type)
            .bind(input.width)
            .bind(input.height)
            .bind(input.byte_size)
            .bind(input.is_primary)
            .fetch_one(pool)
            .await
    }

    /// Find an image by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all images of an entry, oldest first.
    pub async fn list_for_entry(pool: &PgPool, entry_id: DbId) -> Result<Vec<Image>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM images WHERE entry_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Image>(&query)
            .bind(entry_id)
            .fetch_all(pool)
            .await
    }

    /// List all images attached directly to a registration, oldest first.
    pub async fn list_for_registration(
        pool: &PgPool,
        registration_id: DbId,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM images WHERE registration_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(registration_id)
            .fetch_all(pool)
            .await
    }

    /// List all images attached directly to an artist profile, oldest first.
    pub async fn list_for_artist(
        pool: &PgPool,
        artist_id: DbId,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM images WHERE artist_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Image>(&query)
            .bind(artist_id)
            .fetch_all(pool)
            .await
    }

    /// Delete an image row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether an entry currently has a primary image.
    pub async fn has_primary(pool: &PgPool, entry_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM images WHERE entry_id = $1 AND is_primary)")
            .bind(entry_id)
            .fetch_one(pool)
            .await
    }

    /// Atomically move the primary flag of an entry to the given image.
    ///
    /// Clears the current primary and sets the new one in a single
    /// transaction so the partial unique index is never violated. Returns
    /// `false` (and rolls back) if the image does not belong to the entry.
    pub async fn set_primary(
        pool: &PgPool,
        entry_id: DbId,
        image_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE images SET is_primary = false WHERE entry_id = $1 AND is_primary")
            .bind(entry_id)
            .execute(&mut *tx)
            .await?;

        let result =
            sqlx::query("UPDATE images SET is_primary = true WHERE id = $1 AND entry_id = $2")
                .bind(image_id)
                .bind(entry_id)
                .execute(&mut *tx)
                .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Promote the oldest image of an entry to primary.
    ///
    /// Used after the primary image is deleted. Returns the promoted image
    /// id, or `None` if the entry has no images left. Callers must ensure no
    /// primary currently exists.
    pub async fn promote_oldest(
        pool: &PgPool,
        entry_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE images SET is_primary = true
             WHERE id = (
                 SELECT id FROM images
                 WHERE entry_id = $1
                 ORDER BY created_at, id
                 LIMIT 1
             )
             RETURNING id",
        )
        .bind(entry_id)
        .fetch_optional(pool)
        .await
    }
}
