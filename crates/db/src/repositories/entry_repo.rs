//! Repository for the `entries` table.

use sqlx::PgPool;

use plinth_core::types::DbId;

use crate::models::entry::{CreateEntry, Entry, EntryReviewRow, UpdateEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, registration_id, title, material, height_cm, width_cm, depth_cm, \
                        weight_kg, is_for_sale, price_cents, placement, description, status, \
                        decision_reason, exhibit_number, location_note, decided_at, \
                        created_at, updated_at";

/// Provides CRUD operations for entries.
pub struct EntryRepo;

impl EntryRepo {
    /// Insert a new entry under a registration, returning the created row.
    pub async fn create(
        pool: &PgPool,
        registration_id: DbId,
        input: &CreateEntry,
    ) -> Result<Entry, sqlx::Error> {
        let query = format!(
            "INSERT INTO entries (registration_id, title, material, height_cm, width_cm,
                                  depth_cm, weight_kg, is_for_sale, price_cents, placement,
                                  description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(registration_id)
            .bind(&input.title)
            .bind(&input.material)
            .bind(input.height_cm)
            .bind(input.width_cm)
            .bind(input.depth_cm)
            .bind(input.weight_kg)
            .bind(input.is_for_sale)
            .bind(input.price_cents)
            .bind(&input.placement)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find an entry by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM entries WHERE id = $1");
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all entries of a registration, oldest first.
    pub async fn list_for_registration(
        pool: &PgPool,
        registration_id: DbId,
    ) -> Result<Vec<Entry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM entries WHERE registration_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(registration_id)
            .fetch_all(pool)
            .await
    }

    /// Update an entry's artist-editable fields. Only non-`None` fields in
    /// `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEntry,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET
                title = COALESCE($2, title),
                material = COALESCE($3, material),
                height_cm = COALESCE($4, height_cm),
                width_cm = COALESCE($5, width_cm),
                depth_cm = COALESCE($6, depth_cm),
                weight_kg = COALESCE($7, weight_kg),
                is_for_sale = COALESCE($8, is_for_sale),
                price_cents = COALESCE($9, price_cents),
                placement = COALESCE($10, placement),
                description = COALESCE($11, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.material)
            .bind(input.height_cm)
            .bind(input.width_cm)
            .bind(input.depth_cm)
            .bind(input.weight_kg)
            .bind(input.is_for_sale)
            .bind(input.price_cents)
            .bind(&input.placement)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record an admin decision on a pending entry.
    ///
    /// Returns `None` if the row does not exist or is no longer pending.
    pub async fn set_decision(
        pool: &PgPool,
        id: DbId,
        status: &str,
        reason: Option<&str>,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET status = $2, decision_reason = $3, decided_at = NOW()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(status)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Assign an exhibit number and optional location note to an accepted
    /// entry.
    ///
    /// Returns `None` if the row does not exist or is not accepted.
    pub async fn set_placement(
        pool: &PgPool,
        id: DbId,
        exhibit_number: &str,
        location_note: Option<&str>,
    ) -> Result<Option<Entry>, sqlx::Error> {
        let query = format!(
            "UPDATE entries SET exhibit_number = $2, location_note = $3
             WHERE id = $1 AND status = 'accepted'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .bind(exhibit_number)
            .bind(location_note)
            .fetch_optional(pool)
            .await
    }

    /// Whether an exhibit number is already assigned to another entry in the
    /// given year.
    pub async fn exhibit_number_taken(
        pool: &PgPool,
        year: i32,
        exhibit_number: &str,
        exclude_entry_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM entries e
                JOIN registrations r ON r.id = e.registration_id
                WHERE r.year = $1 AND e.exhibit_number = $2 AND e.id != $3
            )",
        )
        .bind(year)
        .bind(exhibit_number)
        .bind(exclude_entry_id)
        .fetch_one(pool)
        .await
    }

    /// Admin review queue with registration year and artist names, optionally
    /// filtered by year and status, paginated.
    pub async fn list_review(
        pool: &PgPool,
        year: Option<i32>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EntryReviewRow>, sqlx::Error> {
        sqlx::query_as::<_, EntryReviewRow>(
            "SELECT e.id, e.registration_id, e.title, e.placement, e.status,
                    e.exhibit_number, r.year, a.id AS artist_id,
                    a.first_name AS artist_first_name,
                    a.last_name AS artist_last_name,
                    e.created_at
             FROM entries e
             JOIN registrations r ON r.id = e.registration_id
             JOIN artists a ON a.id = r.artist_id
             WHERE r.status != 'draft'
               AND ($1::int IS NULL OR r.year = $1)
               AND ($2::text IS NULL OR e.status = $2)
             ORDER BY e.created_at, e.id
             LIMIT $3 OFFSET $4",
        )
        .bind(year)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
