//! Repository for the `registrations` table.

use sqlx::PgPool;

use plinth_core::types::DbId;
use plinth_core::wizard::SubmissionFacts;

use crate::models::registration::{Registration, RegistrationListRow, UpdateRegistration};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, artist_id, year, needs_transport, needs_power, attends_opening, \
                        remarks, status, submitted_at, created_at, updated_at";

/// Provides CRUD operations for registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert a new draft registration for an artist and year.
    pub async fn create(
        pool: &PgPool,
        artist_id: DbId,
        year: i32,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations (artist_id, year)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(artist_id)
            .bind(year)
            .fetch_one(pool)
            .await
    }

    /// Find a registration by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM registrations WHERE id = $1");
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an artist's registrations, optionally filtered by year,
    /// newest year first.
    pub async fn list_for_artist(
        pool: &PgPool,
        artist_id: DbId,
        year: Option<i32>,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM registrations
             WHERE artist_id = $1 AND ($2::int IS NULL OR year = $2)
             ORDER BY year DESC"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(artist_id)
            .bind(year)
            .fetch_all(pool)
            .await
    }

    /// Update a registration's logistics fields. Only non-`None` fields in
    /// `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRegistration,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "UPDATE registrations SET
                needs_transport = COALESCE($2, needs_transport),
                needs_power = COALESCE($3, needs_power),
                attends_opening = COALESCE($4, attends_opening),
                remarks = COALESCE($5, remarks)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .bind(input.needs_transport)
            .bind(input.needs_power)
            .bind(input.attends_opening)
            .bind(&input.remarks)
            .fetch_optional(pool)
            .await
    }

    /// Move a draft registration to `submitted` and stamp `submitted_at`.
    ///
    /// Returns `None` if the row does not exist or is not a draft.
    pub async fn set_submitted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "UPDATE registrations SET status = 'submitted', submitted_at = NOW()
             WHERE id = $1 AND status = 'draft'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a submitted registration to `confirmed`.
    ///
    /// Returns `None` if the row does not exist or is not submitted.
    pub async fn set_confirmed(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query = format!(
            "UPDATE registrations SET status = 'confirmed'
             WHERE id = $1 AND status = 'submitted'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Admin listing with artist names and entry counts, optionally filtered
    /// by year and status, paginated.
    pub async fn list_admin(
        pool: &PgPool,
        year: Option<i32>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RegistrationListRow>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationListRow>(
            "SELECT r.id, r.artist_id, r.year, r.status, r.submitted_at,
                    a.first_name AS artist_first_name,
                    a.last_name AS artist_last_name,
                    COUNT(e.id) AS entry_count,
                    COUNT(e.id) FILTER (WHERE e.status = 'accepted') AS accepted_count,
                    r.created_at
             FROM registrations r
             JOIN artists a ON a.id = r.artist_id
             LEFT JOIN entries e ON e.registration_id = r.id
             WHERE ($1::int IS NULL OR r.year = $1)
               AND ($2::text IS NULL OR r.status = $2)
             GROUP BY r.id, a.first_name, a.last_name
             ORDER BY r.submitted_at DESC NULLS LAST, r.id DESC
             LIMIT $3 OFFSET $4",
        )
        .bind(year)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Derive the wizard facts for an artist and year in one query.
    ///
    /// Returns `None` if the artist does not exist. Profile completeness
    /// requires the contact fields (name, address, phone) to be non-empty;
    /// website, biography and bank details stay optional.
    pub async fn submission_facts(
        pool: &PgPool,
        artist_id: DbId,
        year: i32,
    ) -> Result<Option<SubmissionFacts>, sqlx::Error> {
        let row: Option<(bool, bool, bool, bool, bool, bool)> = sqlx::query_as(
            "SELECT
                (NULLIF(TRIM(COALESCE(a.first_name, '')), '') IS NOT NULL
                 AND NULLIF(TRIM(COALESCE(a.last_name, '')), '') IS NOT NULL
                 AND NULLIF(TRIM(COALESCE(a.street, '')), '') IS NOT NULL
                 AND NULLIF(TRIM(COALESCE(a.postal_code, '')), '') IS NOT NULL
                 AND NULLIF(TRIM(COALESCE(a.city, '')), '') IS NOT NULL
                 AND NULLIF(TRIM(COALESCE(a.country, '')), '') IS NOT NULL
                 AND NULLIF(TRIM(COALESCE(a.phone, '')), '') IS NOT NULL) AS profile_complete,
                (r.id IS NOT NULL) AS registration_exists,
                EXISTS (
                    SELECT 1 FROM entries e WHERE e.registration_id = r.id
                ) AS has_entries,
                EXISTS (
                    SELECT 1 FROM entries e WHERE e.registration_id = r.id
                ) AND NOT EXISTS (
                    SELECT 1 FROM entries e
                    WHERE e.registration_id = r.id
                      AND NOT EXISTS (
                          SELECT 1 FROM images i
                          WHERE i.entry_id = e.id AND i.is_primary
                      )
                ) AS all_entries_have_primary_image,
                (r.status IN ('submitted', 'confirmed')) IS TRUE AS submitted,
                EXISTS (
                    SELECT 1 FROM payments p
                    WHERE p.registration_id = r.id AND p.status = 'paid'
                ) AS paid
             FROM artists a
             LEFT JOIN registrations r ON r.artist_id = a.id AND r.year = $2
             WHERE a.id = $1",
        )
        .bind(artist_id)
        .bind(year)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(
            |(
                profile_complete,
                registration_exists,
                has_entries,
                all_entries_have_primary_image,
                submitted,
                paid,
            )| SubmissionFacts {
                profile_complete,
                registration_exists,
                has_entries,
                all_entries_have_primary_image,
                submitted,
                paid,
            },
        ))
    }
}
