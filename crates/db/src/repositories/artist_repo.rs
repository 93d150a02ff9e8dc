//! Repository for the `artists` table.

use sqlx::PgPool;

use plinth_core::types::DbId;

use crate::models::artist::{Artist, UpdateArtistProfile};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str =
    "id, user_id, first_name, last_name, street, postal_code, city, country, \
     phone, website, biography, account_holder, iban, bic, \
     created_at, updated_at";

/// Provides CRUD operations for artist profiles.
pub struct ArtistRepo;

impl ArtistRepo {
    /// Insert an empty profile for a freshly registered user.
    pub async fn create_for_user(pool: &PgPool, user_id: DbId) -> Result<Artist, sqlx::Error> {
        let query = format!(
            "INSERT INTO artists (user_id)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an artist by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists WHERE id = $1");
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the profile belonging to a user account.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM artists WHERE user_id = $1");
        sqlx::query_as::<_, Artist>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArtistProfile,
    ) -> Result<Option<Artist>, sqlx::Error> {
        let query = format!(
            "UPDATE artists SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                street = COALESCE($4, street),
                postal_code = COALESCE($5, postal_code),
                city = COALESCE($6, city),
                country = COALESCE($7, country),
                phone = COALESCE($8, phone),
                website = COALESCE($9, website),
                biography = COALESCE($10, biography),
                account_holder = COALESCE($11, account_holder),
                iban = COALESCE($12, iban),
                bic = COALESCE($13, bic)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Artist>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.street)
            .bind(&input.postal_code)
            .bind(&input.city)
            .bind(&input.country)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(&input.biography)
            .bind(&input.account_holder)
            .bind(&input.iban)
            .bind(&input.bic)
            .fetch_optional(pool)
            .await
    }
}
