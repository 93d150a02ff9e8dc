//! Repository for the `users` table.

use sqlx::PgPool;

use plinth_core::types::{DbId, Timestamp};

use crate::models::artist::Artist;
use crate::models::user::{CreateUser, User};
use crate::repositories::artist_repo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, role, is_active, failed_login_count, \
                        locked_until, last_login_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Insert a new user together with an empty artist profile, atomically.
    ///
    /// Signup must never leave a user account without a profile row, so
    /// both inserts run in one transaction.
    pub async fn create_with_profile(
        pool: &PgPool,
        input: &CreateUser,
    ) -> Result<(User, Artist), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let user_query = format!(
            "INSERT INTO users (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&user_query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(&mut *tx)
            .await?;

        let artist_query = format!(
            "INSERT INTO artists (user_id)
             VALUES ($1)
             RETURNING {}",
            artist_repo::COLUMNS
        );
        let artist = sqlx::query_as::<_, Artist>(&artist_query)
            .bind(user.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((user, artist))
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock a user account until the specified timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset the failure counter, clear any lock
    /// and stamp `last_login_at`.
    pub async fn record_login_success(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Resolve the email address of the artist behind a domain entity.
    ///
    /// Supported entity types are `"registration"`, `"entry"` and
    /// `"payment"`; anything else (or a missing row) resolves to `None`.
    /// Used by the mailer to find notification recipients.
    pub async fn email_for_entity(
        pool: &PgPool,
        entity_type: &str,
        entity_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let query = match entity_type {
            "registration" => {
                "SELECT u.email FROM users u
                 JOIN artists a ON a.user_id = u.id
                 JOIN registrations r ON r.artist_id = a.id
                 WHERE r.id = $1"
            }
            "entry" => {
                "SELECT u.email FROM users u
                 JOIN artists a ON a.user_id = u.id
                 JOIN registrations r ON r.artist_id = a.id
                 JOIN entries e ON e.registration_id = r.id
                 WHERE e.id = $1"
            }
            "payment" => {
                "SELECT u.email FROM users u
                 JOIN artists a ON a.user_id = u.id
                 JOIN registrations r ON r.artist_id = a.id
                 JOIN payments p ON p.registration_id = r.id
                 WHERE p.id = $1"
            }
            _ => return Ok(None),
        };
        sqlx::query_scalar(query)
            .bind(entity_id)
            .fetch_optional(pool)
            .await
    }
}
