//! Repository for the `payments` table.

use sqlx::PgPool;

use plinth_core::types::DbId;

use crate::models::payment::{CreatePayment, Payment, PaymentListRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, registration_id, provider, provider_payment_id, amount_cents, \
                        currency, status, checkout_url, paid_at, created_at, updated_at";

/// Provides CRUD operations for payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a checkout created at the payment provider.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (registration_id, provider, provider_payment_id,
                                   amount_cents, currency, status, checkout_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.registration_id)
            .bind(&input.provider)
            .bind(&input.provider_payment_id)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(&input.status)
            .bind(&input.checkout_url)
            .fetch_one(pool)
            .await
    }

    /// Find a payment by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a payment by the provider's payment id (webhook lookups).
    pub async fn find_by_provider_payment_id(
        pool: &PgPool,
        provider_payment_id: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE provider_payment_id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(provider_payment_id)
            .fetch_optional(pool)
            .await
    }

    /// List all payments of a registration, newest first.
    pub async fn list_for_registration(
        pool: &PgPool,
        registration_id: DbId,
    ) -> Result<Vec<Payment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM payments WHERE registration_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(registration_id)
            .fetch_all(pool)
            .await
    }

    /// Update a payment's status; stamps `paid_at` when it flips to paid.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!(
            "UPDATE payments SET
                status = $2,
                paid_at = CASE WHEN $2 = 'paid' AND paid_at IS NULL THEN NOW() ELSE paid_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Whether a registration has at least one settled payment.
    pub async fn has_paid(pool: &PgPool, registration_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
                SELECT 1 FROM payments WHERE registration_id = $1 AND status = 'paid'
            )",
        )
        .bind(registration_id)
        .fetch_one(pool)
        .await
    }

    /// Admin reconciliation listing with registration year and artist names,
    /// optionally filtered by year and status, paginated.
    pub async fn list_admin(
        pool: &PgPool,
        year: Option<i32>,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PaymentListRow>, sqlx::Error> {
        sqlx::query_as::<_, PaymentListRow>(
            "SELECT p.id, p.registration_id, p.provider, p.provider_payment_id,
                    p.amount_cents, p.currency, p.status, p.paid_at, r.year,
                    a.first_name AS artist_first_name,
                    a.last_name AS artist_last_name,
                    p.created_at
             FROM payments p
             JOIN registrations r ON r.id = p.registration_id
             JOIN artists a ON a.id = r.artist_id
             WHERE ($1::int IS NULL OR r.year = $1)
               AND ($2::text IS NULL OR p.status = $2)
             ORDER BY p.created_at DESC, p.id DESC
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
