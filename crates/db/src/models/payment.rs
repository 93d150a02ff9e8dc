//! Payment entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use plinth_core::types::{DbId, Timestamp};

/// A payment row from the `payments` table: one checkout created at the
/// payment provider for a registration fee.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub registration_id: DbId,
    /// Provider name, e.g. `"mollie"`.
    pub provider: String,
    /// The provider's payment id, unique across all rows.
    pub provider_payment_id: String,
    pub amount_cents: i64,
    pub currency: String,
    /// Provider status, `"open"`, `"paid"`, `"failed"`, `"expired"` or
    /// `"cancelled"`.
    pub status: String,
    pub checkout_url: Option<String>,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a newly created checkout. Built from the provider
/// response, never deserialized from the client.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub registration_id: DbId,
    pub provider: String,
    pub provider_payment_id: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub checkout_url: Option<String>,
}

/// Reconciliation row for the admin payment overview: payment columns
/// joined with the registration year and artist name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentListRow {
    pub id: DbId,
    pub registration_id: DbId,
    pub provider: String,
    pub provider_payment_id: String,
    pub amount_cents: i64,
    pub currency: String,
    pub status: String,
    pub paid_at: Option<Timestamp>,
    pub year: i32,
    pub artist_first_name: Option<String>,
    pub artist_last_name: Option<String>,
    pub created_at: Timestamp,
}
