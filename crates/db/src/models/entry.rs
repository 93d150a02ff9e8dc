//! Entry entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plinth_core::types::{DbId, Timestamp};

/// An entry row from the `entries` table: one sculpture submitted with a
/// registration.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Entry {
    pub id: DbId,
    pub registration_id: DbId,
    pub title: String,
    pub material: Option<String>,
    pub height_cm: i32,
    pub width_cm: i32,
    pub depth_cm: i32,
    pub weight_kg: Option<i32>,
    pub is_for_sale: bool,
    /// Asking price in euro cents; only set when `is_for_sale`.
    pub price_cents: Option<i64>,
    /// `"indoor"` or `"outdoor"`.
    pub placement: String,
    pub description: Option<String>,
    /// Review status, `"pending"`, `"accepted"` or `"rejected"`.
    pub status: String,
    pub decision_reason: Option<String>,
    /// Placement code assigned by an admin after acceptance, e.g. `A-12`.
    pub exhibit_number: Option<String>,
    pub location_note: Option<String>,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEntry {
    pub title: String,
    pub material: Option<String>,
    pub height_cm: i32,
    pub width_cm: i32,
    pub depth_cm: i32,
    pub weight_kg: Option<i32>,
    #[serde(default)]
    pub is_for_sale: bool,
    pub price_cents: Option<i64>,
    pub placement: String,
    pub description: Option<String>,
}

/// DTO for updating an existing entry. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntry {
    pub title: Option<String>,
    pub material: Option<String>,
    pub height_cm: Option<i32>,
    pub width_cm: Option<i32>,
    pub depth_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub is_for_sale: Option<bool>,
    pub price_cents: Option<i64>,
    pub placement: Option<String>,
    pub description: Option<String>,
}

/// Review-queue row for admins: entry columns joined with the registration
/// year and the artist's name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EntryReviewRow {
    pub id: DbId,
    pub registration_id: DbId,
    pub title: String,
    pub placement: String,
    pub status: String,
    pub exhibit_number: Option<String>,
    pub year: i32,
    pub artist_id: DbId,
    pub artist_first_name: Option<String>,
    pub artist_last_name: Option<String>,
    pub created_at: Timestamp,
}
