//! Registration entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plinth_core::types::{DbId, Timestamp};

/// A registration row from the `registrations` table.
///
/// One per artist per exhibition year, enforced by
/// `uq_registrations_artist_year`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub artist_id: DbId,
    pub year: i32,
    pub needs_transport: bool,
    pub needs_power: bool,
    pub attends_opening: bool,
    pub remarks: Option<String>,
    /// Lifecycle status, `"draft"`, `"submitted"` or `"confirmed"`.
    pub status: String,
    pub submitted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a registration. The artist is resolved from the
/// authenticated user, never taken from the client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRegistration {
    pub year: i32,
}

/// DTO for updating a draft registration. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRegistration {
    pub needs_transport: Option<bool>,
    pub needs_power: Option<bool>,
    pub attends_opening: Option<bool>,
    pub remarks: Option<String>,
}

/// Listing row for the admin registration overview: registration columns
/// joined with the artist's name and entry counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationListRow {
    pub id: DbId,
    pub artist_id: DbId,
    pub year: i32,
    pub status: String,
    pub submitted_at: Option<Timestamp>,
    pub artist_first_name: Option<String>,
    pub artist_last_name: Option<String>,
    pub entry_count: i64,
    pub accepted_count: i64,
    pub created_at: Timestamp,
}
