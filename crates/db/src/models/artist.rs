//! Artist profile model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use plinth_core::types::{DbId, Timestamp};

/// An artist profile row from the `artists` table.
///
/// Created empty when the user account is registered; the contact and bank
/// fields are filled in through the profile step of the wizard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Artist {
    pub id: DbId,
    pub user_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub biography: Option<String>,
    pub account_holder: Option<String>,
    pub iban: Option<String>,
    pub bic: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating an artist profile. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArtistProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub biography: Option<String>,
    pub account_holder: Option<String>,
    /// Validated with the mod-97 check and normalized before storage.
    pub iban: Option<String>,
    pub bic: Option<String>,
}
