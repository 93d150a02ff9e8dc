//! Status rules for exhibition registrations.
//!
//! A registration moves `draft -> submitted -> confirmed`, always forward.
//! Artists own the first transition (submit), admins the second (confirm,
//! once the fee is settled).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Draft,
    Submitted,
    Confirmed,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "confirmed" => Ok(Self::Confirmed),
            other => Err(CoreError::Internal(format!(
                "Unknown registration status value in database: {other}"
            ))),
        }
    }

    /// Whether the artist may still edit the registration and its entries.
    pub fn is_mutable(self) -> bool {
        self == Self::Draft
    }
}

/// Check that a draft registration may be submitted.
///
/// The entry and image requirements are checked separately against the
/// derived submission facts; this only guards the status transition.
pub fn validate_submit(current: RegistrationStatus) -> Result<(), CoreError> {
    match current {
        RegistrationStatus::Draft => Ok(()),
        other => Err(CoreError::Conflict(format!(
            "Registration is {} and can no longer be submitted",
            other.as_str()
        ))),
    }
}

/// Check that a registration may be confirmed by an admin.
///
/// Requires the registration to be submitted and its fee settled.
pub fn validate_confirm(current: RegistrationStatus, paid: bool) -> Result<(), CoreError> {
    match current {
        RegistrationStatus::Submitted if paid => Ok(()),
        RegistrationStatus::Submitted => Err(CoreError::Conflict(
            "Registration fee has not been paid yet".to_string(),
        )),
        RegistrationStatus::Confirmed => Err(CoreError::Conflict(
            "Registration is already confirmed".to_string(),
        )),
        RegistrationStatus::Draft => Err(CoreError::Conflict(
            "Registration has not been submitted yet".to_string(),
        )),
    }
}
