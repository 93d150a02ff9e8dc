//! Validation and state rules for exhibition entries.
//!
//! Entries are the individual sculptures an artist submits with a
//! registration. The database stores placement and status as text; this
//! module owns the canonical string forms plus the field validation the
//! handlers run before writing.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Where an entry can be exhibited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Indoor,
    Outdoor,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Indoor => "indoor",
            Self::Outdoor => "outdoor",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "indoor" => Ok(Self::Indoor),
            "outdoor" => Ok(Self::Outdoor),
            other => Err(CoreError::Internal(format!(
                "Unknown placement value in database: {other}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Review status of an entry.
///
/// Every entry starts as `Pending`; an admin decision moves it to `Accepted`
/// or `Rejected`. Decisions are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    Pending,
    Accepted,
    Rejected,
}

impl EntryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Internal(format!(
                "Unknown entry status value in database: {other}"
            ))),
        }
    }
}

/// Check that a review decision is allowed from the current status.
///
/// Only pending entries can be decided; repeating or flipping a decision is
/// a conflict.
pub fn validate_decision(current: EntryStatus, decision: EntryStatus) -> Result<(), CoreError> {
    if decision == EntryStatus::Pending {
        return Err(CoreError::Validation(
            "Decision must be accepted or rejected".to_string(),
        ));
    }
    if current != EntryStatus::Pending {
        return Err(CoreError::Conflict(format!(
            "Entry has already been {}",
            current.as_str()
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum dimension in centimeters. Nothing over ten meters fits the venue.
pub const MAX_DIMENSION_CM: i32 = 1000;

/// Maximum weight in kilograms.
pub const MAX_WEIGHT_KG: i32 = 5000;

/// Maximum asking price in euro cents (one million euros).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title is required".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate one dimension field (height, width or depth) in centimeters.
pub fn validate_dimension_cm(name: &str, value: i32) -> Result<(), CoreError> {
    if value < 1 || value > MAX_DIMENSION_CM {
        return Err(CoreError::Validation(format!(
            "{name} must be between 1 and {MAX_DIMENSION_CM} cm"
        )));
    }
    Ok(())
}

pub fn validate_weight_kg(value: i32) -> Result<(), CoreError> {
    if value < 1 || value > MAX_WEIGHT_KG {
        return Err(CoreError::Validation(format!(
            "Weight must be between 1 and {MAX_WEIGHT_KG} kg"
        )));
    }
    Ok(())
}

/// Validate the asking price of an entry marked for sale.
///
/// Entries not for sale carry no price; handlers skip this check for them.
pub fn validate_price_cents(price_cents: i64) -> Result<(), CoreError> {
    if price_cents < 1 || price_cents > MAX_PRICE_CENTS {
        return Err(CoreError::Validation(format!(
            "Price must be between 1 and {MAX_PRICE_CENTS} cents"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Exhibit numbers
// ---------------------------------------------------------------------------

/// Normalize an exhibit number to its canonical `A-12` form.
///
/// Accepted shapes: one ASCII letter (the zone), an optional separator
/// (`-`, space, or nothing), and one to three digits. The canonical form is
/// the uppercased letter, a hyphen, and the number without leading zeros.
pub fn normalize_exhibit_number(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();

    let zone = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
        _ => {
            return Err(CoreError::Validation(
                "Exhibit number must start with a zone letter, e.g. A-12".to_string(),
            ))
        }
    };

    let rest: String = chars.collect();
    let digits = rest.trim_start_matches(['-', ' ']);
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(
            "Exhibit number must end in 1 to 3 digits, e.g. A-12".to_string(),
        ));
    }

    let number: u16 = digits
        .parse()
        .map_err(|_| CoreError::Validation("Exhibit number digits out of range".to_string()))?;
    if number == 0 {
        return Err(CoreError::Validation(
            "Exhibit number 0 is not assignable".to_string(),
        ));
    }

    Ok(format!("{zone}-{number}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- placement / status strings --

    #[test]
    fn placement_roundtrip() {
        for p in [Placement::Indoor, Placement::Outdoor] {
            assert_eq!(Placement::from_str_db(p.as_str()).unwrap(), p);
        }
    }

    #[test]
    fn placement_rejects_unknown() {
        assert!(Placement::from_str_db("garden").is_err());
    }

    #[test]
    fn status_roundtrip() {
        for s in [
            EntryStatus::Pending,
            EntryStatus::Accepted,
            EntryStatus::Rejected,
        ] {
            assert_eq!(EntryStatus::from_str_db(s.as_str()).unwrap(), s);
        }
    }

    // -- decisions --

    #[test]
    fn pending_entry_can_be_accepted_or_rejected() {
        assert!(validate_decision(EntryStatus::Pending, EntryStatus::Accepted).is_ok());
        assert!(validate_decision(EntryStatus::Pending, EntryStatus::Rejected).is_ok());
    }

    #[test]
    fn decided_entry_cannot_be_decided_again() {
        let err =
            validate_decision(EntryStatus::Accepted, EntryStatus::Rejected).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        let err =
            validate_decision(EntryStatus::Rejected, EntryStatus::Accepted).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn decision_must_not_be_pending() {
        let err = validate_decision(EntryStatus::Pending, EntryStatus::Pending).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    // -- field validation --

    #[test]
    fn title_rules() {
        assert!(validate_title("Bronze Wave").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn title_length_counts_chars_not_bytes() {
        // 200 multibyte characters are fine even though they exceed 200 bytes.
        assert!(validate_title(&"ä".repeat(MAX_TITLE_LEN)).is_ok());
    }

    #[test]
    fn dimension_bounds() {
        assert!(validate_dimension_cm("Height", 1).is_ok());
        assert!(validate_dimension_cm("Height", MAX_DIMENSION_CM).is_ok());
        assert!(validate_dimension_cm("Height", 0).is_err());
        assert!(validate_dimension_cm("Height", -5).is_err());
        assert!(validate_dimension_cm("Height", MAX_DIMENSION_CM + 1).is_err());
    }

    #[test]
    fn weight_bounds() {
        assert!(validate_weight_kg(1).is_ok());
        assert!(validate_weight_kg(MAX_WEIGHT_KG).is_ok());
        assert!(validate_weight_kg(0).is_err());
        assert!(validate_weight_kg(MAX_WEIGHT_KG + 1).is_err());
    }

    #[test]
    fn price_bounds() {
        assert!(validate_price_cents(1).is_ok());
        assert!(validate_price_cents(350_000).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents(0).is_err());
        assert!(validate_price_cents(-100).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
    }

    // -- exhibit numbers --

    #[test]
    fn exhibit_number_canonical_forms() {
        assert_eq!(normalize_exhibit_number("A-12").unwrap(), "A-12");
        assert_eq!(normalize_exhibit_number("a12").unwrap(), "A-12");
        assert_eq!(normalize_exhibit_number("b 7").unwrap(), "B-7");
        assert_eq!(normalize_exhibit_number("  C-003  ").unwrap(), "C-3");
        assert_eq!(normalize_exhibit_number("z999").unwrap(), "Z-999");
    }

    #[test]
    fn exhibit_number_rejects_malformed() {
        assert!(normalize_exhibit_number("").is_err());
        assert!(normalize_exhibit_number("12").is_err());
        assert!(normalize_exhibit_number("A").is_err());
        assert!(normalize_exhibit_number("A-").is_err());
        assert!(normalize_exhibit_number("A-0").is_err());
        assert!(normalize_exhibit_number("A-1234").is_err());
        assert!(normalize_exhibit_number("AB-12").is_err());
        assert!(normalize_exhibit_number("A-1x").is_err());
    }
}
