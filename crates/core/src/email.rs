//! Email address normalization and shape validation.
//!
//! Signup is open to the public, so we only check the rough shape
//! (`local@domain.tld`) and leave real verification to the confirmation
//! mail. Addresses are stored lowercased so the unique index on `users`
//! catches case-variant duplicates.

use crate::error::CoreError;

/// Longest address we accept (RFC 5321 limit).
const MAX_LEN: usize = 254;

/// Trim surrounding whitespace and lowercase.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Validate an email address and return its normalized form.
pub fn validate(raw: &str) -> Result<String, CoreError> {
    let email = normalize(raw);

    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".to_string()));
    }
    if email.len() > MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Email must be at most {MAX_LEN} characters"
        )));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(CoreError::Validation(
            "Email must contain a single @".to_string(),
        ));
    };
    let shape_ok = !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace);
    if !shape_ok {
        return Err(CoreError::Validation(
            "Email address is not valid".to_string(),
        ));
    }

    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes_valid_addresses() {
        assert_eq!(validate("artist@example.com").unwrap(), "artist@example.com");
        assert_eq!(
            validate("  Maria.Stone@Example.COM ").unwrap(),
            "maria.stone@example.com"
        );
        assert_eq!(validate("a+tag@sub.domain.org").unwrap(), "a+tag@sub.domain.org");
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(validate("").is_err());
        assert!(validate("no-at-sign").is_err());
        assert!(validate("@example.com").is_err());
        assert!(validate("artist@").is_err());
        assert!(validate("artist@nodot").is_err());
        assert!(validate("artist@.example.com").is_err());
        assert!(validate("artist@example.com.").is_err());
        assert!(validate("two@@example.com").is_err());
        assert!(validate("spa ce@example.com").is_err());
    }

    #[test]
    fn rejects_overlong_addresses() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(validate(&long).is_err());
    }
}
