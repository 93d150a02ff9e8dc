//! IBAN normalization and checksum validation.
//!
//! Artists supply a bank account for sale payouts. We validate it up front
//! with the standard mod-97 check (ISO 13616) instead of waiting for the
//! payout run to bounce.

use crate::error::CoreError;

/// Shortest IBAN currently assigned (Norway).
const MIN_LEN: usize = 15;

/// Longest IBAN permitted by the standard.
const MAX_LEN: usize = 34;

/// Strip spaces and uppercase. Does not validate.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Validate an IBAN and return its normalized form.
pub fn validate(raw: &str) -> Result<String, CoreError> {
    let iban = normalize(raw);

    if iban.len() < MIN_LEN || iban.len() > MAX_LEN {
        return Err(CoreError::Validation(format!(
            "IBAN must be between {MIN_LEN} and {MAX_LEN} characters"
        )));
    }
    if !iban.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(CoreError::Validation(
            "IBAN may only contain letters and digits".to_string(),
        ));
    }
    if !iban.as_bytes()[..2].iter().all(u8::is_ascii_uppercase)
        || !iban.as_bytes()[2..4].iter().all(u8::is_ascii_digit)
    {
        return Err(CoreError::Validation(
            "IBAN must start with a country code and two check digits".to_string(),
        ));
    }

    // Mod-97: move the first four characters to the end, map letters to
    // 10..35, and take the remainder digit by digit to avoid overflow.
    let rearranged = format!("{}{}", &iban[4..], &iban[..4]);
    let mut remainder: u32 = 0;
    for b in rearranged.bytes() {
        let value = if b.is_ascii_digit() {
            (b - b'0') as u32
        } else {
            (b - b'A') as u32 + 10
        };
        remainder = if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        };
    }

    if remainder != 1 {
        return Err(CoreError::Validation(
            "IBAN checksum is invalid".to_string(),
        ));
    }

    Ok(iban)
}
