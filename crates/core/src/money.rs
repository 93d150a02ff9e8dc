//! Euro amount formatting.
//!
//! All amounts are stored as integer cents; formatting only happens at the
//! edges (emails, payment descriptions).

/// Format an amount in cents as a euro string, e.g. `€35.00`.
pub fn format_eur_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}€{}.{:02}", abs / 100, abs % 100)
}

/// Decimal string without the euro sign, as payment providers expect,
/// e.g. `35.00`.
pub fn eur_decimal_string(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fractional_amounts() {
        assert_eq!(format_eur_cents(3500), "€35.00");
        assert_eq!(format_eur_cents(199), "€1.99");
        assert_eq!(format_eur_cents(5), "€0.05");
        assert_eq!(format_eur_cents(0), "€0.00");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_eur_cents(-250), "-€2.50");
    }

    #[test]
    fn decimal_string_for_providers() {
        assert_eq!(eur_decimal_string(3500), "35.00");
        assert_eq!(eur_decimal_string(7), "0.07");
    }
}
