//! Money formatting for pages and prompts.
//!
//! Amounts are carried as integer cents and shown as `$<dollars>.<cents>`,
//! always with two decimals and no thousands separator.

/// Format cents as dollars, e.g. `-1505` -> `"-$15.05"`.
pub fn format_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Format cents as a plain decimal number without a currency symbol.
pub fn format_decimal(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(7000), "$70.00");
        assert_eq!(format_dollars(5), "$0.05");
        assert_eq!(format_dollars(0), "$0.00");
        assert_eq!(format_dollars(123456), "$1234.56");
    }

    #[test]
    fn test_format_dollars_negative() {
        assert_eq!(format_dollars(-1505), "-$15.05");
        assert_eq!(format_dollars(i64::MIN), "-$92233720368547758.08");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(1500), "15.00");
        assert_eq!(format_decimal(-20), "-0.20");
    }
}
