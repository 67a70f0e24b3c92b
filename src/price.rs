//! Price-text parsing and money display formatting.
//!
//! Menu frames send prices as display strings (`"₱150.00"`, `"PHP 1,250.50"`).
//! Parsing strips everything except ASCII digits and the decimal point before
//! converting. Totals are kept at full `f64` precision internally; rounding to
//! two decimals happens only at display time.

/// Parse a display price string into a unit price.
///
/// All characters other than ASCII digits and `.` are stripped first, so
/// currency symbols and thousands separators are tolerated. Input that still
/// fails to parse (empty, or multiple decimal points) coerces to `0.0` with a
/// warning rather than poisoning later totals.
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(price = %text, "unparseable price text, coercing to 0");
            0.0
        }
    }
}

/// Format an amount for display: peso sign plus two decimal places.
///
/// Rounds half away from zero (so `80.125` renders as `₱80.13`, not the
/// formatter's half-to-even `₱80.12`) and normalizes negative zero: summing
/// an empty line-item list yields the float additive identity `-0.0`, which
/// must still render as `₱0.00`.
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("₱{:.2}", rounded + 0.0)
}

#[cfg(test)]
mod tests {
    use super::{format_amount, parse_price};

    #[test]
    fn parses_plain_number() {
        assert_eq!(parse_price("150"), 150.0);
    }

    #[test]
    fn strips_currency_symbol() {
        assert_eq!(parse_price("₱150.00"), 150.0);
    }

    #[test]
    fn strips_thousands_separator() {
        assert_eq!(parse_price("₱1,250.50"), 1250.5);
    }

    #[test]
    fn strips_currency_code_and_spaces() {
        assert_eq!(parse_price("PHP 80.00"), 80.0);
    }

    #[test]
    fn empty_text_coerces_to_zero() {
        assert_eq!(parse_price(""), 0.0);
    }

    #[test]
    fn garbage_text_coerces_to_zero() {
        assert_eq!(parse_price("free!"), 0.0);
    }

    #[test]
    fn multiple_decimal_points_coerce_to_zero() {
        // "1.2.3" survives stripping but is not a number.
        assert_eq!(parse_price("1.2.3"), 0.0);
    }

    #[test]
    fn format_rounds_to_two_decimals() {
        assert_eq!(format_amount(430.0), "₱430.00");
        assert_eq!(format_amount(80.125), "₱80.13");
    }

    #[test]
    fn negative_zero_formats_as_plain_zero() {
        assert_eq!(format_amount(-0.0), "₱0.00");
    }

    #[test]
    fn empty_sum_formats_as_plain_zero() {
        // Summing no line totals yields -0.0, the float additive identity.
        let subtotal: f64 = std::iter::empty::<f64>().sum();
        assert_eq!(format_amount(subtotal), "₱0.00");
    }

    #[test]
    fn format_keeps_display_only_rounding() {
        // Internal value stays full precision; only the rendering rounds.
        let value = 0.1 + 0.2;
        assert_eq!(format_amount(value), "₱0.30");
    }
}
