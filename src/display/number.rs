//! Number formatting for terminal output
//!
//! Grouped decimal output with configurable separators, significant-digit
//! output for unit conversions, and the exchange calculator's switch to
//! exponential notation for very large results.

use crate::config::settings::NumberFormat;

/// Insert `separator` between every group of three digits
pub fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Grouped fixed-point output with between `min_fraction` and
/// `max_fraction` fraction digits
pub fn format_grouped(
    value: f64,
    min_fraction: usize,
    max_fraction: usize,
    format: &NumberFormat,
) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let max_fraction = max_fraction.max(min_fraction);
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < min_fraction {
        fraction.push('0');
    }

    // -0.00001 rounds to zero and shows unsigned
    let negative = value < 0.0 && fixed.bytes().any(|b| (b'1'..=b'9').contains(&b));

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &format.thousands_separator));
    if !fraction.is_empty() {
        out.push_str(&format.decimal_separator);
        out.push_str(&fraction);
    }
    out
}

/// Money amount with two fraction digits
pub fn format_currency(value: f64, symbol: &str, format: &NumberFormat) -> String {
    let body = format_grouped(value.abs(), 2, 2, format);
    if value < 0.0 && body.bytes().any(|b| (b'1'..=b'9').contains(&b)) {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

/// Split Rust's `1.23e5` output into mantissa and exponent
fn split_exponent(sci: &str) -> (&str, i32) {
    match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (sci, 0),
    }
}

fn signed_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{}", mantissa, sign, exp.abs())
}

/// Exponential notation with `fraction_digits` after the point (`1.23e+12`)
pub fn format_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let sci = format!("{:.*e}", fraction_digits, value);
    let (mantissa, exp) = split_exponent(&sci);
    signed_exponent(mantissa, exp)
}

/// `digits` significant digits, switching to exponential notation for
/// exponents below -6 or at least `digits`
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);

    // Rounding can carry into a new digit (999999.7 -> 1.00000e6), so take
    // the exponent after rounding
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = split_exponent(&sci);

    if exp < -6 || exp >= digits as i32 {
        signed_exponent(mantissa, exp)
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        format!("{:.*}", decimals, value)
    }
}

/// Exchange result: grouped with 2 to 4 fraction digits, or exponential
/// with two digits above `threshold`
pub fn format_exchange(value: f64, threshold: f64, format: &NumberFormat) -> String {
    if value > threshold {
        format_exponential(value, 2)
    } else {
        format_grouped(value, 2, 4, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn turkish() -> NumberFormat {
        NumberFormat {
            thousands_separator: ".".into(),
            decimal_separator: ",".into(),
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1", ","), "1");
        assert_eq!(group_thousands("123", ","), "123");
        assert_eq!(group_thousands("1234", ","), "1,234");
        assert_eq!(group_thousands("1234567", "."), "1.234.567");
    }

    #[test]
    fn test_format_grouped() {
        let fmt = NumberFormat::default();
        assert_eq!(format_grouped(1234.5, 2, 4, &fmt), "1,234.50");
        assert_eq!(format_grouped(1234.56789, 2, 4, &fmt), "1,234.5679");
        assert_eq!(format_grouped(0.0, 2, 4, &fmt), "0.00");
        assert_eq!(format_grouped(-9876543.2, 0, 2, &fmt), "-9,876,543.2");
        assert_eq!(format_grouped(-0.00001, 2, 2, &fmt), "0.00");
        assert_eq!(format_grouped(1234.5, 2, 4, &turkish()), "1.234,50");
    }

    #[test]
    fn test_format_currency() {
        let fmt = NumberFormat::default();
        assert_eq!(format_currency(1500.0, "$", &fmt), "$1,500.00");
        assert_eq!(format_currency(-42.126, "$", &fmt), "-$42.13");
        assert_eq!(format_currency(1500.0, "₺", &turkish()), "₺1.500,00");
    }

    #[test]
    fn test_format_significant() {
        assert_eq!(format_significant(1609.344, 6), "1609.34");
        assert_eq!(format_significant(0.3048, 6), "0.304800");
        assert_eq!(format_significant(100.0, 6), "100.000");
        assert_eq!(format_significant(999_999.7, 6), "1.00000e+6");
        assert_eq!(format_significant(1.0e-7, 6), "1.00000e-7");
        assert_eq!(format_significant(-40.0, 6), "-40.0000");
    }

    #[test]
    fn test_format_exchange() {
        let fmt = NumberFormat::default();
        let threshold = 999_999_999_999.0;
        assert_eq!(format_exchange(3250.0, threshold, &fmt), "3,250.00");
        assert_eq!(format_exchange(0.123456, threshold, &fmt), "0.1235");
        assert_eq!(format_exchange(1.234e12, threshold, &fmt), "1.23e+12");
        assert_eq!(format_exchange(threshold, threshold, &fmt), "999,999,999,999.00");
    }
}
