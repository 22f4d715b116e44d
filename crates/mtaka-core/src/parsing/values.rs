use crate::model::RawValue;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Largest magnitude accepted for a single quantity cell, in kilograms.
///
/// Anything beyond this is a data-entry error; it is treated as malformed.
/// Keeps every sum over a dataset far inside `Decimal`'s range.
pub const MAX_QUANTITY_KG: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Coerce a raw quantity cell into kilograms.
///
/// Numbers pass through. Strings are trimmed; blank means zero; otherwise
/// the leading numeric prefix is read ("2.5 kg" -> 2.5). Anything that has
/// no numeric prefix, or whose magnitude exceeds [`MAX_QUANTITY_KG`], is
/// zero. This never fails.
pub fn coerce_quantity(value: &RawValue) -> Decimal {
    let quantity = match value {
        RawValue::Empty => return Decimal::ZERO,
        RawValue::Number(n) => *n,
        RawValue::Text(s) => match parse_leading_decimal(s) {
            Some(d) => d,
            None => {
                let digits = s.trim().trim_start_matches(['+', '-', '.']);
                if digits.starts_with(|c: char| c.is_ascii_digit()) {
                    log::warn!("quantity '{}' is not representable; treated as 0", s.trim());
                }
                return Decimal::ZERO;
            }
        },
    };
    if quantity.abs() > MAX_QUANTITY_KG {
        log::warn!("quantity {quantity} exceeds {MAX_QUANTITY_KG} kg; treated as 0");
        return Decimal::ZERO;
    }
    quantity
}

/// Parse the longest numeric prefix of `s`, accepting an optional sign,
/// a decimal point and an exponent.
pub fn parse_leading_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    let mantissa = s[..end].trim_end_matches('.');

    // Optional exponent, only taken if it has digits
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            let scientific = format!("{}{}", normalize_mantissa(mantissa), &s[end..exp_end]);
            return Decimal::from_scientific(&scientific).ok();
        }
    }

    Decimal::from_str(&normalize_mantissa(mantissa)).ok()
}

/// ".5" and "+2" are not accepted by Decimal::from_str.
fn normalize_mantissa(m: &str) -> String {
    let (sign, rest) = match m.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", m.strip_prefix('+').unwrap_or(m)),
    };
    if rest.starts_with('.') {
        format!("{sign}0{rest}")
    } else {
        format!("{sign}{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_number_passes_through() {
        assert_eq!(coerce_quantity(&RawValue::Number(dec!(2.3))), dec!(2.3));
    }

    #[test]
    fn test_empty_and_blank_are_zero() {
        assert_eq!(coerce_quantity(&RawValue::Empty), Decimal::ZERO);
        assert_eq!(coerce_quantity(&RawValue::from("")), Decimal::ZERO);
        assert_eq!(coerce_quantity(&RawValue::from("   ")), Decimal::ZERO);
    }

    #[test]
    fn test_numeric_string() {
        assert_eq!(coerce_quantity(&RawValue::from(" 18 ")), dec!(18));
        assert_eq!(coerce_quantity(&RawValue::from("0.9")), dec!(0.9));
        assert_eq!(coerce_quantity(&RawValue::from("-1.5")), dec!(-1.5));
    }

    #[test]
    fn test_leading_prefix() {
        assert_eq!(coerce_quantity(&RawValue::from("2.5 kg")), dec!(2.5));
        assert_eq!(coerce_quantity(&RawValue::from("3.")), dec!(3));
        assert_eq!(coerce_quantity(&RawValue::from(".5")), dec!(0.5));
        assert_eq!(coerce_quantity(&RawValue::from("+4")), dec!(4));
    }

    #[test]
    fn test_exponent() {
        assert_eq!(coerce_quantity(&RawValue::from("1.5e2")), dec!(150));
        assert_eq!(coerce_quantity(&RawValue::from("2e")), dec!(2));
    }

    #[test]
    fn test_absurd_magnitude_is_zero() {
        let huge = "60000000000000000000000000000";
        assert_eq!(coerce_quantity(&RawValue::from(huge)), Decimal::ZERO);
        assert_eq!(coerce_quantity(&RawValue::from("1e30")), Decimal::ZERO);
        assert_eq!(
            coerce_quantity(&RawValue::Number(dec!(1000000.5))),
            Decimal::ZERO
        );
        assert_eq!(coerce_quantity(&RawValue::Number(dec!(-2000000))), Decimal::ZERO);
        assert_eq!(coerce_quantity(&RawValue::from("1000000")), dec!(1000000));
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(coerce_quantity(&RawValue::from("n/a")), Decimal::ZERO);
        assert_eq!(coerce_quantity(&RawValue::from("-")), Decimal::ZERO);
        assert_eq!(coerce_quantity(&RawValue::from(".")), Decimal::ZERO);
    }
}
