/// Scale a floating-point quote into the store's fixed-point representation
///
/// Returns `quote * 10^decimal` truncated toward zero. A negative `decimal`
/// is treated as 0.
pub fn to_fixed_point(quote: f64, decimal: i64) -> i64 {
    let exponent = decimal.clamp(0, i32::MAX as i64) as i32;
    let scale = 10f64.powi(exponent);
    (quote * scale) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_instead_of_rounding() {
        assert_eq!(to_fixed_point(1.2345, 2), 123);
        assert_eq!(to_fixed_point(0.999, 2), 99);
        assert_eq!(to_fixed_point(2.5, 0), 2);
    }

    #[test]
    fn test_matches_floor_for_non_negative_quotes() {
        for &(quote, decimal) in &[(0.00042, 8), (12.75, 3), (1.0, 6), (0.0, 4), (987.654321, 5)] {
            let expected = (quote * 10f64.powi(decimal as i32)).floor() as i64;
            assert_eq!(to_fixed_point(quote, decimal), expected, "quote {} decimal {}", quote, decimal);
        }
    }

    #[test]
    fn test_zero_decimal_keeps_integer_part() {
        assert_eq!(to_fixed_point(42.9, 0), 42);
    }

    #[test]
    fn test_negative_decimal_is_clamped() {
        assert_eq!(to_fixed_point(42.9, -3), 42);
    }

    #[test]
    fn test_negative_quote_truncates_toward_zero() {
        assert_eq!(to_fixed_point(-1.239, 2), -123);
    }
}
