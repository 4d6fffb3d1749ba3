/// Slack applied before floor/ceil so float noise such as `9.9999999998`
/// does not shift a whole-unit count by one.
pub const ROUNDING_TOLERANCE: f64 = 1e-9;

/// Decimal places used for amounts in the CSV export.
pub const CSV_AMOUNT_DECIMALS: usize = 2;

/// Header of the shopping list CSV export.
///
/// Logical columns: Checked, Name, PlannedAmount, Unit.
pub const CSV_HEADER: [&str; 4] = ["Markiert", "Name", "Geplante Menge", "Einheit"];

/// `ceil` that ignores overshoot smaller than [`ROUNDING_TOLERANCE`].
#[inline]
pub fn tolerant_ceil(value: f64) -> f64 {
    (value - ROUNDING_TOLERANCE).ceil()
}

/// `floor` that ignores undershoot smaller than [`ROUNDING_TOLERANCE`].
#[inline]
pub fn tolerant_floor(value: f64) -> f64 {
    (value + ROUNDING_TOLERANCE).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tolerant_rounding() {
        assert_eq!(tolerant_ceil(1.0000000000002), 1.0);
        assert_eq!(tolerant_ceil(1.01), 2.0);
        assert_eq!(tolerant_ceil(-9.9999999999), -10.0);
        assert_eq!(tolerant_floor(6.9999999999), 7.0);
        assert_eq!(tolerant_floor(7.5), 7.0);
        assert_eq!(tolerant_ceil(0.0), 0.0);
    }
}
