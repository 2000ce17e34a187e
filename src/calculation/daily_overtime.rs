//! Daily overtime split.
//!
//! This module splits a day's worked hours into normal hours (up to the
//! daily threshold) and overtime hours (everything above it).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default daily overtime threshold in hours.
pub const DEFAULT_DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The split of a day's hours into normal and overtime portions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHoursSplit {
    /// Hours up to the threshold.
    pub normal_hours: Decimal,
    /// Hours exceeding the threshold (can be zero).
    pub overtime_hours: Decimal,
}

/// Splits `worked_hours` at `threshold`.
///
/// `normal = min(worked, threshold)` and `overtime = max(worked - threshold, 0)`.
///
/// # Examples
///
/// ## Day exceeding threshold
///
/// ```
/// use paytrack_engine::calculation::{split_daily_hours, DEFAULT_DAILY_OVERTIME_THRESHOLD};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let split = split_daily_hours(Decimal::from_str("9.5").unwrap(), DEFAULT_DAILY_OVERTIME_THRESHOLD);
///
/// assert_eq!(split.normal_hours, Decimal::from_str("8.0").unwrap());
/// assert_eq!(split.overtime_hours, Decimal::from_str("1.5").unwrap());
/// ```
///
/// ## Short day (under threshold)
///
/// ```
/// use paytrack_engine::calculation::{split_daily_hours, DEFAULT_DAILY_OVERTIME_THRESHOLD};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let split = split_daily_hours(Decimal::from_str("6.0").unwrap(), DEFAULT_DAILY_OVERTIME_THRESHOLD);
///
/// assert_eq!(split.normal_hours, Decimal::from_str("6.0").unwrap());
/// assert_eq!(split.overtime_hours, Decimal::ZERO);
/// ```
pub fn split_daily_hours(worked_hours: Decimal, threshold: Decimal) -> DailyHoursSplit {
    let normal_hours = worked_hours.min(threshold);
    let overtime_hours = (worked_hours - threshold).max(Decimal::ZERO);

    DailyHoursSplit {
        normal_hours,
        overtime_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_exactly_8_hours_no_overtime() {
        let split = split_daily_hours(dec("8.0"), dec("8.0"));

        assert_eq!(split.normal_hours, dec("8.0"));
        assert_eq!(split.overtime_hours, dec("0.0"));
    }

    #[test]
    fn test_9_5_hours_1_5_hours_overtime() {
        let split = split_daily_hours(dec("9.5"), DEFAULT_DAILY_OVERTIME_THRESHOLD);

        assert_eq!(split.normal_hours, dec("8.0"));
        assert_eq!(split.overtime_hours, dec("1.5"));
    }

    #[test]
    fn test_11_25_hours_3_25_hours_overtime() {
        let split = split_daily_hours(dec("11.25"), dec("8.0"));

        assert_eq!(split.normal_hours, dec("8.0"));
        assert_eq!(split.overtime_hours, dec("3.25"));
    }

    #[test]
    fn test_zero_hours_worked() {
        let split = split_daily_hours(dec("0.0"), dec("8.0"));

        assert_eq!(split.normal_hours, dec("0.0"));
        assert_eq!(split.overtime_hours, dec("0.0"));
    }

    #[test]
    fn test_custom_threshold() {
        let split = split_daily_hours(dec("8.5"), dec("7.5"));

        assert_eq!(split.normal_hours, dec("7.5"));
        assert_eq!(split.overtime_hours, dec("1.0"));
    }

    #[test]
    fn test_default_threshold_constant() {
        assert_eq!(DEFAULT_DAILY_OVERTIME_THRESHOLD, dec("8"));
    }

    proptest! {
        #[test]
        fn prop_split_preserves_total(hundredths in 0i64..=4800) {
            let worked = Decimal::new(hundredths, 2);
            let split = split_daily_hours(worked, DEFAULT_DAILY_OVERTIME_THRESHOLD);

            prop_assert_eq!(split.normal_hours + split.overtime_hours, worked);
            prop_assert!(split.normal_hours <= DEFAULT_DAILY_OVERTIME_THRESHOLD);
            prop_assert!(split.overtime_hours >= Decimal::ZERO);
        }
    }
}
