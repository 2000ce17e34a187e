//! Daily pay calculation.
//!
//! Normal hours are paid at the hourly rate and overtime hours at the
//! hourly rate times the overtime multiplier.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::daily_overtime::DailyHoursSplit;

/// Checks that a rate pair is usable for pay: a non-negative hourly rate and
/// an overtime multiplier of at least 1.0.
pub fn validate_rates(hourly_rate: Decimal, overtime_multiplier: Decimal) -> EngineResult<()> {
    if hourly_rate < Decimal::ZERO {
        return Err(EngineError::InvalidRate {
            field: "hourly_rate".to_string(),
            value: hourly_rate,
            message: "must not be negative".to_string(),
        });
    }
    if overtime_multiplier < Decimal::ONE {
        return Err(EngineError::InvalidRate {
            field: "overtime_multiplier".to_string(),
            value: overtime_multiplier,
            message: "must be at least 1.0".to_string(),
        });
    }
    Ok(())
}

/// Computes the unrounded pay for a split day.
///
/// # Examples
///
/// ```
/// use paytrack_engine::calculation::{calculate_daily_pay, DailyHoursSplit};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let split = DailyHoursSplit {
///     normal_hours: Decimal::from_str("8.0").unwrap(),
///     overtime_hours: Decimal::from_str("1.5").unwrap(),
/// };
/// let pay = calculate_daily_pay(&split, Decimal::from_str("10.0").unwrap(), Decimal::from_str("1.5").unwrap());
/// assert_eq!(pay, Decimal::from_str("102.5").unwrap());
/// ```
pub fn calculate_daily_pay(
    split: &DailyHoursSplit,
    hourly_rate: Decimal,
    overtime_multiplier: Decimal,
) -> Decimal {
    split.normal_hours * hourly_rate + split.overtime_hours * hourly_rate * overtime_multiplier
}
