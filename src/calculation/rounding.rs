//! Rounding of stored hours and money.

use rust_decimal::{Decimal, RoundingStrategy};

/// Default number of decimal places kept for hours and pay.
pub const DEFAULT_ROUNDING_DP: u32 = 2;

/// Rounds `value` to `dp` decimal places, halves away from zero.
///
/// ```
/// use paytrack_engine::calculation::round_to;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_to(Decimal::from_str("2.345").unwrap(), 2), Decimal::from_str("2.35").unwrap());
/// ```
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}
