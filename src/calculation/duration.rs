//! Session duration calculation.
//!
//! A session is recorded as two times of day on one calendar date. When the
//! end time is earlier than the start time the session wrapped past
//! midnight, and the end is taken to be on the following day.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use super::rounding::round_to;

const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Returns the hours between `start` and `end`, rounded to `dp` places.
///
/// A negative difference is treated as an overnight wrap and 24 hours are
/// added, so the result always lies in `[0, 24)`.
///
/// # Examples
///
/// ```
/// use paytrack_engine::calculation::session_duration_hours;
/// use chrono::NaiveTime;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let start = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
/// assert_eq!(session_duration_hours(start, end, 2), Decimal::from_str("4.0").unwrap());
/// ```
pub fn session_duration_hours(start: NaiveTime, end: NaiveTime, dp: u32) -> Decimal {
    let mut seconds = end.signed_duration_since(start).num_seconds();
    if seconds < 0 {
        seconds += SECONDS_PER_DAY;
    }

    round_to(
        Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR),
        dp,
    )
}
