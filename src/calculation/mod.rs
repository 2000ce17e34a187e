//! Calculation logic for the PayTrack engine.
//!
//! This module contains the pure arithmetic shared by the session tracker
//! and the shift finalizer: session duration with overnight wrap, the daily
//! normal/overtime split, daily pay, and rounding. It is the only place
//! where hours and pay are derived.

mod daily_overtime;
mod daily_pay;
mod duration;
mod rounding;

pub use daily_overtime::{DEFAULT_DAILY_OVERTIME_THRESHOLD, DailyHoursSplit, split_daily_hours};
pub use daily_pay::{calculate_daily_pay, validate_rates};
pub use duration::session_duration_hours;
pub use rounding::{DEFAULT_ROUNDING_DP, round_to};
