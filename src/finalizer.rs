//! Shift finalizer.
//!
//! Turns one employee's closed sessions for a date into a single, immutable
//! payroll record. A day can be finalized once; a second attempt is refused,
//! never overwritten.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{calculate_daily_pay, round_to, split_daily_hours, validate_rates};
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollRecord, normalize_employee_id};
use crate::store::{RecordFilter, RecordStore};

/// The outcome of a successful finalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedShift {
    /// The payroll record that was written.
    pub record: PayrollRecord,
    /// The summed duration of the day's sessions before the split.
    pub total_hours: Decimal,
    /// How many sessions were recorded on the day.
    pub session_count: usize,
}

/// Finalizes `employee_id`'s work on `date` at the given rates.
///
/// Steps, in order:
/// 1. no sessions → [`EngineError::NoSessions`]
/// 2. any open session → [`EngineError::OpenSession`]
/// 3. sum closed durations, skipping sessions without one
/// 4. split at the policy threshold and price the split
/// 5. existing record → [`EngineError::AlreadyFinalized`]
/// 6. append the rounded record
///
/// Invalid rates are refused with [`EngineError::InvalidRate`] before the
/// store is touched.
///
/// # Examples
///
/// ```
/// use paytrack_engine::config::PayrollConfig;
/// use paytrack_engine::finalizer::finalize_shift;
/// use paytrack_engine::store::InMemoryStore;
/// use paytrack_engine::tracker::{punch_in, punch_out};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let store = InMemoryStore::new();
/// let policy = PayrollConfig::default();
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let at = |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0).unwrap();
///
/// punch_in(&store, "u001", date, at(8, 0)).unwrap();
/// punch_out(&store, &policy, "u001", date, at(17, 30)).unwrap();
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let shift = finalize_shift(&store, &policy, "u001", date, dec("10.0"), dec("1.5")).unwrap();
/// assert_eq!(shift.record.total_pay, dec("102.5"));
/// ```
pub fn finalize_shift(
    store: &dyn RecordStore,
    policy: &PayrollConfig,
    employee_id: &str,
    date: NaiveDate,
    hourly_rate: Decimal,
    overtime_multiplier: Decimal,
) -> EngineResult<FinalizedShift> {
    let employee_id = normalize_employee_id(employee_id);
    validate_rates(hourly_rate, overtime_multiplier)?;

    let key = RecordFilter::day(employee_id, date);
    let sessions = store.list_sessions(&key)?;

    if sessions.is_empty() {
        warn!(employee_id = %employee_id, date = %date, "Finalize refused, no sessions");
        return Err(EngineError::NoSessions {
            employee_id: employee_id.to_string(),
            date,
        });
    }

    let open_sessions = sessions.iter().filter(|s| s.is_open()).count();
    if open_sessions > 0 {
        warn!(
            employee_id = %employee_id,
            date = %date,
            open_sessions,
            "Finalize refused, sessions still open"
        );
        return Err(EngineError::OpenSession {
            employee_id: employee_id.to_string(),
            date,
            open_sessions,
        });
    }

    let total_hours: Decimal = sessions.iter().filter_map(|s| s.duration_hours).sum();
    let split = split_daily_hours(total_hours, policy.daily_overtime_threshold_hours);
    let pay = calculate_daily_pay(&split, hourly_rate, overtime_multiplier);

    let already_finalized = || {
        warn!(employee_id = %employee_id, date = %date, "Finalize refused, already finalized");
        EngineError::AlreadyFinalized {
            employee_id: employee_id.to_string(),
            date,
        }
    };

    if !store.list_payroll_records(&key)?.is_empty() {
        return Err(already_finalized());
    }

    let record = PayrollRecord {
        date,
        employee_id: employee_id.to_string(),
        normal_hours: round_to(split.normal_hours, policy.rounding_dp),
        overtime_hours: round_to(split.overtime_hours, policy.rounding_dp),
        total_pay: round_to(pay, policy.rounding_dp),
    };

    // The store refuses a duplicate itself, covering writers that bypass our check.
    if !store.append_payroll_record(record.clone())? {
        return Err(already_finalized());
    }

    info!(
        employee_id = %employee_id,
        date = %date,
        sessions = sessions.len(),
        normal_hours = %record.normal_hours,
        overtime_hours = %record.overtime_hours,
        total_pay = %record.total_pay,
        "Shift finalized"
    );

    Ok(FinalizedShift {
        record,
        total_hours,
        session_count: sessions.len(),
    })
}
