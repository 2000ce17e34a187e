//! Read models produced by the history consolidator.
//!
//! This module contains the per-date [`HistoryRow`] and the earnings
//! summaries built from finalized payroll. None of these are ever written
//! back to the record store.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayrollRecord, Session};

/// Number of session slots surfaced per day.
pub const SESSION_SLOTS: usize = 3;

/// One session as shown in a history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSlot {
    /// The identifier of the underlying session.
    pub session_id: String,
    /// Punch-in time.
    pub start_time: NaiveTime,
    /// Punch-out time, absent while the session is open.
    pub end_time: Option<NaiveTime>,
    /// Worked hours, absent while the session is open.
    pub duration_hours: Option<Decimal>,
}

impl From<&Session> for SessionSlot {
    fn from(session: &Session) -> Self {
        SessionSlot {
            session_id: session.id.clone(),
            start_time: session.start_time,
            end_time: session.end_time,
            duration_hours: session.duration_hours,
        }
    }
}

/// Whether a day has been turned into a payroll record yet.
///
/// # Example
///
/// ```
/// use paytrack_engine::models::DayStatus;
/// use rust_decimal::Decimal;
///
/// let status = DayStatus::Finalized { total_pay: Decimal::new(8000, 2) };
/// assert_eq!(status.total_pay(), Some(Decimal::new(8000, 2)));
/// assert_eq!(DayStatus::Pending.total_pay(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayStatus {
    /// No payroll record exists for the day.
    Pending,
    /// A payroll record exists; its pay is reported.
    Finalized {
        /// The pay from the payroll record.
        total_pay: Decimal,
    },
}

impl DayStatus {
    /// The finalized pay, if any.
    pub fn total_pay(&self) -> Option<Decimal> {
        match self {
            DayStatus::Pending => None,
            DayStatus::Finalized { total_pay } => Some(*total_pay),
        }
    }

    /// Returns true once the day has a payroll record.
    pub fn is_finalized(&self) -> bool {
        matches!(self, DayStatus::Finalized { .. })
    }
}

/// A single date in an employee's consolidated history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    /// The calendar date of the row.
    pub date: NaiveDate,
    /// The first session of the day, in creation order.
    pub first: Option<SessionSlot>,
    /// The second session of the day.
    pub second: Option<SessionSlot>,
    /// The third session of the day. Later sessions are counted but not shown.
    pub third: Option<SessionSlot>,
    /// How many sessions were recorded on the date.
    pub session_count: usize,
    /// Payroll status of the date.
    #[serde(flatten)]
    pub status: DayStatus,
}

impl HistoryRow {
    /// The populated slots, in order.
    pub fn slots(&self) -> impl Iterator<Item = &SessionSlot> {
        [&self.first, &self.second, &self.third]
            .into_iter()
            .filter_map(Option::as_ref)
    }
}

/// Totals over an employee's finalized days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsSummary {
    /// The employee the totals belong to.
    pub employee_id: String,
    /// Number of finalized days.
    pub finalized_days: usize,
    /// Sum of normal hours.
    pub normal_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of pay.
    pub total_pay: Decimal,
}

impl EarningsSummary {
    /// An empty summary for `employee_id`.
    pub fn empty(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            finalized_days: 0,
            normal_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            total_pay: Decimal::ZERO,
        }
    }

    /// Folds one payroll record into the totals.
    pub fn add(&mut self, record: &PayrollRecord) {
        self.finalized_days += 1;
        self.normal_hours += record.normal_hours;
        self.overtime_hours += record.overtime_hours;
        self.total_pay += record.total_pay;
    }
}

/// Admin view over every finalized payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollOverview {
    /// All payroll records in store order.
    pub records: Vec<PayrollRecord>,
    /// Per-employee totals, sorted by employee identifier.
    pub employees: Vec<EarningsSummary>,
    /// Sum of pay across every record.
    pub grand_total: Decimal,
}
