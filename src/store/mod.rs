//! Record-store contract used by the engine.
//!
//! The engine never talks to a database directly. It reads and writes
//! employees, sessions and payroll records through [`RecordStore`], which
//! any backend can implement. [`InMemoryStore`] is the bundled backend.
//!
//! Every method reports an unreachable backend as
//! [`EngineError::StoreUnavailable`](crate::error::EngineError::StoreUnavailable);
//! an empty result always means "no data", never "could not look".

mod memory;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{Employee, PayrollRecord, Session, normalize_employee_id};

pub use memory::InMemoryStore;

/// Narrows a session or payroll listing to one employee and/or one date.
///
/// # Example
///
/// ```
/// use paytrack_engine::store::RecordFilter;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let filter = RecordFilter::day(" u001 ", date);
/// assert!(filter.matches("u001", date));
/// assert!(!filter.matches("u002", date));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Only records of this employee, compared after trimming.
    pub employee_id: Option<String>,
    /// Only records on this date.
    pub date: Option<NaiveDate>,
}

impl RecordFilter {
    /// Matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches every record of one employee.
    pub fn employee(employee_id: &str) -> Self {
        Self {
            employee_id: Some(normalize_employee_id(employee_id).to_string()),
            date: None,
        }
    }

    /// Matches the records of one employee on one date.
    pub fn day(employee_id: &str, date: NaiveDate) -> Self {
        Self {
            employee_id: Some(normalize_employee_id(employee_id).to_string()),
            date: Some(date),
        }
    }

    /// Returns true if a record with these keys passes the filter.
    pub fn matches(&self, employee_id: &str, date: NaiveDate) -> bool {
        let employee_ok = self.employee_id.as_deref().is_none_or(|wanted| {
            normalize_employee_id(wanted) == normalize_employee_id(employee_id)
        });
        let date_ok = self.date.is_none_or(|wanted| wanted == date);
        employee_ok && date_ok
    }
}

/// Storage operations the engine depends on.
///
/// Listings are returned in append order, which is the creation order the
/// history consolidator relies on.
pub trait RecordStore: Send + Sync {
    /// Lists every employee.
    fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Looks up one employee by identifier.
    fn get_employee(&self, id: &str) -> EngineResult<Option<Employee>>;

    /// Adds an employee. Returns `false` if the identifier is already taken.
    fn append_employee(&self, employee: Employee) -> EngineResult<bool>;

    /// Replaces an employee's rate and overtime multiplier.
    ///
    /// Returns `false` if no such employee exists.
    fn update_employee_rates(
        &self,
        id: &str,
        hourly_rate: Decimal,
        overtime_multiplier: Decimal,
    ) -> EngineResult<bool>;

    /// Lists the sessions matching `filter`.
    fn list_sessions(&self, filter: &RecordFilter) -> EngineResult<Vec<Session>>;

    /// Appends a session and returns it as stored.
    fn append_session(&self, session: Session) -> EngineResult<Session>;

    /// Writes the end time and duration of a session in one step.
    ///
    /// Returns `false` if no session has the given identifier.
    fn update_session(
        &self,
        id: &str,
        end_time: NaiveTime,
        duration_hours: Decimal,
    ) -> EngineResult<bool>;

    /// Lists the payroll records matching `filter`.
    fn list_payroll_records(&self, filter: &RecordFilter) -> EngineResult<Vec<PayrollRecord>>;

    /// Appends a payroll record unless one already exists for the same
    /// employee and date. Returns `false` when the record was refused.
    fn append_payroll_record(&self, record: PayrollRecord) -> EngineResult<bool>;
}
