//! Work session model.
//!
//! A session is one contiguous in/out interval of work for an employee on a
//! calendar date. It is OPEN while `end_time` is `None` and CLOSED once the
//! matching punch-out has written the end time and duration.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a single work session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for the session.
    pub id: String,
    /// The employee who worked the session.
    pub employee_id: String,
    /// The calendar date the session belongs to.
    pub date: NaiveDate,
    /// The time of day the employee punched in.
    pub start_time: NaiveTime,
    /// The time of day the employee punched out, if they have.
    pub end_time: Option<NaiveTime>,
    /// The worked duration in hours, set when the session closes.
    pub duration_hours: Option<Decimal>,
}

impl Session {
    /// Creates a new OPEN session with a freshly generated identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use paytrack_engine::models::Session;
    /// use chrono::{NaiveDate, NaiveTime};
    ///
    /// let session = Session::open(
    ///     "u001",
    ///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    /// );
    /// assert!(session.is_open());
    /// assert!(session.duration_hours.is_none());
    /// ```
    pub fn open(employee_id: &str, date: NaiveDate, start_time: NaiveTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            employee_id: employee_id.to_string(),
            date,
            start_time,
            end_time: None,
            duration_hours: None,
        }
    }

    /// Returns true while the session has no end time.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}
