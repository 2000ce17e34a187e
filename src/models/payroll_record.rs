//! Finalized payroll record model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The immutable outcome of finalizing one employee's day.
///
/// Exactly one record exists per (employee, date).
///
/// # Example
///
/// ```
/// use paytrack_engine::models::PayrollRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = PayrollRecord {
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     employee_id: "u001".to_string(),
///     normal_hours: Decimal::from_str("8.00").unwrap(),
///     overtime_hours: Decimal::from_str("1.50").unwrap(),
///     total_pay: Decimal::from_str("102.50").unwrap(),
/// };
/// assert_eq!(record.total_hours(), Decimal::from_str("9.5").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The calendar date that was finalized.
    pub date: NaiveDate,
    /// The employee who worked the day.
    pub employee_id: String,
    /// Hours paid at the ordinary rate.
    pub normal_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// The total pay for the day.
    pub total_pay: Decimal,
}

impl PayrollRecord {
    /// Normal plus overtime hours.
    pub fn total_hours(&self) -> Decimal {
        self.normal_hours + self.overtime_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_payroll_record_deserialization() {
        let json = r#"{
            "date": "2026-03-02",
            "employee_id": "u001",
            "normal_hours": "8.00",
            "overtime_hours": "0.00",
            "total_pay": "80.00"
        }"#;

        let record: PayrollRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.employee_id, "u001");
        assert_eq!(record.total_pay, Decimal::from_str("80").unwrap());
        assert_eq!(record.total_hours(), Decimal::from_str("8").unwrap());
    }

    #[test]
    fn test_decimals_serialize_as_strings() {
        let record = PayrollRecord {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            employee_id: "u001".to_string(),
            normal_hours: Decimal::from_str("8.00").unwrap(),
            overtime_hours: Decimal::from_str("1.50").unwrap(),
            total_pay: Decimal::from_str("102.50").unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"total_pay\":\"102.50\""));
    }
}
