//! Employee model and related types.
//!
//! This module defines the Employee struct and Role enum for representing
//! people who clock in and get paid by the hour.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The role an employee holds within the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A regular hourly worker who punches in and out.
    #[default]
    Worker,
    /// An administrator who may edit rates and view all payroll.
    Admin,
}

/// Represents an employee who records work sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The display name of the employee.
    pub name: String,
    /// The authentication secret. Accepted on input, never written back out.
    #[serde(default, skip_serializing)]
    pub secret: String,
    /// The role the employee holds.
    #[serde(default)]
    pub role: Role,
    /// The hourly pay rate.
    pub hourly_rate: Decimal,
    /// The multiplier applied to the hourly rate for overtime hours.
    pub overtime_multiplier: Decimal,
}

impl Employee {
    /// Returns true if the employee holds the admin role.
    ///
    /// # Examples
    ///
    /// ```
    /// use paytrack_engine::models::{Employee, Role};
    /// use rust_decimal::Decimal;
    ///
    /// let admin = Employee {
    ///     id: "admin".to_string(),
    ///     name: "Site Admin".to_string(),
    ///     secret: String::new(),
    ///     role: Role::Admin,
    ///     hourly_rate: Decimal::ZERO,
    ///     overtime_multiplier: Decimal::ONE,
    /// };
    /// assert!(admin.is_admin());
    /// ```
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns true if `candidate` refers to this employee.
    ///
    /// Identifiers are compared after trimming surrounding whitespace on
    /// both sides.
    pub fn has_id(&self, candidate: &str) -> bool {
        normalize_employee_id(&self.id) == normalize_employee_id(candidate)
    }
}

/// Canonical form of an employee identifier.
pub fn normalize_employee_id(id: &str) -> &str {
    id.trim()
}
