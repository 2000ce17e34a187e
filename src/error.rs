//! Error types for the PayTrack engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Variants fall into two groups: business-rule outcomes that a user can
//! resolve by acting differently, and infrastructure failures of the record
//! store or configuration that a caller may decide to retry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the PayTrack engine.
///
/// # Example
///
/// ```
/// use paytrack_engine::error::EngineError;
///
/// let error = EngineError::StoreUnavailable {
///     message: "sessions table missing".to_string(),
/// };
/// assert_eq!(error.to_string(), "Record store unavailable: sessions table missing");
/// assert!(error.is_retryable());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Punch-in attempted while a session is already open for the day.
    #[error("Employee '{employee_id}' already has an open session on {date}")]
    AlreadyOpen {
        /// The employee that attempted to punch in.
        employee_id: String,
        /// The calendar date of the open session.
        date: NaiveDate,
        /// The identifier of the session that is still open.
        session_id: String,
    },

    /// Punch-out attempted with no open session for the day.
    #[error("Employee '{employee_id}' has no open session on {date}")]
    NoOpenSession {
        /// The employee that attempted to punch out.
        employee_id: String,
        /// The calendar date that was searched.
        date: NaiveDate,
    },

    /// Finalization attempted for a day with no recorded sessions.
    #[error("Employee '{employee_id}' has no sessions on {date}")]
    NoSessions {
        /// The employee whose day was finalized.
        employee_id: String,
        /// The calendar date that was searched.
        date: NaiveDate,
    },

    /// Finalization attempted while at least one session is still open.
    #[error("Employee '{employee_id}' still has {open_sessions} open session(s) on {date}")]
    OpenSession {
        /// The employee whose day was finalized.
        employee_id: String,
        /// The calendar date being finalized.
        date: NaiveDate,
        /// How many sessions of the day are still open.
        open_sessions: usize,
    },

    /// Finalization attempted twice for the same employee and date.
    #[error("Shift for employee '{employee_id}' on {date} is already finalized")]
    AlreadyFinalized {
        /// The employee whose day was finalized.
        employee_id: String,
        /// The calendar date that already has a payroll record.
        date: NaiveDate,
    },

    /// A pay rate or overtime multiplier is outside its allowed range.
    #[error("Invalid {field} {value}: {message}")]
    InvalidRate {
        /// The name of the offending field.
        field: String,
        /// The rejected value.
        value: Decimal,
        /// The constraint that was violated.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// Registration attempted with an identifier that is already taken.
    #[error("Employee already exists: {employee_id}")]
    EmployeeAlreadyExists {
        /// The identifier that was requested.
        employee_id: String,
    },

    /// The acting employee lacks the role required for the operation.
    #[error("Employee '{actor_id}' is not permitted to {action}")]
    Forbidden {
        /// The acting employee.
        actor_id: String,
        /// The operation that was refused.
        action: String,
    },

    /// The record store could not be read or written.
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file exists but could not be read.
    #[error("Failed to read configuration file '{path}': {message}")]
    ConfigReadError {
        /// The path that could not be read.
        path: String,
        /// The underlying IO error.
        message: String,
    },

    /// Configuration file could not be parsed, or holds invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns true for outcomes caused by the request itself rather than by
    /// the infrastructure. These are resolved by user action, never by retry.
    pub fn is_business_rule(&self) -> bool {
        !matches!(
            self,
            EngineError::StoreUnavailable { .. }
                | EngineError::ConfigNotFound { .. }
                | EngineError::ConfigReadError { .. }
                | EngineError::ConfigParseError { .. }
        )
    }

    /// Returns true when repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::StoreUnavailable { .. })
    }

    /// Shorthand for building a [`EngineError::StoreUnavailable`].
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        EngineError::StoreUnavailable {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_already_open_displays_employee_and_date() {
        let error = EngineError::AlreadyOpen {
            employee_id: "u001".to_string(),
            date: date(),
            session_id: "abc".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Employee 'u001' already has an open session on 2026-03-02"
        );
    }

    #[test]
    fn test_open_session_displays_count() {
        let error = EngineError::OpenSession {
            employee_id: "u001".to_string(),
            date: date(),
            open_sessions: 2,
        };
        assert_eq!(
            error.to_string(),
            "Employee 'u001' still has 2 open session(s) on 2026-03-02"
        );
    }

    #[test]
    fn test_already_finalized_displays_employee_and_date() {
        let error = EngineError::AlreadyFinalized {
            employee_id: "u001".to_string(),
            date: date(),
        };
        assert_eq!(
            error.to_string(),
            "Shift for employee 'u001' on 2026-03-02 is already finalized"
        );
    }

    #[test]
    fn test_invalid_rate_displays_field_and_value() {
        let error = EngineError::InvalidRate {
            field: "overtime_multiplier".to_string(),
            value: Decimal::new(9, 1),
            message: "must be at least 1.0".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid overtime_multiplier 0.9: must be at least 1.0"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "id".to_string(),
            message: "must not be blank".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'id': must not be blank"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_config_read_error_displays_path_and_message() {
        let error = EngineError::ConfigReadError {
            path: "/config/paytrack.yaml".to_string(),
            message: "Permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read configuration file '/config/paytrack.yaml': Permission denied"
        );
        assert!(!error.is_business_rule());
    }

    #[test]
    fn test_business_rule_classification() {
        let business = EngineError::NoOpenSession {
            employee_id: "u001".to_string(),
            date: date(),
        };
        assert!(business.is_business_rule());
        assert!(!business.is_retryable());

        let infra = EngineError::store_unavailable("timeout");
        assert!(!infra.is_business_rule());
        assert!(infra.is_retryable());

        let config = EngineError::ConfigNotFound {
            path: "/x".to_string(),
        };
        assert!(!config.is_business_rule());
        assert!(!config.is_retryable());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_store_error() -> EngineResult<()> {
            Err(EngineError::store_unavailable("down"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_store_error()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::StoreUnavailable { .. })
        ));
    }
}
