//! Configuration types for the PayTrack engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{DEFAULT_DAILY_OVERTIME_THRESHOLD, DEFAULT_ROUNDING_DP};
use crate::models::Employee;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// The socket address to listen on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Payroll policy applied when sessions are timed and days are finalized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollConfig {
    /// Hours per day paid at the normal rate before overtime applies.
    #[serde(default = "default_threshold")]
    pub daily_overtime_threshold_hours: Decimal,
    /// Decimal places kept for durations, hours and pay.
    #[serde(default = "default_rounding_dp")]
    pub rounding_dp: u32,
    /// Hourly rate given to newly registered workers.
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: Decimal,
    /// Overtime multiplier given to newly registered workers.
    #[serde(default = "default_overtime_multiplier")]
    pub default_overtime_multiplier: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            daily_overtime_threshold_hours: default_threshold(),
            rounding_dp: default_rounding_dp(),
            default_hourly_rate: default_hourly_rate(),
            default_overtime_multiplier: default_overtime_multiplier(),
        }
    }
}

fn default_threshold() -> Decimal {
    DEFAULT_DAILY_OVERTIME_THRESHOLD
}

fn default_rounding_dp() -> u32 {
    DEFAULT_ROUNDING_DP
}

fn default_hourly_rate() -> Decimal {
    Decimal::TEN
}

fn default_overtime_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

/// Structure of `paytrack.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Payroll policy.
    #[serde(default)]
    pub payroll: PayrollConfig,
}

/// Structure of `employees.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterFile {
    /// Employees inserted into the store at startup.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    server: ServerConfig,
    payroll: PayrollConfig,
    employees: Vec<Employee>,
}

impl AppConfig {
    /// Creates a new AppConfig from its component parts.
    pub fn new(server: ServerConfig, payroll: PayrollConfig, employees: Vec<Employee>) -> Self {
        Self {
            server,
            payroll,
            employees,
        }
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Returns the payroll policy.
    pub fn payroll(&self) -> &PayrollConfig {
        &self.payroll
    }

    /// Returns the seed roster.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
