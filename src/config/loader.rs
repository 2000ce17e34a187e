//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::info;

use crate::calculation::validate_rates;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::types::{AppConfig, PayrollConfig, RosterFile, ServerConfig, SettingsFile};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── paytrack.yaml   # Server settings and payroll policy
/// └── employees.yaml  # Seed roster
/// ```
///
/// # Example
///
/// ```no_run
/// use paytrack_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Overtime after {} hours", loader.payroll().daily_overtime_threshold_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, unreadable, contains
    /// invalid YAML, or holds a threshold or rate the engine would refuse.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("paytrack.yaml");
        let roster_path = path.join("employees.yaml");
        let settings = Self::load_yaml::<SettingsFile>(&settings_path)?;
        let roster = Self::load_yaml::<RosterFile>(&roster_path)?;

        Self::validate_payroll(&settings.payroll, &settings_path)?;
        Self::validate_roster(&roster, &roster_path)?;

        info!(
            config_dir = %path.display(),
            employees = roster.employees.len(),
            "Loaded configuration"
        );

        Ok(Self {
            config: AppConfig::new(settings.server, settings.payroll, roster.employees),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EngineError::ConfigNotFound {
                path: path_str.clone(),
            },
            _ => EngineError::ConfigReadError {
                path: path_str.clone(),
                message: e.to_string(),
            },
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects a payroll policy that would produce negative hours or rates
    /// below what the finalizer accepts.
    fn validate_payroll(payroll: &PayrollConfig, path: &Path) -> EngineResult<()> {
        if payroll.daily_overtime_threshold_hours <= Decimal::ZERO {
            return Err(invalid_value(
                path,
                format!(
                    "daily_overtime_threshold_hours must be positive, got {}",
                    payroll.daily_overtime_threshold_hours
                ),
            ));
        }
        validate_rates(
            payroll.default_hourly_rate,
            payroll.default_overtime_multiplier,
        )
        .map_err(|e| invalid_value(path, format!("payroll defaults: {}", e)))
    }

    fn validate_roster(roster: &RosterFile, path: &Path) -> EngineResult<()> {
        for employee in &roster.employees {
            validate_rates(employee.hourly_rate, employee.overtime_multiplier)
                .map_err(|e| invalid_value(path, format!("employee '{}': {}", employee.id, e)))?;
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        self.config.server()
    }

    /// Returns the payroll policy.
    pub fn payroll(&self) -> &PayrollConfig {
        self.config.payroll()
    }

    /// Returns the seed roster.
    pub fn employees(&self) -> &[Employee] {
        self.config.employees()
    }
}

fn invalid_value(path: &Path, message: String) -> EngineError {
    EngineError::ConfigParseError {
        path: path.display().to_string(),
        message,
    }
}
