//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading timesheet
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{EntryType, YearMonth};

use super::types::{EmployeesConfig, Holiday, HolidaysConfig, Settings, TimesheetConfig};

/// Loads and provides access to timesheet configuration.
///
/// # Directory Structure
///
/// ```text
/// config/timesheet/
/// ├── settings.yaml    # Overtime thresholds, entry types, future-month flag
/// ├── holidays.yaml    # Public holidays
/// └── employees.yaml   # Employee directory seed
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/timesheet").unwrap();
/// println!("Future months allowed: {}", loader.settings().allow_future_months);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TimesheetConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or contains invalid YAML, or
    /// if the settings are inconsistent (see [`ConfigLoader::validate`]).
    pub fn load<P: AsRef<Path>>(path: P) -> TimesheetResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<Settings>(&path.join("settings.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?;
        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?;

        Self::validate(&settings)?;

        let config = TimesheetConfig::new(settings, holidays.holidays, employees.employees);
        Ok(Self { config })
    }

    /// Builds a loader from already-parsed parts, validating the settings.
    pub fn from_parts(config: TimesheetConfig) -> TimesheetResult<Self> {
        Self::validate(config.settings())?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> TimesheetResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TimesheetError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| TimesheetError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects settings the engine cannot run with.
    ///
    /// A missing `weekend_baseline_hours` aborts loading here rather than
    /// being treated as zero.
    pub fn validate(settings: &Settings) -> TimesheetResult<()> {
        let overtime = &settings.overtime;

        let weekend = overtime.weekend_baseline_hours.ok_or_else(|| {
            TimesheetError::configuration("overtime.weekend_baseline_hours must be configured")
        })?;

        let baselines = [
            ("standard_baseline_hours", overtime.standard_baseline_hours),
            ("night_shift_baseline_hours", overtime.night_shift_baseline_hours),
            ("holiday_baseline_hours", overtime.holiday_baseline_hours),
            ("weekend_baseline_hours", weekend),
        ];
        for (name, value) in baselines {
            if value.is_sign_negative() {
                return Err(TimesheetError::configuration(format!(
                    "overtime.{} must not be negative (got {})",
                    name, value
                )));
            }
        }

        if settings.entry_types.is_empty() {
            return Err(TimesheetError::configuration(
                "entry_types must list at least one category",
            ));
        }
        if !settings.entry_types.contains(&EntryType::default()) {
            return Err(TimesheetError::configuration(format!(
                "entry_types must include the placeholder category {}",
                EntryType::default()
            )));
        }

        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &TimesheetConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Returns the holidays falling in `month`.
    pub fn holidays_in_month(&self, month: YearMonth) -> Vec<&Holiday> {
        self.config
            .holidays()
            .iter()
            .filter(|h| month.contains(h.date))
            .collect()
    }
}
