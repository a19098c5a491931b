//! Configuration types for the timesheet engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{Employee, EntryType};

fn default_standard_baseline() -> Decimal {
    Decimal::from(8)
}

fn default_night_shift_baseline() -> Decimal {
    Decimal::from(12)
}

fn default_holiday_baseline() -> Decimal {
    Decimal::from(8)
}

fn default_regular_overtime_days() -> Vec<Weekday> {
    vec![
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ]
}

fn default_entry_types() -> Vec<EntryType> {
    EntryType::ALL.to_vec()
}

/// Overtime thresholds.
///
/// `weekend_baseline_hours` has no default: a settings file without it
/// deserializes, but building an
/// [`OvertimeCalculator`](crate::calculation::OvertimeCalculator) fails.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeSettings {
    /// Daily threshold for standard roles.
    #[serde(default = "default_standard_baseline")]
    pub standard_baseline_hours: Decimal,
    /// Daily threshold for night-shift roles.
    #[serde(default = "default_night_shift_baseline")]
    pub night_shift_baseline_hours: Decimal,
    /// Threshold applied to holiday-tagged entries.
    #[serde(default = "default_holiday_baseline")]
    pub holiday_baseline_hours: Decimal,
    /// Threshold applied to weekend-tagged entries for standard roles.
    #[serde(default)]
    pub weekend_baseline_hours: Option<Decimal>,
    /// Days on which regular-tagged entries accrue overtime.
    #[serde(default = "default_regular_overtime_days")]
    pub regular_overtime_days: Vec<Weekday>,
}

impl Default for OvertimeSettings {
    fn default() -> Self {
        Self {
            standard_baseline_hours: default_standard_baseline(),
            night_shift_baseline_hours: default_night_shift_baseline(),
            holiday_baseline_hours: default_holiday_baseline(),
            weekend_baseline_hours: None,
            regular_overtime_days: default_regular_overtime_days(),
        }
    }
}

/// Engine settings from `settings.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Whether timesheets may be started or submitted for future months.
    #[serde(default)]
    pub allow_future_months: bool,
    /// Entry categories accepted from edits.
    #[serde(default = "default_entry_types")]
    pub entry_types: Vec<EntryType>,
    /// Overtime thresholds.
    #[serde(default)]
    pub overtime: OvertimeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_future_months: false,
            entry_types: default_entry_types(),
            overtime: OvertimeSettings::default(),
        }
    }
}

/// A public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// Holiday calendar file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// All known holidays.
    pub holidays: Vec<Holiday>,
}

/// Employee directory seed file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// All known employees.
    pub employees: Vec<Employee>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct TimesheetConfig {
    settings: Settings,
    holidays: Vec<Holiday>,
    employees: Vec<Employee>,
}

impl TimesheetConfig {
    /// Creates a new TimesheetConfig from its component parts.
    pub fn new(settings: Settings, holidays: Vec<Holiday>, employees: Vec<Employee>) -> Self {
        let mut sorted = holidays;
        sorted.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            settings,
            holidays: sorted,
            employees,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns all holidays, oldest first.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns the employee directory seed.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
