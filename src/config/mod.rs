//! Configuration loading and management for the timesheet engine.
//!
//! This module loads engine settings, the holiday calendar and the employee
//! directory seed from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/timesheet").unwrap();
//! println!("Standard baseline: {}", config.settings().overtime.standard_baseline_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EmployeesConfig, Holiday, HolidaysConfig, OvertimeSettings, Settings, TimesheetConfig,
};
