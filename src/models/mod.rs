//! Core data models for the timesheet engine.
//!
//! This module contains all the domain models used throughout the engine.

mod daily_entry;
mod employee;
mod timesheet;
mod year_month;

pub use daily_entry::{DailyEntry, EntryType, UnknownEntryType};
pub use employee::{ActingUser, Employee, EmploymentStatus, UserGroup};
pub use timesheet::{MonthlyTimesheet, ReviewAction, TimesheetKey, TimesheetStatus};
pub use year_month::YearMonth;
