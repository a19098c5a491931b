//! Collaborator interfaces consumed by the timesheet engine.
//!
//! The engine never resolves records by name at runtime; it depends on the
//! typed traits below. In-memory implementations live in [`memory`].

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::TimesheetResult;
use crate::models::{Employee, MonthlyTimesheet, TimesheetKey, YearMonth};

pub mod memory;

pub use memory::{InMemoryDirectory, InMemoryTimesheetStore, StaticHolidayCalendar};

/// Read-only employee lookups.
pub trait EmployeeDirectory: Send + Sync {
    /// Finds an employee by identifier.
    fn lookup_by_identifier(&self, identifier: &str) -> Option<Employee>;

    /// Finds an employee by email, case-insensitively.
    fn lookup_by_email(&self, email: &str) -> Option<Employee>;
}

/// Read-only public holiday lookups, used for display only.
pub trait HolidayCalendar: Send + Sync {
    /// Holidays falling in `month`.
    fn holidays_in_month(&self, month: YearMonth) -> BTreeSet<NaiveDate>;
}

/// Durable storage of timesheet aggregates.
///
/// A timesheet and all of its daily entries are written as one unit.
/// Writers pass the version they loaded; a store must refuse the write with
/// [`TimesheetError::ConcurrentModification`](crate::error::TimesheetError::ConcurrentModification)
/// when the stored version has moved on.
pub trait TimesheetStore: Send + Sync {
    /// Loads the timesheet for `key`.
    fn load(&self, key: &TimesheetKey) -> TimesheetResult<Option<MonthlyTimesheet>>;

    /// Persists a new timesheet. Fails if one already exists for its key.
    ///
    /// Returns the stored timesheet with its initial version.
    fn create(&self, timesheet: MonthlyTimesheet) -> TimesheetResult<MonthlyTimesheet>;

    /// Replaces the stored timesheet if its version still equals
    /// `expected_version`.
    ///
    /// Returns the stored timesheet with its bumped version.
    fn commit(
        &self,
        timesheet: MonthlyTimesheet,
        expected_version: u64,
    ) -> TimesheetResult<MonthlyTimesheet>;
}
