//! In-memory collaborator implementations.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::{ConfigLoader, Holiday};
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{Employee, MonthlyTimesheet, TimesheetKey, YearMonth};

use super::{EmployeeDirectory, HolidayCalendar, TimesheetStore};

/// Employee directory backed by a map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    employees: HashMap<String, Employee>,
}

impl InMemoryDirectory {
    /// Creates a directory holding `employees`.
    pub fn new(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            employees: employees
                .into_iter()
                .map(|e| (e.identifier.clone(), e))
                .collect(),
        }
    }

    /// Creates a directory from the loaded configuration's employee seed.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(config.config().employees().iter().cloned())
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn lookup_by_identifier(&self, identifier: &str) -> Option<Employee> {
        self.employees.get(identifier).cloned()
    }

    fn lookup_by_email(&self, email: &str) -> Option<Employee> {
        self.employees
            .values()
            .find(|e| e.email.eq_ignore_ascii_case(email))
            .cloned()
    }
}

/// Holiday calendar backed by a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticHolidayCalendar {
    holidays: BTreeMap<NaiveDate, String>,
}

impl StaticHolidayCalendar {
    /// Creates a calendar from `holidays`.
    pub fn new(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        Self {
            holidays: holidays.into_iter().map(|h| (h.date, h.name)).collect(),
        }
    }

    /// Creates a calendar from the loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(config.config().holidays().iter().cloned())
    }

    /// The name of the holiday on `date`, if any.
    pub fn name_of(&self, date: NaiveDate) -> Option<&str> {
        self.holidays.get(&date).map(String::as_str)
    }
}

impl HolidayCalendar for StaticHolidayCalendar {
    fn holidays_in_month(&self, month: YearMonth) -> BTreeSet<NaiveDate> {
        self.holidays
            .range(month.first_day()..)
            .map(|(d, _)| *d)
            .take_while(|d| month.contains(*d))
            .collect()
    }
}

/// Timesheet store keeping every aggregate in a locked map.
///
/// Each `create` and `commit` runs under the write lock, so a commit is
/// atomic across all of a timesheet's entries, and the version check and
/// the write cannot interleave with another writer.
#[derive(Debug, Default)]
pub struct InMemoryTimesheetStore {
    timesheets: RwLock<HashMap<TimesheetKey, MonthlyTimesheet>>,
}

impl InMemoryTimesheetStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored timesheets.
    pub fn len(&self) -> usize {
        self.timesheets.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.timesheets.read().is_empty()
    }
}

fn conflict(key: &TimesheetKey) -> TimesheetError {
    TimesheetError::ConcurrentModification {
        employee_id: key.employee_id.clone(),
        month: key.month,
    }
}

impl TimesheetStore for InMemoryTimesheetStore {
    fn load(&self, key: &TimesheetKey) -> TimesheetResult<Option<MonthlyTimesheet>> {
        Ok(self.timesheets.read().get(key).cloned())
    }

    fn create(&self, mut timesheet: MonthlyTimesheet) -> TimesheetResult<MonthlyTimesheet> {
        let key = timesheet.key();
        let mut map = self.timesheets.write();
        if map.contains_key(&key) {
            return Err(conflict(&key));
        }
        timesheet.version = 1;
        map.insert(key.clone(), timesheet.clone());
        debug!(key = %key, "Created timesheet");
        Ok(timesheet)
    }

    fn commit(
        &self,
        mut timesheet: MonthlyTimesheet,
        expected_version: u64,
    ) -> TimesheetResult<MonthlyTimesheet> {
        let key = timesheet.key();
        let mut map = self.timesheets.write();
        let stored = map.get_mut(&key).ok_or_else(|| TimesheetError::TimesheetNotFound {
            employee_id: key.employee_id.clone(),
            month: key.month,
        })?;
        if stored.version != expected_version {
            return Err(conflict(&key));
        }
        timesheet.version = expected_version + 1;
        *stored = timesheet.clone();
        debug!(key = %key, version = timesheet.version, "Committed timesheet");
        Ok(timesheet)
    }
}
