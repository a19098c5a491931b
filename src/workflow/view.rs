//! The read model handed to presentation.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::calculation::{CalendarCell, WEEKDAY_HEADERS, week_grid};
use crate::models::{DailyEntry, Employee, EntryType, MonthlyTimesheet, TimesheetStatus, YearMonth};

use super::roles::{PermissionFlags, RoleResolution};

/// The employee a view is about.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    /// Employee identifier.
    pub identifier: String,
    /// Full name, or the email when no name is recorded.
    pub name: String,
    /// Job title.
    pub job_title: String,
    /// Supervisor of record.
    pub supervisor_email: Option<String>,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        let name = format!("{} {}", employee.first_name, employee.last_name)
            .trim()
            .to_string();
        Self {
            identifier: employee.identifier.clone(),
            name: if name.is_empty() {
                employee.email.clone()
            } else {
                name
            },
            job_title: employee.job_title.clone(),
            supervisor_email: employee.supervisor_email.clone(),
        }
    }
}

/// A selectable entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntryTypeChoice {
    /// Wire code.
    pub code: &'static str,
    /// Display label.
    pub label: &'static str,
}

impl From<EntryType> for EntryTypeChoice {
    fn from(entry_type: EntryType) -> Self {
        Self {
            code: entry_type.code(),
            label: entry_type.label(),
        }
    }
}

/// One cell of the calendar grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarDay {
    /// A day of the viewed month.
    InMonth {
        /// The date.
        date: NaiveDate,
        /// The stored entry, once the timesheet exists.
        entry: Option<DailyEntry>,
        /// Highlighted as a public holiday.
        is_holiday: bool,
    },
    /// A neighbouring month's day padding the grid. Not actionable.
    Spillover {
        /// The date.
        date: NaiveDate,
    },
}

/// Everything needed to render one employee's month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetView {
    /// Whose timesheet this is.
    pub employee: EmployeeSummary,
    /// Night-shift roles use the longer baseline and get no holiday highlighting.
    pub is_night_shift: bool,
    /// The viewed month.
    pub month: YearMonth,
    /// English month name.
    pub month_name: &'static str,
    /// Navigation target.
    pub previous_month: YearMonth,
    /// Navigation target.
    pub next_month: YearMonth,
    /// `None` until the timesheet is started.
    pub status: Option<TimesheetStatus>,
    /// How the viewer relates to the employee.
    pub role: RoleResolution,
    /// What the viewer may do.
    pub permissions: PermissionFlags,
    /// The month is not in the future, or future months are allowed.
    pub can_create_for_month: bool,
    /// Remaining leave from the employee record.
    pub leave_balance: Option<Decimal>,
    /// The stored timesheet, including overtime, leave taken and comment.
    pub timesheet: Option<MonthlyTimesheet>,
    /// Column headers, Monday first.
    pub weekday_headers: [&'static str; 7],
    /// Calendar rows of seven days.
    pub rows: Vec<Vec<CalendarDay>>,
    /// Highlighted holidays in the month.
    pub holidays: Vec<NaiveDate>,
    /// Entry types offered for editing.
    pub entry_types: Vec<EntryTypeChoice>,
    /// Message to show above the calendar, e.g. after a redirect.
    pub notice: Option<String>,
}

/// Inputs for [`TimesheetView::build`].
pub struct ViewParts<'a> {
    /// The employee being viewed.
    pub employee: &'a Employee,
    /// The viewer's role.
    pub role: RoleResolution,
    /// The month being viewed.
    pub month: YearMonth,
    /// The stored timesheet, if started.
    pub timesheet: Option<MonthlyTimesheet>,
    /// Whether the month is open for creation.
    pub can_create_for_month: bool,
    /// Holidays in the month.
    pub holidays: BTreeSet<NaiveDate>,
    /// Entry types accepted from edits.
    pub entry_types: &'a [EntryType],
}

impl TimesheetView {
    /// Assembles the view.
    pub fn build(parts: ViewParts<'_>) -> Self {
        let ViewParts {
            employee,
            role,
            month,
            timesheet,
            can_create_for_month,
            holidays,
            entry_types,
        } = parts;

        let is_night_shift = employee.is_night_shift();
        let holidays = if is_night_shift {
            BTreeSet::new()
        } else {
            holidays
        };
        let status = timesheet.as_ref().map(|t| t.status);

        let rows = week_grid(month)
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match *cell {
                        CalendarCell::InMonth(date) => CalendarDay::InMonth {
                            date,
                            entry: timesheet.as_ref().and_then(|t| t.entry(date)).cloned(),
                            is_holiday: holidays.contains(&date),
                        },
                        CalendarCell::Spillover(date) => CalendarDay::Spillover { date },
                    })
                    .collect()
            })
            .collect();

        Self {
            employee: EmployeeSummary::from(employee),
            is_night_shift,
            month,
            month_name: month.month_name(),
            previous_month: month.add_months(-1),
            next_month: month.add_months(1),
            status,
            role,
            permissions: PermissionFlags::derive(&role, status, can_create_for_month),
            can_create_for_month,
            leave_balance: employee.leave_balance,
            timesheet,
            weekday_headers: WEEKDAY_HEADERS,
            rows,
            holidays: holidays.into_iter().collect(),
            entry_types: entry_types.iter().copied().map(EntryTypeChoice::from).collect(),
            notice: None,
        }
    }

    /// Attaches a notice.
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}
