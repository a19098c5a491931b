//! Monthly timesheet aggregate and its review status.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{DailyEntry, Employee, YearMonth};

/// Review status of a monthly timesheet.
///
/// A timesheet that has never been started has no status at all; the
/// absence of a record is the unstarted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimesheetStatus {
    /// Being filled in by the owner.
    Draft,
    /// Handed to the supervisor for review.
    Submitted,
    /// Sent back to the owner for changes.
    Rejected,
    /// Approved by the supervisor of record.
    Approved,
    /// Verified by HR. Final unless HR retracts.
    Verified,
}

impl TimesheetStatus {
    /// Returns true if the owner may edit daily entries in this status.
    pub fn is_editable(&self) -> bool {
        matches!(self, TimesheetStatus::Draft | TimesheetStatus::Rejected)
    }

    /// Returns true for the terminal status.
    pub fn is_final(&self) -> bool {
        matches!(self, TimesheetStatus::Verified)
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TimesheetStatus::Draft => "Draft",
            TimesheetStatus::Submitted => "Submitted",
            TimesheetStatus::Rejected => "Rejected",
            TimesheetStatus::Approved => "Approved",
            TimesheetStatus::Verified => "Verified",
        }
    }
}

impl fmt::Display for TimesheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimesheetStatus::Draft => "draft",
            TimesheetStatus::Submitted => "submitted",
            TimesheetStatus::Rejected => "rejected",
            TimesheetStatus::Approved => "approved",
            TimesheetStatus::Verified => "verified",
        };
        f.write_str(s)
    }
}

/// An action requested against a monthly timesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    /// Create the timesheet in draft.
    Start,
    /// Persist daily-entry edits without changing status.
    Save,
    /// Hand the timesheet to the supervisor.
    Submit,
    /// Supervisor approval.
    Approve,
    /// HR verification.
    Verify,
    /// Send back to the owner.
    Reject,
    /// HR withdraws a verification.
    Retract,
}

impl fmt::Display for ReviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReviewAction::Start => "start",
            ReviewAction::Save => "save",
            ReviewAction::Submit => "submit",
            ReviewAction::Approve => "approve",
            ReviewAction::Verify => "verify",
            ReviewAction::Reject => "reject",
            ReviewAction::Retract => "retract",
        };
        f.write_str(s)
    }
}

/// Storage key of a monthly timesheet: one per employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimesheetKey {
    /// The owning employee's identifier.
    pub employee_id: String,
    /// The covered month.
    pub month: YearMonth,
}

impl TimesheetKey {
    /// Creates a key.
    pub fn new(employee_id: impl Into<String>, month: YearMonth) -> Self {
        Self {
            employee_id: employee_id.into(),
            month,
        }
    }
}

impl fmt::Display for TimesheetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.employee_id, self.month)
    }
}

/// The per-employee, per-month timesheet with its daily entries.
///
/// The timesheet exclusively owns its entries; they are loaded, mutated and
/// committed together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTimesheet {
    /// The owning employee's identifier.
    pub employee_id: String,
    /// The covered month.
    pub month: YearMonth,
    /// Current review status.
    pub status: TimesheetStatus,
    /// Supervisor email captured when the timesheet was started.
    pub supervisor_email: Option<String>,
    /// Comment left with the most recent transition.
    pub comment: String,
    /// When the owner last submitted.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Who approved.
    pub approved_by: Option<String>,
    /// When it was approved.
    pub approved_on: Option<NaiveDate>,
    /// Who verified.
    pub verified_by: Option<String>,
    /// When it was verified.
    pub verified_on: Option<NaiveDate>,
    /// Who rejected.
    pub rejected_by: Option<String>,
    /// When it was rejected.
    pub rejected_on: Option<NaiveDate>,
    /// Days of annual leave logged in the month.
    pub annual_leave_taken: u32,
    /// Overtime hours for the month as a plain numeric string.
    pub monthly_overtime: String,
    /// One entry per calendar day, ordered by date.
    pub entries: Vec<DailyEntry>,
    /// Optimistic concurrency counter, bumped on every commit.
    pub version: u64,
}

impl MonthlyTimesheet {
    /// Creates an empty draft for `employee` and `month`.
    ///
    /// Entries are not materialized here; see
    /// [`ensure_placeholders`](crate::calculation::ensure_placeholders).
    pub fn new_draft(employee: &Employee, month: YearMonth) -> Self {
        Self {
            employee_id: employee.identifier.clone(),
            month,
            status: TimesheetStatus::Draft,
            supervisor_email: employee.supervisor_email.clone(),
            comment: String::new(),
            submitted_at: None,
            approved_by: None,
            approved_on: None,
            verified_by: None,
            verified_on: None,
            rejected_by: None,
            rejected_on: None,
            annual_leave_taken: 0,
            monthly_overtime: "0".to_string(),
            entries: Vec::new(),
            version: 0,
        }
    }

    /// The storage key of this timesheet.
    pub fn key(&self) -> TimesheetKey {
        TimesheetKey::new(self.employee_id.clone(), self.month)
    }

    /// Returns the entry for `date`, if present.
    pub fn entry(&self, date: NaiveDate) -> Option<&DailyEntry> {
        self.entries
            .binary_search_by(|e| e.date.cmp(&date))
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Returns the entry for `date` mutably, if present.
    pub fn entry_mut(&mut self, date: NaiveDate) -> Option<&mut DailyEntry> {
        match self.entries.binary_search_by(|e| e.date.cmp(&date)) {
            Ok(i) => Some(&mut self.entries[i]),
            Err(_) => None,
        }
    }

    /// Inserts `entry` keeping the entries sorted. Returns false if an entry
    /// for that date already exists.
    pub fn insert_entry(&mut self, entry: DailyEntry) -> bool {
        match self.entries.binary_search_by(|e| e.date.cmp(&entry.date)) {
            Ok(_) => false,
            Err(i) => {
                self.entries.insert(i, entry);
                true
            }
        }
    }
}
