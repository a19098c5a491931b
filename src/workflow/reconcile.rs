//! Daily entry reconciliation.
//!
//! Edits arrive as raw strings from a form or JSON body. The whole batch is
//! validated before anything is written: one bad row rejects every row.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::row_index;
use crate::error::{FieldError, TimesheetError, TimesheetResult};
use crate::models::{DailyEntry, EntryType, MonthlyTimesheet};

/// A submitted change to one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryEdit {
    /// The day being edited.
    pub date: NaiveDate,
    /// Raw hours. Blank or absent leaves the day untouched.
    #[serde(default)]
    pub duration: Option<String>,
    /// Raw entry type code (`RH`, `WE`, ...). Absent keeps the current type.
    #[serde(default)]
    pub entry_type: Option<String>,
}

impl EntryEdit {
    /// Creates an edit setting both duration and type.
    pub fn new(date: NaiveDate, duration: impl Into<String>, entry_type: impl Into<String>) -> Self {
        Self {
            date,
            duration: Some(duration.into()),
            entry_type: Some(entry_type.into()),
        }
    }
}

/// Dates touched by a reconcile, by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    /// Rows written because something changed.
    pub updated: Vec<NaiveDate>,
    /// Rows whose submitted values equal what is stored.
    pub unchanged: Vec<NaiveDate>,
    /// Rows ignored because no duration was given.
    pub skipped: Vec<NaiveDate>,
}

impl ReconcileOutcome {
    /// Returns true if any row was written.
    pub fn has_changes(&self) -> bool {
        !self.updated.is_empty()
    }
}

/// A validated edit ready to apply.
struct ParsedEdit {
    date: NaiveDate,
    change: Option<(Decimal, Option<EntryType>)>,
}

fn parse_duration(date: NaiveDate, raw: &str) -> Result<Decimal, FieldError> {
    let error = |message: &str| FieldError {
        date: Some(date),
        field: "duration".to_string(),
        message: message.to_string(),
    };
    match raw.parse::<i64>() {
        Ok(hours) if hours < 0 => Err(error("must not be negative")),
        Ok(hours) => Ok(Decimal::from(hours)),
        Err(_) => Err(error("must be a whole number of hours")),
    }
}

fn parse_entry_type(
    date: NaiveDate,
    raw: &str,
    allowed: &[EntryType],
) -> Result<EntryType, FieldError> {
    let error = |message: String| FieldError {
        date: Some(date),
        field: "entry_type".to_string(),
        message,
    };
    let entry_type: EntryType = raw.parse().map_err(|e| error(format!("{e}")))?;
    if !allowed.contains(&entry_type) {
        return Err(error(format!("'{}' is not an accepted entry type", entry_type.code())));
    }
    Ok(entry_type)
}

/// Applies `edits` to `timesheet`.
///
/// Every row is validated first: the date must lie in the timesheet's month
/// and appear once in the batch, the duration must be a non-negative whole
/// number, and the entry type must be a known code in `allowed`. Any failure
/// returns [`TimesheetError::Validation`] listing all problems and leaves the
/// timesheet untouched.
///
/// Rows with a blank duration are skipped. Rows equal to what is stored are
/// not written. A missing row for an in-month date is created.
pub fn reconcile(
    timesheet: &mut MonthlyTimesheet,
    edits: &[EntryEdit],
    allowed: &[EntryType],
) -> TimesheetResult<ReconcileOutcome> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let mut parsed = Vec::with_capacity(edits.len());

    for edit in edits {
        let date = edit.date;
        if !timesheet.month.contains(date) {
            errors.push(FieldError {
                date: Some(date),
                field: "date".to_string(),
                message: format!("is outside {}", timesheet.month),
            });
            continue;
        }
        if !seen.insert(date) {
            errors.push(FieldError {
                date: Some(date),
                field: "date".to_string(),
                message: "appears more than once".to_string(),
            });
            continue;
        }

        let entry_type = match edit.entry_type.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match parse_entry_type(date, raw, allowed) {
                Ok(t) => Some(t),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            _ => None,
        };

        let change = match edit.duration.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match parse_duration(date, raw) {
                Ok(duration) => Some((duration, entry_type)),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
            _ => None,
        };

        parsed.push(ParsedEdit { date, change });
    }

    if !errors.is_empty() {
        return Err(TimesheetError::Validation { errors });
    }

    let mut outcome = ReconcileOutcome::default();
    for edit in parsed {
        let Some((duration, entry_type)) = edit.change else {
            outcome.skipped.push(edit.date);
            continue;
        };

        match timesheet.entry_mut(edit.date) {
            Some(entry) => {
                let new_type = entry_type.unwrap_or(entry.entry_type);
                if entry.duration == duration && entry.entry_type == new_type {
                    outcome.unchanged.push(edit.date);
                } else {
                    entry.duration = duration;
                    entry.entry_type = new_type;
                    outcome.updated.push(edit.date);
                }
            }
            None => {
                let mut entry = DailyEntry::placeholder(edit.date, row_index(edit.date));
                entry.duration = duration;
                entry.entry_type = entry_type.unwrap_or_default();
                timesheet.insert_entry(entry);
                outcome.updated.push(edit.date);
            }
        }
    }

    debug!(
        key = %timesheet.key(),
        updated = outcome.updated.len(),
        unchanged = outcome.unchanged.len(),
        skipped = outcome.skipped.len(),
        "Reconciled daily entries"
    );

    Ok(outcome)
}
