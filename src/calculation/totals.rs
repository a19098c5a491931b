//! Derived monthly totals stored on the timesheet.

use crate::models::{DailyEntry, EntryType, MonthlyTimesheet};

use super::overtime::{OvertimeCalculator, OvertimeSummary};

/// Number of days tagged as annual leave.
pub fn annual_leave_taken(entries: &[DailyEntry]) -> u32 {
    entries
        .iter()
        .filter(|e| e.entry_type == EntryType::AnnualLeave)
        .count() as u32
}

/// Recomputes `monthly_overtime` and `annual_leave_taken` from the entries.
///
/// Totals are stored, not derived on read, so this must run after every
/// change to the entries.
pub fn recompute_totals(
    timesheet: &mut MonthlyTimesheet,
    calculator: &OvertimeCalculator,
    is_night_shift: bool,
) -> OvertimeSummary {
    let summary = calculator.compute_overtime(&timesheet.entries, is_night_shift);
    timesheet.monthly_overtime = summary.formatted();
    timesheet.annual_leave_taken = annual_leave_taken(&timesheet.entries);
    summary
}
