//! Calculation logic for the timesheet engine.
//!
//! This module contains the calendar builder (month day lists, week grid,
//! placeholder entries), the overtime calculator, and the derived monthly
//! totals stored on each timesheet.

mod calendar;
mod overtime;
mod totals;

pub use calendar::{
    CalendarCell, WEEKDAY_HEADERS, WeekRow, ensure_placeholders, month_day_list, row_index,
    week_grid,
};
pub use overtime::{OvertimeCalculator, OvertimeContribution, OvertimeRule, OvertimeSummary};
pub use totals::{annual_leave_taken, recompute_totals};
