//! Calendar construction and placeholder materialization.
//!
//! This module builds the list of days in a month, the Monday-first week
//! grid used for calendar display, and the zero-duration placeholder entries
//! every timesheet carries for each day of its month.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{DailyEntry, MonthlyTimesheet, YearMonth};

/// Weekday column headers of the week grid, Monday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Returns every calendar day of `month`, ascending.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::month_day_list;
/// use timesheet_engine::models::YearMonth;
///
/// let days = month_day_list(YearMonth::new(2024, 2).unwrap());
/// assert_eq!(days.len(), 29);
/// assert_eq!(days[0].to_string(), "2024-02-01");
/// ```
pub fn month_day_list(month: YearMonth) -> Vec<NaiveDate> {
    month
        .first_day()
        .iter_days()
        .take(month.days_in_month() as usize)
        .collect()
}

/// Number of grid cells before the 1st that belong to the previous month.
fn leading_spillover(month: YearMonth) -> u32 {
    month.first_day().weekday().num_days_from_monday()
}

/// Returns the week-grid row `date` falls on.
///
/// Rows are Monday-first and the first row holds the 1st of the month.
pub fn row_index(date: NaiveDate) -> u32 {
    let month = YearMonth::from_date(date);
    (leading_spillover(month) + date.day() - 1) / 7
}

/// Creates a zero-duration placeholder for every day of the timesheet's
/// month that has no entry yet.
///
/// Returns the number of placeholders created. Calling it again on a
/// complete timesheet creates nothing.
pub fn ensure_placeholders(timesheet: &mut MonthlyTimesheet) -> usize {
    let existing: BTreeSet<NaiveDate> = timesheet.entries.iter().map(|e| e.date).collect();

    let mut created = 0;
    for date in month_day_list(timesheet.month) {
        if !existing.contains(&date) {
            timesheet.insert_entry(DailyEntry::placeholder(date, row_index(date)));
            created += 1;
        }
    }
    created
}

/// A single cell of the week grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum CalendarCell {
    /// A day of the displayed month; may carry an entry.
    InMonth(NaiveDate),
    /// A day of an adjacent month shown to fill the row. Not actionable.
    Spillover(NaiveDate),
}

impl CalendarCell {
    /// The date the cell stands for.
    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarCell::InMonth(d) | CalendarCell::Spillover(d) => *d,
        }
    }

    /// Returns true if the cell accepts entries.
    pub fn is_actionable(&self) -> bool {
        matches!(self, CalendarCell::InMonth(_))
    }
}

/// One Monday-to-Sunday row of the grid.
pub type WeekRow = [CalendarCell; 7];

/// Partitions `month` into Monday-first rows of seven cells, padding the
/// first and last rows with spillover days from the adjacent months.
pub fn week_grid(month: YearMonth) -> Vec<WeekRow> {
    let leading = leading_spillover(month);
    let Some(start) = month
        .first_day()
        .checked_sub_days(Days::new(u64::from(leading)))
    else {
        return Vec::new();
    };
    let cells = (leading + month.days_in_month()).div_ceil(7) * 7;

    let days: Vec<CalendarCell> = start
        .iter_days()
        .take(cells as usize)
        .map(|date| {
            if month.contains(date) {
                CalendarCell::InMonth(date)
            } else {
                CalendarCell::Spillover(date)
            }
        })
        .collect();
    days.chunks_exact(7)
        .filter_map(|chunk| WeekRow::try_from(chunk).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, EmploymentStatus, EntryType};
    use chrono::{Duration, Weekday};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn draft(month: YearMonth) -> MonthlyTimesheet {
        let employee = Employee {
            identifier: "E1".to_string(),
            email: "e1@example.org".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            job_title: "Clerk".to_string(),
            supervisor_email: None,
            status: EmploymentStatus::Active,
            leave_balance: None,
        };
        MonthlyTimesheet::new_draft(&employee, month)
    }

    #[test]
    fn test_month_day_list_march_2024() {
        let days = month_day_list(ym(2024, 3));
        assert_eq!(days.len(), 31);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(days[30], NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_month_day_list_february_leap_and_common() {
        assert_eq!(month_day_list(ym(2024, 2)).len(), 29);
        assert_eq!(month_day_list(ym(2023, 2)).len(), 28);
        assert_eq!(month_day_list(ym(1900, 2)).len(), 28);
        assert_eq!(month_day_list(ym(2000, 2)).len(), 29);
    }

    #[test]
    fn test_ensure_placeholders_creates_every_day() {
        let mut sheet = draft(ym(2024, 3));
        let created = ensure_placeholders(&mut sheet);

        assert_eq!(created, 31);
        assert_eq!(sheet.entries.len(), 31);
        assert!(sheet.entries.iter().all(|e| e.duration == Decimal::ZERO));
        assert!(sheet
            .entries
            .iter()
            .all(|e| e.entry_type == EntryType::Regular));
    }

    #[test]
    fn test_ensure_placeholders_is_idempotent() {
        let mut sheet = draft(ym(2024, 3));
        ensure_placeholders(&mut sheet);
        let first = sheet.entries.clone();

        let created = ensure_placeholders(&mut sheet);

        assert_eq!(created, 0);
        assert_eq!(sheet.entries, first);
    }

    #[test]
    fn test_ensure_placeholders_keeps_existing_entries() {
        let mut sheet = draft(ym(2024, 3));
        let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        sheet.insert_entry(DailyEntry {
            date,
            duration: Decimal::from(9),
            entry_type: EntryType::Weekend,
            row: row_index(date),
        });

        let created = ensure_placeholders(&mut sheet);

        assert_eq!(created, 30);
        let kept = sheet.entry(date).unwrap();
        assert_eq!(kept.duration, Decimal::from(9));
        assert_eq!(kept.entry_type, EntryType::Weekend);
    }

    #[test]
    fn test_row_index_follows_monday_first_grid() {
        // 2024-03-01 is a Friday: four leading spillover days.
        assert_eq!(row_index(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()), 0);
        assert_eq!(row_index(NaiveDate::from_ymd_opt(2024, 3, 3).unwrap()), 0);
        assert_eq!(row_index(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()), 1);
        assert_eq!(row_index(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()), 4);
    }

    #[test]
    fn test_week_grid_march_2024() {
        let grid = week_grid(ym(2024, 3));

        assert_eq!(grid.len(), 5);
        assert_eq!(
            grid[0][0],
            CalendarCell::Spillover(NaiveDate::from_ymd_opt(2024, 2, 26).unwrap())
        );
        assert_eq!(
            grid[0][4],
            CalendarCell::InMonth(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(
            grid[4][6],
            CalendarCell::InMonth(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
        );
        assert!(!grid[0][0].is_actionable());
        assert!(grid[0][4].is_actionable());
    }

    #[test]
    fn test_week_grid_trailing_spillover() {
        // April 2024 starts on Monday and ends on Tuesday.
        let grid = week_grid(ym(2024, 4));
        assert_eq!(grid.len(), 5);
        assert_eq!(
            grid[4][2],
            CalendarCell::Spillover(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
    }

    #[test]
    fn test_week_grid_february_2021_fits_four_rows() {
        // 2021-02-01 is a Monday and February 2021 has 28 days.
        let grid = week_grid(ym(2021, 2));
        assert_eq!(grid.len(), 4);
        assert!(grid.iter().flatten().all(|c| c.is_actionable()));
    }

    #[test]
    fn test_week_grid_at_supported_range_ends() {
        // 0001-01-01 is a Monday, so the grid starts without spillover.
        let first = week_grid(ym(1, 1));
        assert_eq!(first.len(), 5);
        assert_eq!(
            first[0][0],
            CalendarCell::InMonth(NaiveDate::from_ymd_opt(1, 1, 1).unwrap())
        );

        // 9999-12-31 is a Friday and the last row runs into year 10000.
        let last = week_grid(ym(9999, 12));
        assert_eq!(last.len(), 5);
        assert_eq!(
            last[4][4],
            CalendarCell::InMonth(NaiveDate::from_ymd_opt(9999, 12, 31).unwrap())
        );
        assert_eq!(
            last[4][6],
            CalendarCell::Spillover(NaiveDate::from_ymd_opt(10000, 1, 2).unwrap())
        );
        assert_eq!(month_day_list(ym(9999, 12)).len(), 31);
    }

    #[test]
    fn test_weekday_headers_start_monday() {
        assert_eq!(WEEKDAY_HEADERS[0], Weekday::Mon.to_string());
        assert_eq!(WEEKDAY_HEADERS[6], Weekday::Sun.to_string());
    }

    proptest! {
        #[test]
        fn prop_month_day_list_is_contiguous(year in 1900i32..2200, month in 1u32..=12) {
            let m = ym(year, month);
            let days = month_day_list(m);

            prop_assert!((28..=31).contains(&days.len()));
            prop_assert_eq!(days.len() as u32, m.days_in_month());
            prop_assert_eq!(days[0].day(), 1);
            for pair in days.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], Duration::days(1));
            }
            prop_assert!(days.iter().all(|d| m.contains(*d)));
        }

        #[test]
        fn prop_week_grid_covers_month_once(year in 1900i32..2200, month in 1u32..=12) {
            let m = ym(year, month);
            let grid = week_grid(m);

            let in_month: Vec<NaiveDate> = grid
                .iter()
                .flatten()
                .filter(|c| c.is_actionable())
                .map(|c| c.date())
                .collect();
            prop_assert_eq!(in_month, month_day_list(m));
            prop_assert!(grid.iter().all(|row| row[0].date().weekday() == Weekday::Mon));
            for (i, row) in grid.iter().enumerate() {
                for cell in row.iter().filter(|c| c.is_actionable()) {
                    prop_assert_eq!(row_index(cell.date()), i as u32);
                }
            }
        }
    }
}
