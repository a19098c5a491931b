//! Calendar month value type.
//!
//! A [`YearMonth`] identifies the month a timesheet covers. The day of month
//! is never significant, so timesheets are keyed by this type rather than by
//! a full date.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TimesheetError, TimesheetResult};

/// Earliest year a [`YearMonth`] can be built for.
pub const MIN_YEAR: i32 = 1;
/// Latest year a [`YearMonth`] can be built for.
pub const MAX_YEAR: i32 = 9999;

/// A calendar month (year + month, 1-based).
///
/// Serialized as `"YYYY-MM"`. Years are limited to
/// [`MIN_YEAR`]..=[`MAX_YEAR`], so the surrounding weeks of any month are
/// always representable.
///
/// # Example
///
/// ```
/// use timesheet_engine::models::YearMonth;
///
/// let march = YearMonth::new(2024, 3).unwrap();
/// assert_eq!(march.to_string(), "2024-03");
/// assert_eq!(march.add_months(-3).to_string(), "2023-12");
/// assert!(YearMonth::new(-262143, 1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    /// Creates a new month, rejecting months outside 1..=12 and years outside
    /// [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, month: u32) -> TimesheetResult<Self> {
        (MIN_YEAR..=MAX_YEAR)
            .contains(&year)
            .then(|| NaiveDate::from_ymd_opt(year, month, 1))
            .flatten()
            .map(|first| Self { first })
            .ok_or_else(|| {
                TimesheetError::validation(
                    None,
                    "month",
                    format!("{}-{} is not a valid calendar month", year, month),
                )
            })
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            first: date - Days::new(u64::from(date.day0())),
        }
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// The month number, 1-based.
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// The number of days in the month (28-31).
    pub fn days_in_month(&self) -> u32 {
        match self.month() {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year()) => 29,
            2 => 28,
            _ => 31,
        }
    }

    /// Returns true if `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Shifts the month by `delta` months, carrying into the year.
    ///
    /// Saturates at January [`MIN_YEAR`] and December [`MAX_YEAR`].
    pub fn add_months(&self, delta: i32) -> Self {
        let current = month_index(self.year(), self.month());
        let target = current
            .saturating_add(delta)
            .clamp(month_index(MIN_YEAR, 1), month_index(MAX_YEAR, 12));
        let steps = target - current;
        let shifted = if steps >= 0 {
            self.first.checked_add_months(Months::new(steps.unsigned_abs()))
        } else {
            self.first.checked_sub_months(Months::new(steps.unsigned_abs()))
        };
        shifted.map_or(*self, |first| Self { first })
    }

    /// Returns true if this month is strictly after `other`.
    pub fn is_after(&self, other: YearMonth) -> bool {
        *self > other
    }

    /// English month name, e.g. "March".
    pub fn month_name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        NAMES[self.first.month0() as usize]
    }
}

fn month_index(year: i32, month: u32) -> i32 {
    year * 12 + month as i32 - 1
}

fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = TimesheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            TimesheetError::validation(None, "month", format!("'{}' is not in YYYY-MM format", s))
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_rejects_month_zero_and_thirteen() {
        assert!(YearMonth::new(2024, 0).is_err());
        assert!(YearMonth::new(2024, 13).is_err());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(ym(2024, 2).days_in_month(), 29);
        assert_eq!(ym(2023, 2).days_in_month(), 28);
        assert_eq!(ym(2024, 3).days_in_month(), 31);
        assert_eq!(ym(2024, 4).days_in_month(), 30);
        assert_eq!(ym(2024, 12).days_in_month(), 31);
    }

    #[test]
    fn test_rejects_years_outside_supported_range() {
        assert!(YearMonth::new(-262143, 1).is_err());
        assert!(YearMonth::new(262143, 12).is_err());
        assert!(YearMonth::new(0, 12).is_err());
        assert!(YearMonth::new(10000, 1).is_err());
        assert!("-262143-01".parse::<YearMonth>().is_err());
        assert_eq!(ym(1, 1).to_string(), "0001-01");
        assert_eq!(ym(9999, 12).to_string(), "9999-12");
    }

    #[test]
    fn test_extreme_months_have_full_lengths() {
        assert_eq!(ym(1, 1).days_in_month(), 31);
        assert_eq!(ym(9999, 12).days_in_month(), 31);
        assert_eq!(ym(2000, 2).days_in_month(), 29);
        assert_eq!(ym(1900, 2).days_in_month(), 28);
    }

    #[test]
    fn test_add_months_saturates_at_range_ends() {
        assert_eq!(ym(9999, 12).add_months(1), ym(9999, 12));
        assert_eq!(ym(1, 1).add_months(-1), ym(1, 1));
        assert_eq!(ym(9999, 11).add_months(i32::MAX), ym(9999, 12));
        assert_eq!(ym(2, 3).add_months(-15), ym(1, 1));
    }

    #[test]
    fn test_from_date_keeps_month() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(YearMonth::from_date(date), ym(2024, 2));
        assert_eq!(YearMonth::from_date(date).first_day().day(), 1);
    }

    #[test]
    fn test_add_months_carries_year() {
        assert_eq!(ym(2024, 12).add_months(1), ym(2025, 1));
        assert_eq!(ym(2024, 1).add_months(-1), ym(2023, 12));
        assert_eq!(ym(2024, 3).add_months(-15), ym(2022, 12));
        assert_eq!(ym(2024, 3).add_months(0), ym(2024, 3));
    }

    #[test]
    fn test_is_after() {
        assert!(ym(2024, 4).is_after(ym(2024, 3)));
        assert!(ym(2025, 1).is_after(ym(2024, 12)));
        assert!(!ym(2024, 3).is_after(ym(2024, 3)));
        assert!(!ym(2023, 12).is_after(ym(2024, 1)));
    }

    #[test]
    fn test_contains() {
        let march = ym(2024, 3);
        assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()));
    }

    #[test]
    fn test_parse_and_display() {
        let parsed: YearMonth = "2024-03".parse().unwrap();
        assert_eq!(parsed, ym(2024, 3));
        assert_eq!(parsed.to_string(), "2024-03");
        assert!("2024/03".parse::<YearMonth>().is_err());
        assert!("2024-13".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&ym(2024, 3)).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym(2024, 3));
    }

    #[test]
    fn test_month_name() {
        assert_eq!(ym(2024, 3).month_name(), "March");
        assert_eq!(ym(2024, 12).month_name(), "December");
    }
}
