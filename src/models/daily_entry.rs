//! Daily entry model and entry categories.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a logged day.
///
/// Each category has a short code that is used on the wire and in
/// configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// Ordinary working day.
    #[default]
    #[serde(rename = "RH")]
    Regular,
    /// Work on a weekend day.
    #[serde(rename = "WE")]
    Weekend,
    /// Work on a public holiday.
    #[serde(rename = "H")]
    Holiday,
    /// Annual leave day.
    #[serde(rename = "AL")]
    AnnualLeave,
    /// Sick leave day.
    #[serde(rename = "SL")]
    SickLeave,
}

impl EntryType {
    /// All categories, in display order.
    pub const ALL: [EntryType; 5] = [
        EntryType::Regular,
        EntryType::Weekend,
        EntryType::Holiday,
        EntryType::AnnualLeave,
        EntryType::SickLeave,
    ];

    /// The short code, e.g. "RH".
    pub fn code(&self) -> &'static str {
        match self {
            EntryType::Regular => "RH",
            EntryType::Weekend => "WE",
            EntryType::Holiday => "H",
            EntryType::AnnualLeave => "AL",
            EntryType::SickLeave => "SL",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            EntryType::Regular => "Regular Hours",
            EntryType::Weekend => "Weekend",
            EntryType::Holiday => "Holiday",
            EntryType::AnnualLeave => "Annual Leave",
            EntryType::SickLeave => "Sick Leave",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown entry type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntryType(pub String);

impl fmt::Display for UnknownEntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entry type '{}'", self.0)
    }
}

impl std::error::Error for UnknownEntryType {}

impl FromStr for EntryType {
    type Err = UnknownEntryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        EntryType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownEntryType(code.to_string()))
    }
}

/// A single day's logged time within a monthly timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// The calendar date; always inside the parent timesheet's month.
    pub date: NaiveDate,
    /// Hours logged for the day.
    pub duration: Decimal,
    /// The category of the day.
    pub entry_type: EntryType,
    /// Display row of the Monday-first month grid this date falls on.
    pub row: u32,
}

impl DailyEntry {
    /// Creates a zero-duration placeholder for `date`.
    pub fn placeholder(date: NaiveDate, row: u32) -> Self {
        Self {
            date,
            duration: Decimal::ZERO,
            entry_type: EntryType::default(),
            row,
        }
    }

    /// Returns the day of the week of the entry.
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Returns true if no time has been logged.
    pub fn is_blank(&self) -> bool {
        self.duration.is_zero()
    }
}
