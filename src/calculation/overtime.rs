//! Monthly overtime computation.
//!
//! Overtime accrues per day as the positive difference between the logged
//! duration and a baseline that depends on the entry category and on whether
//! the employee works a night-shift role.
//!
//! ## Rules
//!
//! | Category | Standard role | Night-shift role |
//! |---|---|---|
//! | Regular, on an overtime weekday | `duration - 8` | `duration - 12` |
//! | Weekend | `duration - weekend baseline` | `duration - 12` |
//! | Holiday | `duration - 8` | `duration - 12` **and** `duration - 8` |
//!
//! A night-shift holiday entry is matched by both the weekend rule and the
//! holiday rule and contributes under each.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OvertimeSettings;
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{DailyEntry, EntryType};

/// The rule under which an entry accrued overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeRule {
    /// Regular hours on an overtime weekday.
    RegularWeekday,
    /// Weekend work (and holiday work for night-shift roles).
    Weekend,
    /// Holiday work.
    Holiday,
}

/// One positive overtime contribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeContribution {
    /// The day of the entry.
    pub date: NaiveDate,
    /// The rule that matched.
    pub rule: OvertimeRule,
    /// Hours logged that day.
    pub duration: Decimal,
    /// Baseline the duration was compared against.
    pub baseline: Decimal,
    /// Overtime hours accrued (`duration - baseline`, always positive).
    pub hours: Decimal,
}

/// Result of an overtime computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSummary {
    /// Total overtime hours.
    pub total: Decimal,
    /// Every positive contribution, in entry order.
    pub contributions: Vec<OvertimeContribution>,
}

impl OvertimeSummary {
    /// The total as a plain numeric string, e.g. "2" or "3.5".
    pub fn formatted(&self) -> String {
        self.total.normalize().to_string()
    }
}

/// Computes monthly overtime from daily entries.
///
/// # Example
///
/// ```
/// use timesheet_engine::calculation::OvertimeCalculator;
/// use timesheet_engine::config::OvertimeSettings;
/// use timesheet_engine::models::{DailyEntry, EntryType};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut settings = OvertimeSettings::default();
/// settings.weekend_baseline_hours = Some(Decimal::from(8));
/// let calculator = OvertimeCalculator::new(&settings).unwrap();
///
/// // 2024-03-05 is a Tuesday
/// let entry = DailyEntry {
///     date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
///     duration: Decimal::from(10),
///     entry_type: EntryType::Regular,
///     row: 1,
/// };
/// let summary = calculator.compute_overtime(&[entry], false);
/// assert_eq!(summary.formatted(), "2");
/// ```
#[derive(Debug, Clone)]
pub struct OvertimeCalculator {
    standard_baseline: Decimal,
    night_shift_baseline: Decimal,
    holiday_baseline: Decimal,
    weekend_baseline: Decimal,
    regular_overtime_days: Vec<Weekday>,
}

impl OvertimeCalculator {
    /// Builds a calculator from settings.
    ///
    /// Fails with [`TimesheetError::Configuration`] when the weekend
    /// baseline is not configured.
    pub fn new(settings: &OvertimeSettings) -> TimesheetResult<Self> {
        let weekend_baseline = settings.weekend_baseline_hours.ok_or_else(|| {
            TimesheetError::configuration("overtime.weekend_baseline_hours must be configured")
        })?;

        Ok(Self {
            standard_baseline: settings.standard_baseline_hours,
            night_shift_baseline: settings.night_shift_baseline_hours,
            holiday_baseline: settings.holiday_baseline_hours,
            weekend_baseline,
            regular_overtime_days: settings.regular_overtime_days.clone(),
        })
    }

    /// The daily baseline for the role.
    pub fn baseline(&self, is_night_shift: bool) -> Decimal {
        if is_night_shift {
            self.night_shift_baseline
        } else {
            self.standard_baseline
        }
    }

    /// Sums the positive overtime of `entries`.
    pub fn compute_overtime(&self, entries: &[DailyEntry], is_night_shift: bool) -> OvertimeSummary {
        let baseline = self.baseline(is_night_shift);
        let mut contributions = Vec::new();

        let mut accrue = |entry: &DailyEntry, rule: OvertimeRule, threshold: Decimal| {
            let difference = entry.duration - threshold;
            if difference > Decimal::ZERO {
                contributions.push(OvertimeContribution {
                    date: entry.date,
                    rule,
                    duration: entry.duration,
                    baseline: threshold,
                    hours: difference,
                });
            }
        };

        for entry in entries {
            if entry.entry_type == EntryType::Regular
                && self.regular_overtime_days.contains(&entry.weekday())
            {
                accrue(entry, OvertimeRule::RegularWeekday, baseline);
            }

            let weekend_rule = match entry.entry_type {
                EntryType::Weekend => true,
                EntryType::Holiday => is_night_shift,
                _ => false,
            };
            if weekend_rule {
                let threshold = if is_night_shift {
                    baseline
                } else {
                    self.weekend_baseline
                };
                accrue(entry, OvertimeRule::Weekend, threshold);
            }

            if entry.entry_type == EntryType::Holiday {
                accrue(entry, OvertimeRule::Holiday, self.holiday_baseline);
            }
        }

        let total: Decimal = contributions.iter().map(|c| c.hours).sum();
        debug!(
            total = %total,
            contributions = contributions.len(),
            is_night_shift,
            "Computed monthly overtime"
        );

        OvertimeSummary {
            total,
            contributions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn settings() -> OvertimeSettings {
        OvertimeSettings {
            weekend_baseline_hours: Some(dec("6")),
            ..OvertimeSettings::default()
        }
    }

    fn calculator() -> OvertimeCalculator {
        OvertimeCalculator::new(&settings()).unwrap()
    }

    fn entry(day: u32, hours: &str, entry_type: EntryType) -> DailyEntry {
        DailyEntry {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            duration: dec(hours),
            entry_type,
            row: 0,
        }
    }

    // 2024-03: Fri 1, Sat 2, Sun 3, Mon 4, Tue 5, Wed 6, Thu 7.

    #[test]
    fn test_regular_weekday_ten_hours_contributes_two() {
        let summary = calculator().compute_overtime(&[entry(5, "10", EntryType::Regular)], false);
        assert_eq!(summary.total, dec("2"));
        assert_eq!(summary.formatted(), "2");
        assert_eq!(summary.contributions[0].rule, OvertimeRule::RegularWeekday);
        assert_eq!(summary.contributions[0].baseline, dec("8"));
    }

    #[test]
    fn test_regular_weekday_six_hours_contributes_zero() {
        let summary = calculator().compute_overtime(&[entry(5, "6", EntryType::Regular)], false);
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.formatted(), "0");
        assert!(summary.contributions.is_empty());
    }

    #[test]
    fn test_negative_differences_never_subtract() {
        let entries = [
            entry(5, "10", EntryType::Regular),
            entry(6, "0", EntryType::Regular),
            entry(7, "4", EntryType::Regular),
        ];
        let summary = calculator().compute_overtime(&entries, false);
        assert_eq!(summary.total, dec("2"));
    }

    #[test]
    fn test_regular_entries_on_rest_days_do_not_accrue() {
        // Sunday 3 and Monday 4 are outside the default overtime days.
        let entries = [
            entry(3, "12", EntryType::Regular),
            entry(4, "12", EntryType::Regular),
        ];
        let summary = calculator().compute_overtime(&entries, false);
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn test_saturday_regular_entry_accrues() {
        let summary = calculator().compute_overtime(&[entry(2, "9", EntryType::Regular)], false);
        assert_eq!(summary.total, dec("1"));
    }

    #[test]
    fn test_configured_overtime_days_are_honoured() {
        let mut s = settings();
        s.regular_overtime_days = vec![Weekday::Mon];
        let calc = OvertimeCalculator::new(&s).unwrap();

        let entries = [
            entry(4, "10", EntryType::Regular),
            entry(5, "10", EntryType::Regular),
        ];
        let summary = calc.compute_overtime(&entries, false);
        assert_eq!(summary.total, dec("2"));
        assert_eq!(summary.contributions[0].date.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_standard_weekend_uses_weekend_baseline() {
        let summary = calculator().compute_overtime(&[entry(2, "9", EntryType::Weekend)], false);
        assert_eq!(summary.total, dec("3"));
        assert_eq!(summary.contributions[0].rule, OvertimeRule::Weekend);
        assert_eq!(summary.contributions[0].baseline, dec("6"));
    }

    #[test]
    fn test_weekend_tag_applies_on_any_day() {
        let summary = calculator().compute_overtime(&[entry(5, "7", EntryType::Weekend)], false);
        assert_eq!(summary.total, dec("1"));
    }

    #[test]
    fn test_night_shift_weekend_uses_night_baseline() {
        let summary = calculator().compute_overtime(&[entry(2, "14", EntryType::Weekend)], true);
        assert_eq!(summary.total, dec("2"));
        assert_eq!(summary.contributions[0].baseline, dec("12"));
    }

    #[test]
    fn test_night_shift_regular_uses_twelve_hours() {
        let entries = [
            entry(5, "12", EntryType::Regular),
            entry(6, "13.5", EntryType::Regular),
        ];
        let summary = calculator().compute_overtime(&entries, true);
        assert_eq!(summary.total, dec("1.5"));
        assert_eq!(summary.formatted(), "1.5");
    }

    #[test]
    fn test_standard_holiday_uses_holiday_baseline() {
        let summary = calculator().compute_overtime(&[entry(29, "11", EntryType::Holiday)], false);
        assert_eq!(summary.total, dec("3"));
        assert_eq!(summary.contributions.len(), 1);
        assert_eq!(summary.contributions[0].rule, OvertimeRule::Holiday);
    }

    #[test]
    fn test_night_shift_holiday_counts_under_both_rules() {
        // 14h: weekend rule 14 - 12 = 2, holiday rule 14 - 8 = 6.
        let summary = calculator().compute_overtime(&[entry(29, "14", EntryType::Holiday)], true);
        assert_eq!(summary.total, dec("8"));
        let rules: Vec<_> = summary.contributions.iter().map(|c| c.rule).collect();
        assert_eq!(rules, vec![OvertimeRule::Weekend, OvertimeRule::Holiday]);
    }

    #[test]
    fn test_leave_entries_never_accrue() {
        let entries = [
            entry(5, "10", EntryType::AnnualLeave),
            entry(6, "10", EntryType::SickLeave),
        ];
        let summary = calculator().compute_overtime(&entries, false);
        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn test_mixed_month_total() {
        let entries = [
            entry(5, "10", EntryType::Regular),  // 2
            entry(2, "8", EntryType::Weekend),   // 2 (baseline 6)
            entry(29, "9", EntryType::Holiday),  // 1
            entry(4, "11", EntryType::Regular),  // Monday, 0
        ];
        let summary = calculator().compute_overtime(&entries, false);
        assert_eq!(summary.total, dec("5"));
        assert_eq!(summary.contributions.len(), 3);
    }

    #[test]
    fn test_missing_weekend_baseline_is_a_configuration_error() {
        let result = OvertimeCalculator::new(&OvertimeSettings::default());
        assert!(matches!(result, Err(TimesheetError::Configuration { .. })));
    }

    #[test]
    fn test_summary_serialization() {
        let summary = calculator().compute_overtime(&[entry(5, "10", EntryType::Regular)], false);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"total\":\"2\""));
        assert!(json.contains("\"rule\":\"regular_weekday\""));
    }
}
