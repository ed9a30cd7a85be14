//! Holiday calendar lookup.
//!
//! Calendars are either global (`location = None`) or location-specific. The
//! applicable holiday set for an employee and date range is the union of the
//! global calendar and the calendar matching the employee's location, with
//! optional holidays excluded.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single holiday in a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// The holiday date.
    pub date: NaiveDate,
    /// Display name, e.g. "Republic Day".
    pub name: String,
    /// Optional holidays are chosen individually and never block leave or
    /// attendance accounting.
    #[serde(default)]
    pub is_optional: bool,
}

/// A holiday calendar, global or scoped to one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    /// The location the calendar applies to; `None` means global.
    pub location: Option<String>,
    /// Holidays in the calendar.
    pub holidays: Vec<HolidayEntry>,
}

/// Returns the non-optional holiday dates applicable to an employee
/// location within `[from, to]` (inclusive).
///
/// Location matching is exact; a `None` employee location matches only the
/// global calendar.
pub fn holidays_in_range(
    calendars: &[HolidayCalendar],
    location: Option<&str>,
    from: NaiveDate,
    to: NaiveDate,
) -> BTreeSet<NaiveDate> {
    calendars
        .iter()
        .filter(|calendar| match (&calendar.location, location) {
            (None, _) => true,
            (Some(cal_loc), Some(emp_loc)) => cal_loc == emp_loc,
            (Some(_), None) => false,
        })
        .flat_map(|calendar| calendar.holidays.iter())
        .filter(|entry| !entry.is_optional && from <= entry.date && entry.date <= to)
        .map(|entry| entry.date)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(date: &str, optional: bool) -> HolidayEntry {
        HolidayEntry {
            date: make_date(date),
            name: "holiday".to_string(),
            is_optional: optional,
        }
    }

    fn calendars() -> Vec<HolidayCalendar> {
        vec![
            HolidayCalendar {
                location: None,
                holidays: vec![entry("2026-01-26", false), entry("2026-08-15", false)],
            },
            HolidayCalendar {
                location: Some("pune".to_string()),
                holidays: vec![entry("2026-02-17", false), entry("2026-03-06", true)],
            },
        ]
    }

    #[test]
    fn test_global_and_location_calendars_union() {
        let holidays = holidays_in_range(
            &calendars(),
            Some("pune"),
            make_date("2026-01-01"),
            make_date("2026-12-31"),
        );
        assert_eq!(
            holidays,
            BTreeSet::from([
                make_date("2026-01-26"),
                make_date("2026-02-17"),
                make_date("2026-08-15"),
            ])
        );
    }

    #[test]
    fn test_optional_holidays_excluded() {
        let holidays = holidays_in_range(
            &calendars(),
            Some("pune"),
            make_date("2026-03-01"),
            make_date("2026-03-31"),
        );
        assert!(holidays.is_empty());
    }

    #[test]
    fn test_other_location_sees_only_global() {
        let holidays = holidays_in_range(
            &calendars(),
            Some("chennai"),
            make_date("2026-01-01"),
            make_date("2026-12-31"),
        );
        assert_eq!(
            holidays,
            BTreeSet::from([make_date("2026-01-26"), make_date("2026-08-15")])
        );
    }

    #[test]
    fn test_no_location_sees_only_global() {
        let holidays = holidays_in_range(
            &calendars(),
            None,
            make_date("2026-01-01"),
            make_date("2026-12-31"),
        );
        assert_eq!(holidays.len(), 2);
    }

    #[test]
    fn test_range_boundaries_inclusive() {
        let holidays = holidays_in_range(
            &calendars(),
            None,
            make_date("2026-01-26"),
            make_date("2026-01-26"),
        );
        assert_eq!(holidays, BTreeSet::from([make_date("2026-01-26")]));
    }
}
