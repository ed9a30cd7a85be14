//! Per-day leave counting with the sandwich rule.
//!
//! A leave range expands into a per-date classification. Weekly offs and
//! holidays contribute nothing unless they fall strictly between the first
//! and last working leave day of the range with the sandwich rule enabled,
//! in which case they count as full leave days. Leading and trailing offs
//! are never sandwiched; this boundary is load-bearing, since an off-by-one
//! here silently grants or denies leave.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::LeaveDayKind;

/// Caller-supplied half-day election for a date inside the range.
///
/// Dates without an override take a full day; override keys outside the
/// range are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDayOverride {
    /// Leave for the first half of the day.
    FirstHalf,
    /// Leave for the second half of the day.
    SecondHalf,
}

/// The result of expanding a leave range.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveDayCount {
    /// Total leave days consumed, in 0.5 increments.
    pub total_days: Decimal,
    /// Classification for every date in the range.
    pub day_details: BTreeMap<NaiveDate, LeaveDayKind>,
}

impl LeaveDayCount {
    /// A range with no working leave days consumes nothing; callers must
    /// reject such requests.
    pub fn is_empty(&self) -> bool {
        self.total_days.is_zero()
    }
}

/// Expands `[from, to]` (inclusive) into per-day leave contributions.
///
/// # Arguments
///
/// * `from`, `to` - The requested range; an inverted range yields an empty
///   count
/// * `half_day_overrides` - Per-date half-day elections
/// * `weekly_offs` - The employee's weekly off days
/// * `holidays` - Applicable non-optional holiday dates
/// * `sandwich` - Whether interior offs count as leave
///
/// # Example
///
/// ```
/// use std::collections::{BTreeSet, HashMap, HashSet};
/// use chrono::{NaiveDate, Weekday};
/// use rust_decimal::Decimal;
/// use hr_engine::calculation::count_leave_days;
///
/// // Friday through Monday with a Sat/Sun weekend, sandwich enabled.
/// let from = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
/// let to = NaiveDate::from_ymd_opt(2026, 1, 19).unwrap();
/// let offs = HashSet::from([Weekday::Sat, Weekday::Sun]);
///
/// let count = count_leave_days(from, to, &HashMap::new(), &offs, &BTreeSet::new(), true);
/// assert_eq!(count.total_days, Decimal::from(4));
/// ```
pub fn count_leave_days(
    from: NaiveDate,
    to: NaiveDate,
    half_day_overrides: &HashMap<NaiveDate, HalfDayOverride>,
    weekly_offs: &HashSet<Weekday>,
    holidays: &BTreeSet<NaiveDate>,
    sandwich: bool,
) -> LeaveDayCount {
    let dates: Vec<NaiveDate> = from.iter_days().take_while(|d| *d <= to).collect();

    let is_working = |date: &NaiveDate| {
        !weekly_offs.contains(&date.weekday()) && !holidays.contains(date)
    };

    let sandwich_start = dates.iter().position(is_working);
    let sandwich_end = dates.iter().rposition(is_working);

    let mut total_days = Decimal::ZERO;
    let mut day_details = BTreeMap::new();

    for (index, date) in dates.iter().enumerate() {
        let kind = if is_working(date) {
            match half_day_overrides.get(date) {
                Some(HalfDayOverride::FirstHalf) => LeaveDayKind::FirstHalf,
                Some(HalfDayOverride::SecondHalf) => LeaveDayKind::SecondHalf,
                None => LeaveDayKind::FullDay,
            }
        } else {
            // Only offs strictly between the first and last working leave
            // day are sandwiched.
            let sandwiched = sandwich
                && matches!((sandwich_start, sandwich_end), (Some(start), Some(end))
                    if start < index && index < end);
            if sandwiched {
                LeaveDayKind::FullDay
            } else if holidays.contains(date) {
                LeaveDayKind::Holiday
            } else {
                LeaveDayKind::Weekend
            }
        };

        total_days += kind.contribution();
        day_details.insert(*date, kind);
    }

    LeaveDayCount {
        total_days,
        day_details,
    }
}
