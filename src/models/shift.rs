//! Shift policy, weekly-off policy, and shift assignment models.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named shift definition with arrival and day-status thresholds.
///
/// Policies are immutable once referenced by historical attendance; they are
/// deactivated, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftPolicy {
    /// Unique identifier for the policy.
    pub id: Uuid,
    /// Display name, e.g. "General 9-6".
    pub name: String,
    /// Scheduled shift start.
    pub start_time: NaiveTime,
    /// Scheduled shift end.
    pub end_time: NaiveTime,
    /// Minutes after `start_time` within which arrival is still on time.
    pub grace_minutes: i64,
    /// Effective minutes required for a half day.
    pub half_day_minutes: i64,
    /// Effective minutes required for a full day.
    pub full_day_minutes: i64,
    /// True when the shift crosses midnight.
    pub is_night_shift: bool,
    /// False once the policy has been retired.
    pub active: bool,
}

/// A named set of weekly off days.
///
/// Serialized as an explicit per-day flag mapping so the API contract stays
/// self-describing; in memory the off days are a weekday set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyOffPolicy {
    /// Unique identifier for the policy.
    pub id: Uuid,
    /// Display name, e.g. "Standard weekend".
    pub name: String,
    /// Monday is an off day.
    #[serde(default)]
    pub monday: bool,
    /// Tuesday is an off day.
    #[serde(default)]
    pub tuesday: bool,
    /// Wednesday is an off day.
    #[serde(default)]
    pub wednesday: bool,
    /// Thursday is an off day.
    #[serde(default)]
    pub thursday: bool,
    /// Friday is an off day.
    #[serde(default)]
    pub friday: bool,
    /// Saturday is an off day.
    #[serde(default)]
    pub saturday: bool,
    /// Sunday is an off day.
    #[serde(default)]
    pub sunday: bool,
}

impl WeeklyOffPolicy {
    /// Returns the off days as a weekday set.
    pub fn off_days(&self) -> HashSet<Weekday> {
        let flags = [
            (Weekday::Mon, self.monday),
            (Weekday::Tue, self.tuesday),
            (Weekday::Wed, self.wednesday),
            (Weekday::Thu, self.thursday),
            (Weekday::Fri, self.friday),
            (Weekday::Sat, self.saturday),
            (Weekday::Sun, self.sunday),
        ];
        flags
            .into_iter()
            .filter_map(|(day, off)| off.then_some(day))
            .collect()
    }
}

/// The default weekly off set applied when no assignment exists.
pub fn default_weekly_offs() -> HashSet<Weekday> {
    HashSet::from([Weekday::Sat, Weekday::Sun])
}

/// Assignment of a shift policy and weekly-off policy to an employee for an
/// effective date range.
///
/// `effective_to = None` means open-ended. Among assignments whose range
/// covers a date, the one with the latest `effective_from` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Unique identifier for the assignment.
    pub id: Uuid,
    /// The employee the assignment applies to.
    pub employee_id: Uuid,
    /// The assigned shift policy.
    pub shift_policy_id: Uuid,
    /// The assigned weekly-off policy.
    pub weekly_off_policy_id: Uuid,
    /// First date the assignment applies.
    pub effective_from: NaiveDate,
    /// Last date the assignment applies; `None` is open-ended.
    pub effective_to: Option<NaiveDate>,
}

impl ShiftAssignment {
    /// Returns true if the assignment's effective range covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.is_none_or(|to| date <= to)
    }
}
