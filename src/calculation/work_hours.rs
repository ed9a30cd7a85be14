//! Worked hour derivation and day-status thresholds.
//!
//! Total hours span first clock-in to last clock-out; effective hours deduct
//! a fixed one-hour lunch; overtime is effective time beyond the full-day
//! threshold. The resulting day status follows the half-day and full-day
//! thresholds of the shift, or the documented defaults when no shift is
//! assigned.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::{AttendanceStatus, ShiftPolicy};

/// The fixed lunch deduction, in hours. Not configurable.
pub const LUNCH_DEDUCTION_HOURS: i64 = 1;

/// Full-day threshold applied when no shift is assigned.
pub const DEFAULT_FULL_DAY_HOURS: i64 = 8;

/// Half-day threshold applied when no shift is assigned.
pub const DEFAULT_HALF_DAY_HOURS: i64 = 4;

/// The derived hour totals and day status for one attendance day.
///
/// Hours are decimals rounded to two places from the second-level span; the
/// minute fields carry the same spans truncated to whole minutes for the
/// attendance record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedHours {
    /// Hours between first clock-in and last clock-out.
    pub total_hours: Decimal,
    /// Total hours minus the lunch deduction, floored at zero.
    pub effective_hours: Decimal,
    /// Effective hours beyond the full-day threshold, floored at zero.
    pub overtime_hours: Decimal,
    /// Total worked minutes.
    pub total_minutes: i64,
    /// Effective worked minutes.
    pub effective_minutes: i64,
    /// Overtime minutes.
    pub overtime_minutes: i64,
    /// Day status from the effective hours against the shift thresholds.
    pub status: AttendanceStatus,
}

/// Derives hour totals and the day status from the first clock-in and last
/// clock-out of a day.
///
/// The computation is idempotent and never fails; a clock-out at or before
/// the clock-in yields all-zero totals and an absent status.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use hr_engine::calculation::compute_hours;
/// use hr_engine::models::AttendanceStatus;
///
/// let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let first_in = day.and_hms_opt(9, 0, 0).unwrap();
/// let last_out = day.and_hms_opt(18, 0, 0).unwrap();
///
/// let hours = compute_hours(first_in, last_out, None);
/// assert_eq!(hours.total_hours, Decimal::new(900, 2)); // 9.00
/// assert_eq!(hours.effective_hours, Decimal::new(800, 2)); // 8.00
/// assert_eq!(hours.status, AttendanceStatus::Present);
/// ```
pub fn compute_hours(
    first_in: NaiveDateTime,
    last_out: NaiveDateTime,
    shift: Option<&ShiftPolicy>,
) -> WorkedHours {
    // Hour totals keep second precision; the minute fields on the record
    // stay whole minutes.
    let total_seconds = (last_out - first_in).num_seconds().max(0);
    let total_minutes = total_seconds / 60;
    let effective_minutes = (total_minutes - LUNCH_DEDUCTION_HOURS * 60).max(0);

    let total_hours = (Decimal::new(total_seconds, 0) / Decimal::new(3600, 0)).round_dp(2);
    let effective_hours =
        (total_hours - Decimal::new(LUNCH_DEDUCTION_HOURS, 0)).max(Decimal::ZERO);

    let (full_day_hours, half_day_hours, full_day_minutes) = match shift {
        Some(shift) => (
            Decimal::new(shift.full_day_minutes, 0) / Decimal::new(60, 0),
            Decimal::new(shift.half_day_minutes, 0) / Decimal::new(60, 0),
            shift.full_day_minutes,
        ),
        None => (
            Decimal::new(DEFAULT_FULL_DAY_HOURS, 0),
            Decimal::new(DEFAULT_HALF_DAY_HOURS, 0),
            DEFAULT_FULL_DAY_HOURS * 60,
        ),
    };

    let overtime_hours = (effective_hours - full_day_hours).max(Decimal::ZERO);
    let overtime_minutes = (effective_minutes - full_day_minutes).max(0);

    let status = if effective_hours < half_day_hours {
        AttendanceStatus::Absent
    } else if effective_hours < full_day_hours {
        AttendanceStatus::HalfDay
    } else {
        AttendanceStatus::Present
    };

    WorkedHours {
        total_hours,
        effective_hours,
        overtime_hours,
        total_minutes,
        effective_minutes,
        overtime_minutes,
        status,
    }
}
