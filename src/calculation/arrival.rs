//! Arrival classification against shift start plus grace.

use chrono::NaiveDateTime;

use crate::models::{ArrivalStatus, ShiftPolicy};

/// Minutes after shift start up to which an arrival is merely late; beyond
/// this it is very late.
pub const LATE_CUTOFF_MINUTES: i64 = 30;

/// Classifies a clock-in instant against the resolved shift.
///
/// With no shift every arrival is on time. Otherwise the difference between
/// the clock-in and the shift start (combined with the clock-in's date) is
/// evaluated in order:
///
/// - within `grace_minutes` (inclusive) → [`ArrivalStatus::OnTime`]
/// - within [`LATE_CUTOFF_MINUTES`] → [`ArrivalStatus::Late`]
/// - otherwise → [`ArrivalStatus::VeryLate`]
///
/// [`ArrivalStatus::Absent`] is never produced here; absent is only assigned
/// when no clock-in occurs at all.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use uuid::Uuid;
/// use hr_engine::calculation::classify_arrival;
/// use hr_engine::models::{ArrivalStatus, ShiftPolicy};
///
/// let shift = ShiftPolicy {
///     id: Uuid::new_v4(),
///     name: "General 9-6".to_string(),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     grace_minutes: 15,
///     half_day_minutes: 240,
///     full_day_minutes: 480,
///     is_night_shift: false,
///     active: true,
/// };
/// let clock_in = NaiveDate::from_ymd_opt(2026, 1, 15)
///     .unwrap()
///     .and_hms_opt(9, 10, 0)
///     .unwrap();
/// assert_eq!(classify_arrival(clock_in, Some(&shift)), ArrivalStatus::OnTime);
/// ```
pub fn classify_arrival(clock_in: NaiveDateTime, shift: Option<&ShiftPolicy>) -> ArrivalStatus {
    let Some(shift) = shift else {
        return ArrivalStatus::OnTime;
    };

    let shift_start = clock_in.date().and_time(shift.start_time);
    // Second precision: one second past the grace window is already late.
    let diff_seconds = (clock_in - shift_start).num_seconds();

    if diff_seconds <= shift.grace_minutes * 60 {
        ArrivalStatus::OnTime
    } else if diff_seconds <= LATE_CUTOFF_MINUTES * 60 {
        ArrivalStatus::Late
    } else {
        ArrivalStatus::VeryLate
    }
}
