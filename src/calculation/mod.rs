//! Calculation logic for the Time and Leave Accounting Engine.
//!
//! This module contains the pure functions of the engine: shift assignment
//! resolution, holiday lookup, arrival classification against shift start
//! plus grace, worked/effective/overtime hour derivation with day-status
//! thresholds, and per-day leave counting with the sandwich rule.

mod arrival;
mod holiday_lookup;
mod leave_days;
mod shift_resolver;
mod work_hours;

pub use arrival::{classify_arrival, LATE_CUTOFF_MINUTES};
pub use holiday_lookup::{holidays_in_range, HolidayCalendar, HolidayEntry};
pub use leave_days::{count_leave_days, HalfDayOverride, LeaveDayCount};
pub use shift_resolver::{resolve_assignment, ResolvedShift};
pub use work_hours::{
    compute_hours, WorkedHours, DEFAULT_FULL_DAY_HOURS, DEFAULT_HALF_DAY_HOURS,
    LUNCH_DEDUCTION_HOURS,
};
