//! Domain models for the Time and Leave Accounting Engine.
//!
//! All models are plain serde-able records. String-tagged enums serialize
//! with snake_case tags because the surrounding API contract depends on the
//! exact values (`on_time`, `half_day`, `first_half`, ...).

mod attendance;
mod employee;
mod leave;
mod shift;

pub use attendance::{
    ArrivalStatus, AttendanceRecord, AttendanceRegularization, AttendanceStatus, ClockEntry,
    ClockSource, RegularizationStatus,
};
pub use employee::{Actor, Employee, Gender, Role};
pub use leave::{
    CompOffGrant, LeaveBalance, LeaveDayKind, LeaveRequest, LeaveStatus, LeaveType, COMP_OFF_EXPIRY_DAYS,
};
pub use shift::{default_weekly_offs, ShiftAssignment, ShiftPolicy, WeeklyOffPolicy};
