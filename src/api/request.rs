//! Request types for the time and leave engine API.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use uuid::Uuid;

use crate::calculation::HalfDayOverride;
use crate::models::{AttendanceStatus, ClockSource};

fn default_source() -> ClockSource {
    ClockSource::Web
}

/// Body for `POST /attendance/clock-in`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockInRequest {
    /// The clocking employee.
    pub employee_id: Uuid,
    /// Clock-in time, e.g. "2026-03-02T09:05:00".
    pub timestamp: NaiveDateTime,
    /// Where the event came from.
    #[serde(default = "default_source")]
    pub source: ClockSource,
}

/// Body for `POST /attendance/clock-out`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockOutRequest {
    /// The clocking employee.
    pub employee_id: Uuid,
    /// Clock-out time.
    pub timestamp: NaiveDateTime,
}

/// Body for `POST /leave/apply`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyLeaveRequest {
    /// The requesting employee.
    pub employee_id: Uuid,
    /// Leave type code, e.g. "casual_leave".
    pub leave_type: String,
    /// The application date, for the notice-period guard.
    pub today: NaiveDate,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub to_date: NaiveDate,
    /// Per-date half-day elections.
    #[serde(default)]
    pub half_day_overrides: HashMap<NaiveDate, HalfDayOverride>,
    /// The employee's justification.
    pub reason: String,
}

/// Body for approve/reject endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    /// The reviewing actor.
    pub actor_id: Uuid,
    /// Optional reviewer remarks.
    #[serde(default)]
    pub remarks: Option<String>,
    /// Review time.
    pub timestamp: NaiveDateTime,
}

/// Body for `POST /leave/{id}/cancel`.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelRequest {
    /// The cancelling actor; must be the request owner.
    pub actor_id: Uuid,
    /// Cancellation time.
    pub timestamp: NaiveDateTime,
}

/// Query for `GET /leave/balance`.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceQuery {
    /// The employee whose balance is queried.
    pub employee_id: Uuid,
    /// Leave type code.
    pub leave_type: String,
    /// Balance year.
    pub year: i32,
}

/// Body for `POST /regularizations`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegularizationRequest {
    /// The employee whose attendance is corrected.
    pub employee_id: Uuid,
    /// The past date to correct.
    pub date: NaiveDate,
    /// The submission date; `date` must be strictly before it.
    pub today: NaiveDate,
    /// The status the employee claims for the day.
    pub requested_status: AttendanceStatus,
    /// The employee's justification.
    pub reason: String,
}

/// Body for `POST /comp-off`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompOffRequest {
    /// The employee who worked the off day.
    pub employee_id: Uuid,
    /// The off day that was worked.
    pub work_date: NaiveDate,
    /// The employee's justification.
    pub reason: String,
}

/// Body for `POST /comp-off/{id}/approve`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompOffApproveRequest {
    /// The granting actor.
    pub actor_id: Uuid,
}
