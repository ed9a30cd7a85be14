//! Attendance models: the daily record, clock entries, and regularizations.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Day-level attendance outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// A full working day was recorded.
    Present,
    /// No qualifying work was recorded.
    Absent,
    /// Half a working day, by hours or by late-arrival penalty.
    HalfDay,
    /// A weekly off day.
    Weekend,
    /// A holiday.
    Holiday,
    /// The employee was on approved leave.
    OnLeave,
    /// The employee worked from home.
    WorkFromHome,
    /// The employee was on outdoor duty.
    OnDuty,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::Weekend => "weekend",
            AttendanceStatus::Holiday => "holiday",
            AttendanceStatus::OnLeave => "on_leave",
            AttendanceStatus::WorkFromHome => "work_from_home",
            AttendanceStatus::OnDuty => "on_duty",
        };
        write!(f, "{}", tag)
    }
}

/// Classification of the first clock-in against shift start plus grace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalStatus {
    /// Arrival within the grace period (boundary inclusive).
    OnTime,
    /// Arrival within 30 minutes of shift start.
    Late,
    /// Arrival more than 30 minutes after shift start.
    VeryLate,
    /// No clock-in occurred at all; never produced by classification.
    Absent,
}

/// Origin of a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockSource {
    /// Web self-service portal.
    Web,
    /// Mobile application.
    Mobile,
    /// Biometric terminal.
    Biometric,
    /// Manual entry by HR.
    Manual,
}

/// The daily attendance record, unique per employee and date.
///
/// Created lazily on the first clock-in of a day, or on regularization
/// submission for a day with no activity. Mutated by clock-out (hours) and
/// by regularization approval (status override). Never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee the record belongs to.
    pub employee_id: Uuid,
    /// The calendar day the record tracks.
    pub date: NaiveDate,
    /// Day-level outcome.
    pub status: AttendanceStatus,
    /// Arrival classification from the first clock-in, if any.
    pub arrival_status: Option<ArrivalStatus>,
    /// The shift policy resolved at first clock-in, if any.
    pub shift_policy_id: Option<Uuid>,
    /// First clock-in of the day.
    pub first_clock_in: Option<NaiveDateTime>,
    /// Last clock-out of the day.
    pub last_clock_out: Option<NaiveDateTime>,
    /// Minutes between first clock-in and last clock-out.
    pub total_work_minutes: i64,
    /// Total minutes minus the fixed lunch deduction, floored at zero.
    pub effective_work_minutes: i64,
    /// Effective minutes beyond the full-day threshold, floored at zero.
    pub overtime_minutes: i64,
    /// True once a regularization has overwritten the status.
    pub is_regularized: bool,
    /// Origin of the event that created the record.
    pub source: ClockSource,
}

/// A single clock-in/clock-out pair.
///
/// `clock_out` is `None` while the entry is open. The workflow enforces at
/// most one open entry per employee at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The employee the entry belongs to.
    pub employee_id: Uuid,
    /// The attendance record the entry contributes to.
    pub attendance_record_id: Uuid,
    /// When the employee clocked in.
    pub clock_in: NaiveDateTime,
    /// When the employee clocked out; `None` while open.
    pub clock_out: Option<NaiveDateTime>,
    /// Minutes between clock-in and clock-out, zero while open.
    pub duration_minutes: i64,
    /// Origin of the clock event.
    pub source: ClockSource,
}

impl ClockEntry {
    /// Returns true while the entry has no clock-out.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }
}

/// Lifecycle state of a regularization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegularizationStatus {
    /// Awaiting review.
    Pending,
    /// Approved; the attendance record was rewritten.
    Approved,
    /// Rejected; no attendance mutation.
    Rejected,
}

impl std::fmt::Display for RegularizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            RegularizationStatus::Pending => "pending",
            RegularizationStatus::Approved => "approved",
            RegularizationStatus::Rejected => "rejected",
        };
        write!(f, "{}", tag)
    }
}

/// A retroactive correction request for a past attendance day.
///
/// At most one pending regularization may exist per (attendance record,
/// employee) pair. Approve and reject are terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRegularization {
    /// Unique identifier for the regularization.
    pub id: Uuid,
    /// The attendance record to correct.
    pub attendance_record_id: Uuid,
    /// The employee requesting the correction.
    pub employee_id: Uuid,
    /// The status the employee claims for the day.
    pub requested_status: AttendanceStatus,
    /// The employee's justification.
    pub reason: String,
    /// Lifecycle state.
    pub status: RegularizationStatus,
    /// Reviewer id once reviewed.
    pub reviewed_by: Option<Uuid>,
    /// Review timestamp once reviewed.
    pub reviewed_at: Option<NaiveDateTime>,
    /// Reviewer remarks once reviewed.
    pub reviewer_remarks: Option<String>,
}
