//! Leave models: leave types, balances, requests, and comp-off grants.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::employee::Gender;

/// Days after the worked date at which an unused comp-off credit lapses.
pub const COMP_OFF_EXPIRY_DAYS: i64 = 90;

/// A configured category of leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier for the leave type.
    pub id: Uuid,
    /// Unique short code, e.g. "casual_leave".
    pub code: String,
    /// Display name.
    pub name: String,
    /// Days seeded into a fresh yearly balance.
    pub default_balance: Decimal,
    /// Maximum days carried into the next year.
    pub max_carry_forward: Decimal,
    /// True when the leave is paid.
    pub is_paid: bool,
    /// False suspends the approval step: requests are approved at creation
    /// with the balance deducted eagerly.
    pub requires_approval: bool,
    /// Minimum days of advance notice required when applying.
    pub min_days_notice: i64,
    /// Maximum days a single request may span; `None` is unbounded.
    pub max_consecutive_days: Option<Decimal>,
    /// Restricts applicability to one gender; `None` is any.
    pub applicable_gender: Option<Gender>,
    /// False once the type has been retired.
    pub active: bool,
}

/// Yearly leave balance for one (employee, leave type) pair.
///
/// `current_balance` is always derived from its inputs, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Unique identifier for the balance row.
    pub id: Uuid,
    /// The employee the balance belongs to.
    pub employee_id: Uuid,
    /// The leave type the balance tracks.
    pub leave_type_id: Uuid,
    /// The calendar year the balance covers.
    pub year: i32,
    /// Days seeded at creation.
    pub opening_balance: Decimal,
    /// Days accrued during the year (comp-off credits and the like).
    pub accrued: Decimal,
    /// Days consumed by approved leave.
    pub used: Decimal,
    /// Days carried in from the previous year.
    pub carry_forwarded: Decimal,
    /// Manual HR adjustments, positive or negative.
    pub adjusted: Decimal,
}

impl LeaveBalance {
    /// Creates a fresh balance row seeded with an opening balance.
    pub fn open(employee_id: Uuid, leave_type_id: Uuid, year: i32, opening: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            leave_type_id,
            year,
            opening_balance: opening,
            accrued: Decimal::ZERO,
            used: Decimal::ZERO,
            carry_forwarded: Decimal::ZERO,
            adjusted: Decimal::ZERO,
        }
    }

    /// The derived current balance:
    /// opening + accrued + carry_forwarded + adjusted - used.
    pub fn current_balance(&self) -> Decimal {
        self.opening_balance + self.accrued + self.carry_forwarded + self.adjusted - self.used
    }
}

/// Per-date classification inside a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDayKind {
    /// A full leave day (including sandwiched offs).
    FullDay,
    /// Leave for the first half of the day.
    FirstHalf,
    /// Leave for the second half of the day.
    SecondHalf,
    /// A weekly off excluded from the count.
    Weekend,
    /// A holiday excluded from the count.
    Holiday,
}

impl LeaveDayKind {
    /// The number of leave days this classification contributes.
    pub fn contribution(&self) -> Decimal {
        match self {
            LeaveDayKind::FullDay => Decimal::ONE,
            LeaveDayKind::FirstHalf | LeaveDayKind::SecondHalf => Decimal::new(5, 1),
            LeaveDayKind::Weekend | LeaveDayKind::Holiday => Decimal::ZERO,
        }
    }
}

/// Lifecycle state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting review.
    Pending,
    /// Approved; balance deducted.
    Approved,
    /// Rejected; no balance effect.
    Rejected,
    /// Cancelled by the employee.
    Cancelled,
    /// Revoked by HR after approval.
    Revoked,
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
            LeaveStatus::Revoked => "revoked",
        };
        write!(f, "{}", tag)
    }
}

/// A leave request with its day-by-day ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The employee requesting leave.
    pub employee_id: Uuid,
    /// The leave type requested.
    pub leave_type_id: Uuid,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Per-date classification produced by the day counter.
    pub day_details: BTreeMap<NaiveDate, LeaveDayKind>,
    /// Total leave days consumed; supports 0.5 increments.
    pub total_days: Decimal,
    /// The employee's justification.
    pub reason: String,
    /// Lifecycle state.
    pub status: LeaveStatus,
    /// Reviewer id once reviewed.
    pub reviewed_by: Option<Uuid>,
    /// Review timestamp once reviewed.
    pub reviewed_at: Option<NaiveDateTime>,
    /// Reviewer remarks once reviewed.
    pub reviewer_remarks: Option<String>,
    /// Cancellation timestamp once cancelled.
    pub cancelled_at: Option<NaiveDateTime>,
}

impl LeaveRequest {
    /// Returns true if the request's date range intersects [from, to].
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && from <= self.end_date
    }
}

/// A compensatory-off credit for working on an off day or holiday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompOffGrant {
    /// Unique identifier for the grant.
    pub id: Uuid,
    /// The employee who worked the off day.
    pub employee_id: Uuid,
    /// The off day that was worked; unique per employee.
    pub work_date: NaiveDate,
    /// Why the employee worked that day.
    pub reason: String,
    /// Approver id; `None` until approved.
    pub granted_by: Option<Uuid>,
    /// Date the credit lapses if unused.
    pub expires_at: NaiveDate,
    /// True once the credit has been consumed by a leave request.
    pub is_used: bool,
    /// The leave request that consumed the credit, if any.
    pub leave_request_id: Option<Uuid>,
}

impl CompOffGrant {
    /// Creates an unapproved grant; expiry is fixed at creation.
    pub fn request(employee_id: Uuid, work_date: NaiveDate, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            work_date,
            reason: reason.into(),
            granted_by: None,
            expires_at: work_date + Duration::days(COMP_OFF_EXPIRY_DAYS),
            is_used: false,
            leave_request_id: None,
        }
    }
}
