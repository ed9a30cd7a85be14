//! Leave request lifecycle: apply, approve, reject, cancel.
//!
//! States: pending → approved/rejected, pending → cancelled, approved →
//! cancelled. Every other transition is a validation error. Guards run
//! strictly before any mutation, and the balance mutation belonging to a
//! transition is returned together with the request so the caller persists
//! both in one transaction.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use uuid::Uuid;

use crate::calculation::{count_leave_days, HalfDayOverride};
use crate::error::{EngineError, EngineResult};
use crate::models::{Actor, Employee, LeaveBalance, LeaveRequest, LeaveStatus, LeaveType};

use super::authorization::AccessPolicy;
use super::leave_ledger::{available_balance, deduct, pending_days, restoration_slices, restore};

/// Everything `apply_leave` needs, loaded by the caller.
#[derive(Debug)]
pub struct ApplyLeaveInput<'a> {
    /// The requesting employee.
    pub employee: &'a Employee,
    /// The requested leave type.
    pub leave_type: &'a LeaveType,
    /// Today, for the notice-period guard.
    pub today: NaiveDate,
    /// First day of leave.
    pub from_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub to_date: NaiveDate,
    /// Per-date half-day elections.
    pub half_day_overrides: &'a HashMap<NaiveDate, HalfDayOverride>,
    /// The employee's justification.
    pub reason: &'a str,
    /// The employee's weekly off days.
    pub weekly_offs: &'a HashSet<Weekday>,
    /// Applicable non-optional holiday dates within the range.
    pub holidays: &'a BTreeSet<NaiveDate>,
    /// Whether the sandwich rule is in force.
    pub sandwich: bool,
    /// All existing requests of the employee, any leave type.
    pub existing_requests: &'a [LeaveRequest],
    /// The balance row for (employee, type, from_date's year), if any.
    pub balance: Option<&'a LeaveBalance>,
}

/// A request transition together with the balance mutation it carries.
#[derive(Debug, Clone)]
pub struct LeaveDecision {
    /// The created or transitioned request.
    pub request: LeaveRequest,
    /// The mutated balance, when the transition touched one.
    pub balance: Option<LeaveBalance>,
}

/// A cancellation together with the per-year balance restorations.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    /// The cancelled request.
    pub request: LeaveRequest,
    /// The balance rows after restoration, unchanged for a pending cancel.
    pub balances: Vec<LeaveBalance>,
}

/// Creates a leave request after running every application guard.
///
/// Guards, in order: leave type active, gender applicability, minimum
/// advance notice, non-empty day count, maximum consecutive days, no date
/// overlap with any pending or approved request of the employee (any leave
/// type), sufficient available balance.
///
/// When the leave type does not require approval the request is approved
/// immediately and the balance deducted eagerly; otherwise it is pending
/// and no balance is touched.
pub fn apply_leave(input: ApplyLeaveInput<'_>) -> EngineResult<LeaveDecision> {
    let leave_type = input.leave_type;

    if !leave_type.active {
        return Err(EngineError::validation(format!(
            "leave type '{}' is not active",
            leave_type.code
        )));
    }

    if let Some(required) = leave_type.applicable_gender {
        if input.employee.gender != required {
            return Err(EngineError::validation(format!(
                "leave type '{}' is not applicable to this employee",
                leave_type.code
            )));
        }
    }

    let notice_days = (input.from_date - input.today).num_days();
    if notice_days < leave_type.min_days_notice {
        return Err(EngineError::validation(format!(
            "leave type '{}' requires {} days notice",
            leave_type.code, leave_type.min_days_notice
        )));
    }

    let count = count_leave_days(
        input.from_date,
        input.to_date,
        input.half_day_overrides,
        input.weekly_offs,
        input.holidays,
        input.sandwich,
    );
    if count.is_empty() {
        return Err(EngineError::validation(
            "selected range contains no leave days to grant",
        ));
    }

    if let Some(max) = leave_type.max_consecutive_days {
        if count.total_days > max {
            return Err(EngineError::validation(format!(
                "leave type '{}' allows at most {} consecutive days",
                leave_type.code, max
            )));
        }
    }

    let overlapping = input.existing_requests.iter().any(|r| {
        r.employee_id == input.employee.id
            && matches!(r.status, LeaveStatus::Pending | LeaveStatus::Approved)
            && r.overlaps(input.from_date, input.to_date)
    });
    if overlapping {
        return Err(EngineError::validation(
            "dates overlap an existing pending or approved leave request",
        ));
    }

    let pending = pending_days(
        input.existing_requests,
        input.employee.id,
        leave_type.id,
        input.from_date.year(),
    );
    let available = available_balance(input.balance, pending);
    if count.total_days > available {
        return Err(EngineError::validation(format!(
            "insufficient balance: requested {}, available {}",
            count.total_days, available
        )));
    }

    let mut balance_after = None;
    let status = if leave_type.requires_approval {
        LeaveStatus::Pending
    } else {
        // Auto-approval deducts eagerly; the balance guard above implies a
        // balance row exists whenever total_days is positive.
        if let Some(balance) = input.balance {
            let mut balance = balance.clone();
            deduct(&mut balance, count.total_days);
            balance_after = Some(balance);
        }
        LeaveStatus::Approved
    };

    let request = LeaveRequest {
        id: Uuid::new_v4(),
        employee_id: input.employee.id,
        leave_type_id: leave_type.id,
        start_date: input.from_date,
        end_date: input.to_date,
        day_details: count.day_details,
        total_days: count.total_days,
        reason: input.reason.to_string(),
        status,
        reviewed_by: None,
        reviewed_at: None,
        reviewer_remarks: None,
        cancelled_at: None,
    };

    Ok(LeaveDecision {
        request,
        balance: balance_after,
    })
}

/// Approves a pending request, deducting the balance.
///
/// The actor must be the employee's direct manager, L2 manager, or hold a
/// role granting approval.
pub fn approve_leave(
    mut request: LeaveRequest,
    mut balance: LeaveBalance,
    actor: &Actor,
    employee: &Employee,
    policy: &AccessPolicy,
    remarks: Option<String>,
    now: NaiveDateTime,
) -> EngineResult<LeaveDecision> {
    if request.status != LeaveStatus::Pending {
        return Err(EngineError::validation(format!(
            "leave request is already {}",
            request.status
        )));
    }
    if !policy.may_approve_leave(actor, employee) {
        return Err(EngineError::forbidden(
            "actor is not an approver for this employee",
        ));
    }

    deduct(&mut balance, request.total_days);
    request.status = LeaveStatus::Approved;
    request.reviewed_by = Some(actor.id);
    request.reviewed_at = Some(now);
    request.reviewer_remarks = remarks;

    Ok(LeaveDecision {
        request,
        balance: Some(balance),
    })
}

/// Rejects a pending request. No balance effect: pending requests were
/// never deducted.
pub fn reject_leave(
    mut request: LeaveRequest,
    actor: &Actor,
    employee: &Employee,
    policy: &AccessPolicy,
    remarks: Option<String>,
    now: NaiveDateTime,
) -> EngineResult<LeaveRequest> {
    if request.status != LeaveStatus::Pending {
        return Err(EngineError::validation(format!(
            "leave request is already {}",
            request.status
        )));
    }
    if !policy.may_reject_leave(actor, employee) {
        return Err(EngineError::forbidden(
            "actor may not reject requests for this employee",
        ));
    }

    request.status = LeaveStatus::Rejected;
    request.reviewed_by = Some(actor.id);
    request.reviewed_at = Some(now);
    request.reviewer_remarks = remarks;

    Ok(request)
}

/// Cancels a pending or approved request; only the requesting employee may
/// cancel.
///
/// Cancelling from approved restores the balance, split per calendar year
/// for multi-year requests; cancelling from pending restores nothing.
/// `balances` holds the employee's rows for the affected leave type, one
/// per year the request touches.
pub fn cancel_leave(
    mut request: LeaveRequest,
    mut balances: Vec<LeaveBalance>,
    actor: &Actor,
    now: NaiveDateTime,
) -> EngineResult<CancelOutcome> {
    if actor.id != request.employee_id {
        return Err(EngineError::forbidden(
            "only the requesting employee may cancel a leave request",
        ));
    }

    match request.status {
        LeaveStatus::Pending => {}
        LeaveStatus::Approved => {
            for (year, days) in restoration_slices(&request) {
                if let Some(balance) = balances
                    .iter_mut()
                    .find(|b| b.year == year && b.leave_type_id == request.leave_type_id)
                {
                    restore(balance, days);
                }
            }
        }
        other => {
            return Err(EngineError::validation(format!(
                "leave request is already {}",
                other
            )));
        }
    }

    request.status = LeaveStatus::Cancelled;
    request.cancelled_at = Some(now);

    Ok(CancelOutcome { request, balances })
}
