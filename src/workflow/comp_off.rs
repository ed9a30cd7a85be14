//! Compensatory-off grants for work on off days.
//!
//! An employee who worked a weekend or holiday requests a comp-off; an
//! approver grants it, which accrues one day on the comp-off leave balance
//! for the work date's year. Approval is one-way: there is no reject or
//! revoke transition, an unwanted request is simply never granted.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Actor, CompOffGrant, Employee, LeaveBalance};

use super::authorization::AccessPolicy;

/// An approved grant together with the credited balance row.
#[derive(Debug, Clone)]
pub struct CompOffApproval {
    /// The grant, now carrying the approver.
    pub grant: CompOffGrant,
    /// The comp-off balance for the work date's year, accrued by one day.
    pub balance: LeaveBalance,
}

/// Creates a comp-off request for a day of off-day work.
///
/// At most one grant may exist per employee per work date, approved or
/// not; `already_requested` is the caller's lookup for that pair.
pub fn request_comp_off(
    employee_id: Uuid,
    work_date: NaiveDate,
    reason: &str,
    already_requested: bool,
) -> EngineResult<CompOffGrant> {
    if already_requested {
        return Err(EngineError::conflict(
            "a comp-off request already exists for this work date",
        ));
    }
    Ok(CompOffGrant::request(employee_id, work_date, reason))
}

/// Approves a comp-off request, crediting one accrued day.
///
/// `balance` is the comp-off balance row for (employee, work date's year)
/// when one exists; a missing row is opened with a zero opening balance
/// before the credit.
pub fn approve_comp_off(
    mut grant: CompOffGrant,
    balance: Option<LeaveBalance>,
    comp_off_type_id: Uuid,
    actor: &Actor,
    employee: &Employee,
    policy: &AccessPolicy,
) -> EngineResult<CompOffApproval> {
    if grant.granted_by.is_some() {
        return Err(EngineError::validation(
            "comp-off request is already granted",
        ));
    }
    if !policy.may_approve_comp_off(actor, employee) {
        return Err(EngineError::forbidden(
            "actor may not grant comp-off for this employee",
        ));
    }

    let mut balance = balance.unwrap_or_else(|| {
        LeaveBalance::open(
            grant.employee_id,
            comp_off_type_id,
            grant.work_date.year(),
            Decimal::ZERO,
        )
    });
    balance.accrued += Decimal::ONE;
    grant.granted_by = Some(actor.id);

    Ok(CompOffApproval { grant, balance })
}
