//! Attendance regularization: employee-initiated correction of a past
//! day's attendance status, gated on reviewer approval.
//!
//! Approval overwrites the record's status with the requested one and
//! marks the record regularized. Rejection records remarks and leaves the
//! attendance record alone.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Actor, AttendanceRecord, AttendanceRegularization, AttendanceStatus, ClockSource, Employee,
    RegularizationStatus,
};

use super::authorization::AccessPolicy;

/// A submitted regularization together with the attendance record it
/// targets.
#[derive(Debug, Clone)]
pub struct RegularizationSubmission {
    /// The pending regularization.
    pub regularization: AttendanceRegularization,
    /// The targeted record, created as absent when none existed.
    pub record: AttendanceRecord,
    /// Whether `record` was created by this submission.
    pub record_created: bool,
}

/// A reviewed regularization and the record as it stands after review.
#[derive(Debug, Clone)]
pub struct RegularizationDecision {
    /// The reviewed regularization.
    pub regularization: AttendanceRegularization,
    /// The attendance record, rewritten on approval.
    pub record: AttendanceRecord,
}

/// Submits a regularization for a past date.
///
/// The date must be strictly before `today`; the current day is still
/// accumulating clock events. At most one pending regularization may exist
/// per employee per date. When the date has no attendance record yet, an
/// absent record is created so the correction has something to target.
pub fn submit_regularization(
    employee_id: Uuid,
    date: NaiveDate,
    today: NaiveDate,
    requested_status: AttendanceStatus,
    reason: &str,
    record: Option<AttendanceRecord>,
    has_pending: bool,
) -> EngineResult<RegularizationSubmission> {
    if date >= today {
        return Err(EngineError::validation(
            "only past dates can be regularized",
        ));
    }
    if has_pending {
        return Err(EngineError::conflict(
            "a pending regularization already exists for this date",
        ));
    }

    let record_created = record.is_none();
    let record = record.unwrap_or_else(|| AttendanceRecord {
        id: Uuid::new_v4(),
        employee_id,
        date,
        status: AttendanceStatus::Absent,
        arrival_status: None,
        shift_policy_id: None,
        first_clock_in: None,
        last_clock_out: None,
        total_work_minutes: 0,
        effective_work_minutes: 0,
        overtime_minutes: 0,
        is_regularized: false,
        source: ClockSource::Manual,
    });

    let regularization = AttendanceRegularization {
        id: Uuid::new_v4(),
        attendance_record_id: record.id,
        employee_id,
        requested_status,
        reason: reason.to_string(),
        status: RegularizationStatus::Pending,
        reviewed_by: None,
        reviewed_at: None,
        reviewer_remarks: None,
    };

    Ok(RegularizationSubmission {
        regularization,
        record,
        record_created,
    })
}

/// Approves a pending regularization, overwriting the record's status.
pub fn approve_regularization(
    mut regularization: AttendanceRegularization,
    mut record: AttendanceRecord,
    actor: &Actor,
    employee: &Employee,
    policy: &AccessPolicy,
    remarks: Option<String>,
    now: NaiveDateTime,
) -> EngineResult<RegularizationDecision> {
    if regularization.status != RegularizationStatus::Pending {
        return Err(EngineError::validation(format!(
            "regularization is already {}",
            regularization.status
        )));
    }
    if !policy.may_review_regularization(actor, employee) {
        return Err(EngineError::forbidden(
            "actor may not review regularizations for this employee",
        ));
    }

    record.status = regularization.requested_status;
    record.is_regularized = true;

    regularization.status = RegularizationStatus::Approved;
    regularization.reviewed_by = Some(actor.id);
    regularization.reviewed_at = Some(now);
    regularization.reviewer_remarks = remarks;

    Ok(RegularizationDecision {
        regularization,
        record,
    })
}

/// Rejects a pending regularization; the attendance record is untouched.
pub fn reject_regularization(
    mut regularization: AttendanceRegularization,
    record: AttendanceRecord,
    actor: &Actor,
    employee: &Employee,
    policy: &AccessPolicy,
    remarks: Option<String>,
    now: NaiveDateTime,
) -> EngineResult<RegularizationDecision> {
    if regularization.status != RegularizationStatus::Pending {
        return Err(EngineError::validation(format!(
            "regularization is already {}",
            regularization.status
        )));
    }
    if !policy.may_review_regularization(actor, employee) {
        return Err(EngineError::forbidden(
            "actor may not review regularizations for this employee",
        ));
    }

    regularization.status = RegularizationStatus::Rejected;
    regularization.reviewed_by = Some(actor.id);
    regularization.reviewed_at = Some(now);
    regularization.reviewer_remarks = remarks;

    Ok(RegularizationDecision {
        regularization,
        record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Role};

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn at_noon(s: &str) -> NaiveDateTime {
        make_date(s).and_hms_opt(12, 0, 0).unwrap()
    }

    fn employee() -> Employee {
        Employee {
            id: Uuid::new_v4(),
            gender: Gender::Male,
            reporting_manager_id: Some(Uuid::new_v4()),
            l2_manager_id: None,
            location: None,
        }
    }

    fn manager_of(employee: &Employee) -> Actor {
        Actor {
            id: employee.reporting_manager_id.unwrap(),
            roles: vec![Role::Manager],
        }
    }

    fn submit(employee: &Employee) -> RegularizationSubmission {
        submit_regularization(
            employee.id,
            make_date("2026-03-02"),
            make_date("2026-03-04"),
            AttendanceStatus::Present,
            "forgot to clock in",
            None,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_submit_creates_absent_record_when_missing() {
        let employee = employee();
        let submission = submit(&employee);

        assert!(submission.record_created);
        assert_eq!(submission.record.status, AttendanceStatus::Absent);
        assert_eq!(
            submission.regularization.attendance_record_id,
            submission.record.id
        );
        assert_eq!(
            submission.regularization.status,
            RegularizationStatus::Pending
        );
    }

    #[test]
    fn test_submit_reuses_existing_record() {
        let employee = employee();
        let existing = AttendanceRecord {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            date: make_date("2026-03-02"),
            status: AttendanceStatus::HalfDay,
            arrival_status: None,
            shift_policy_id: None,
            first_clock_in: None,
            last_clock_out: None,
            total_work_minutes: 250,
            effective_work_minutes: 190,
            overtime_minutes: 0,
            is_regularized: false,
            source: ClockSource::Web,
        };
        let existing_id = existing.id;

        let submission = submit_regularization(
            employee.id,
            make_date("2026-03-02"),
            make_date("2026-03-04"),
            AttendanceStatus::Present,
            "left early for a site visit",
            Some(existing),
            false,
        )
        .unwrap();

        assert!(!submission.record_created);
        assert_eq!(submission.record.id, existing_id);
        assert_eq!(submission.record.status, AttendanceStatus::HalfDay);
    }

    #[test]
    fn test_submit_rejects_today_and_future() {
        let employee = employee();
        for date in ["2026-03-04", "2026-03-05"] {
            let result = submit_regularization(
                employee.id,
                make_date(date),
                make_date("2026-03-04"),
                AttendanceStatus::Present,
                "x",
                None,
                false,
            );
            assert!(matches!(result, Err(EngineError::Validation { .. })));
        }
    }

    #[test]
    fn test_submit_conflicts_on_existing_pending() {
        let employee = employee();
        let result = submit_regularization(
            employee.id,
            make_date("2026-03-02"),
            make_date("2026-03-04"),
            AttendanceStatus::Present,
            "x",
            None,
            true,
        );
        assert!(matches!(result, Err(EngineError::Conflict { .. })));
    }

    #[test]
    fn test_approve_rewrites_record_status() {
        let employee = employee();
        let submission = submit(&employee);

        let decision = approve_regularization(
            submission.regularization,
            submission.record,
            &manager_of(&employee),
            &employee,
            &AccessPolicy::standard(),
            Some("confirmed with team".to_string()),
            at_noon("2026-03-04"),
        )
        .unwrap();

        assert_eq!(decision.record.status, AttendanceStatus::Present);
        assert!(decision.record.is_regularized);
        assert_eq!(
            decision.regularization.status,
            RegularizationStatus::Approved
        );
        assert!(decision.regularization.reviewed_at.is_some());
    }

    #[test]
    fn test_reject_leaves_record_untouched() {
        let employee = employee();
        let submission = submit(&employee);

        let decision = reject_regularization(
            submission.regularization,
            submission.record,
            &manager_of(&employee),
            &employee,
            &AccessPolicy::standard(),
            Some("no evidence of work".to_string()),
            at_noon("2026-03-04"),
        )
        .unwrap();

        assert_eq!(decision.record.status, AttendanceStatus::Absent);
        assert!(!decision.record.is_regularized);
        assert_eq!(
            decision.regularization.status,
            RegularizationStatus::Rejected
        );
    }

    #[test]
    fn test_review_by_unrelated_actor_is_forbidden() {
        let employee = employee();
        let submission = submit(&employee);
        let stranger = Actor {
            id: Uuid::new_v4(),
            roles: vec![Role::Employee],
        };

        let result = approve_regularization(
            submission.regularization,
            submission.record,
            &stranger,
            &employee,
            &AccessPolicy::standard(),
            None,
            at_noon("2026-03-04"),
        );
        assert!(matches!(result, Err(EngineError::Forbidden { .. })));
    }

    #[test]
    fn test_double_review_is_validation_error() {
        let employee = employee();
        let submission = submit(&employee);
        let manager = manager_of(&employee);
        let policy = AccessPolicy::standard();

        let decision = approve_regularization(
            submission.regularization,
            submission.record,
            &manager,
            &employee,
            &policy,
            None,
            at_noon("2026-03-04"),
        )
        .unwrap();

        let result = reject_regularization(
            decision.regularization,
            decision.record,
            &manager,
            &employee,
            &policy,
            None,
            at_noon("2026-03-05"),
        );
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }
}
