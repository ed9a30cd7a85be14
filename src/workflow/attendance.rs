//! Clock-in/clock-out state transitions.
//!
//! Per employee and day the states are NoActivity → OpenClockIn → ClosedDay;
//! a closed day is reopened only by another clock-in. The correctness
//! invariant of the whole module is "at most one open clock entry per
//! employee", enforced here and backed by the persistence layer's
//! per-employee-day serialization.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::calculation::{classify_arrival, compute_hours};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, ClockEntry, ClockSource, ShiftPolicy};

/// Minutes after shift start beyond which the day is immediately penalized
/// to half day, independent of the eventual hours calculation.
pub const HALF_DAY_PENALTY_MINUTES: i64 = 120;

/// The records produced by a successful clock-in.
#[derive(Debug, Clone)]
pub struct ClockInOutcome {
    /// The day's attendance record, created lazily on the first clock-in.
    pub record: AttendanceRecord,
    /// The newly opened clock entry.
    pub entry: ClockEntry,
    /// True when this clock-in created the day's record.
    pub record_created: bool,
}

/// The records produced by a successful clock-out.
#[derive(Debug, Clone)]
pub struct ClockOutOutcome {
    /// The day's attendance record with recomputed hours and status.
    pub record: AttendanceRecord,
    /// The closed clock entry.
    pub entry: ClockEntry,
}

/// Registers a clock-in for the day.
///
/// Fails with [`EngineError::Conflict`] when an open clock entry already
/// exists; an idempotent retry of clock-in is rejected by design to prevent
/// double counting.
///
/// On the record-creating clock-in of the day the arrival is classified
/// against the resolved shift, and an arrival more than
/// [`HALF_DAY_PENALTY_MINUTES`] after shift start downgrades the status to
/// half day immediately. Subsequent same-day clock-ins (after a lunch-break
/// clock-out, for example) do not re-classify.
pub fn clock_in(
    employee_id: Uuid,
    now: NaiveDateTime,
    source: ClockSource,
    shift: Option<&ShiftPolicy>,
    record: Option<AttendanceRecord>,
    open_entry: Option<&ClockEntry>,
) -> EngineResult<ClockInOutcome> {
    if open_entry.is_some() {
        return Err(EngineError::conflict(
            "an open clock entry already exists; clock out first",
        ));
    }

    let (record, record_created) = match record {
        Some(record) => (record, false),
        None => {
            let arrival = classify_arrival(now, shift);
            let mut status = AttendanceStatus::Present;
            if let Some(shift) = shift {
                let shift_start = now.date().and_time(shift.start_time);
                if (now - shift_start).num_seconds() > HALF_DAY_PENALTY_MINUTES * 60 {
                    status = AttendanceStatus::HalfDay;
                }
            }
            let record = AttendanceRecord {
                id: Uuid::new_v4(),
                employee_id,
                date: now.date(),
                status,
                arrival_status: Some(arrival),
                shift_policy_id: shift.map(|s| s.id),
                first_clock_in: Some(now),
                last_clock_out: None,
                total_work_minutes: 0,
                effective_work_minutes: 0,
                overtime_minutes: 0,
                is_regularized: false,
                source,
            };
            (record, true)
        }
    };

    let entry = ClockEntry {
        id: Uuid::new_v4(),
        employee_id,
        attendance_record_id: record.id,
        clock_in: now,
        clock_out: None,
        duration_minutes: 0,
        source,
    };

    Ok(ClockInOutcome {
        record,
        entry,
        record_created,
    })
}

/// Registers a clock-out, closing the open entry and recomputing the day.
///
/// Fails with [`EngineError::Validation`] when no open entry exists. Hours
/// span first clock-in to `now`. The computed status is applied unless the
/// record is already half day and the computed status is not absent: the
/// half-day penalty from arrival is never upgraded by hours.
pub fn clock_out(
    now: NaiveDateTime,
    mut record: AttendanceRecord,
    open_entry: Option<ClockEntry>,
    shift: Option<&ShiftPolicy>,
) -> EngineResult<ClockOutOutcome> {
    let Some(mut entry) = open_entry else {
        return Err(EngineError::validation(
            "no open clock entry exists; clock in first",
        ));
    };

    entry.clock_out = Some(now);
    entry.duration_minutes = (now - entry.clock_in).num_minutes().max(0);

    record.last_clock_out = Some(now);
    let first_in = record.first_clock_in.unwrap_or(entry.clock_in);
    let hours = compute_hours(first_in, now, shift);
    record.total_work_minutes = hours.total_minutes;
    record.effective_work_minutes = hours.effective_minutes;
    record.overtime_minutes = hours.overtime_minutes;

    let penalized = record.status == AttendanceStatus::HalfDay;
    if !(penalized && hours.status != AttendanceStatus::Absent) {
        record.status = hours.status;
    }

    Ok(ClockOutOutcome { record, entry })
}
