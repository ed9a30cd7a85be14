//! Shift assignment resolution.
//!
//! Given an employee's assignments and a target date, selects the assignment
//! whose effective range covers the date. Overlapping candidates resolve
//! last-writer-wins: the greatest `effective_from` is picked. Absence of an
//! assignment is a valid, common state; downstream components apply the
//! documented defaults (8-hour full day, 4-hour half day, Sat/Sun off).

use chrono::NaiveDate;

use crate::models::{ShiftAssignment, ShiftPolicy, WeeklyOffPolicy};

/// The policies in force for one employee on one date.
///
/// Both sides are optional; a missing policy means the documented defaults
/// apply, never an error.
#[derive(Debug, Clone, Default)]
pub struct ResolvedShift {
    /// The applicable shift policy, if any.
    pub shift: Option<ShiftPolicy>,
    /// The applicable weekly-off policy, if any.
    pub weekly_off: Option<WeeklyOffPolicy>,
}

/// Selects the assignment applicable to `date` from an employee's
/// assignments.
///
/// # Arguments
///
/// * `assignments` - The employee's shift assignments, in any order
/// * `date` - The date to resolve
///
/// # Returns
///
/// The covering assignment with the greatest `effective_from`, or `None`
/// when no assignment covers the date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use uuid::Uuid;
/// use hr_engine::calculation::resolve_assignment;
/// use hr_engine::models::ShiftAssignment;
///
/// let employee_id = Uuid::new_v4();
/// let assignment = ShiftAssignment {
///     id: Uuid::new_v4(),
///     employee_id,
///     shift_policy_id: Uuid::new_v4(),
///     weekly_off_policy_id: Uuid::new_v4(),
///     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     effective_to: None,
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
/// assert!(resolve_assignment(&[assignment], date).is_some());
/// ```
pub fn resolve_assignment(
    assignments: &[ShiftAssignment],
    date: NaiveDate,
) -> Option<&ShiftAssignment> {
    assignments
        .iter()
        .filter(|a| a.covers(date))
        .max_by_key(|a| a.effective_from)
}
