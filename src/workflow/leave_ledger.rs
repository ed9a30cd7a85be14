//! Leave balance ledger arithmetic.
//!
//! The available balance is always derived as current balance minus the
//! days tied up in pending requests; nothing is cached. Deduction happens
//! on approval (or eagerly at creation for auto-approved types) and
//! restoration on cancellation of a previously-approved request. Pending
//! requests were never deducted, so cancelling one mutates nothing.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{LeaveBalance, LeaveRequest, LeaveStatus};

/// Sums `total_days` across the employee's *pending* requests of one leave
/// type whose start date falls in `year`.
pub fn pending_days(
    requests: &[LeaveRequest],
    employee_id: Uuid,
    leave_type_id: Uuid,
    year: i32,
) -> Decimal {
    requests
        .iter()
        .filter(|r| {
            r.employee_id == employee_id
                && r.leave_type_id == leave_type_id
                && r.status == LeaveStatus::Pending
                && r.start_date.year() == year
        })
        .map(|r| r.total_days)
        .sum()
}

/// The balance actually spendable right now: current balance minus pending
/// days. A missing balance row counts as zero.
pub fn available_balance(balance: Option<&LeaveBalance>, pending: Decimal) -> Decimal {
    balance.map_or(Decimal::ZERO, LeaveBalance::current_balance) - pending
}

/// Consumes days from a balance on approval.
pub fn deduct(balance: &mut LeaveBalance, days: Decimal) {
    balance.used += days;
}

/// Returns days to a balance on cancellation; `used` never goes negative.
pub fn restore(balance: &mut LeaveBalance, days: Decimal) {
    balance.used = (balance.used - days).max(Decimal::ZERO);
}

/// Splits a cancelled request's restoration across the calendar years it
/// spans.
///
/// A single-year request restores its exact `total_days`. A multi-year
/// request approximates each year's share by counting Mon-Fri weekdays in
/// that year's date slice, matching the upstream product behavior even
/// though it ignores holidays, weekly-off variation, and the sandwich flag.
pub fn restoration_slices(request: &LeaveRequest) -> Vec<(i32, Decimal)> {
    let start_year = request.start_date.year();
    let end_year = request.end_date.year();

    if start_year == end_year {
        return vec![(start_year, request.total_days)];
    }

    (start_year..=end_year)
        .map(|year| {
            let weekdays = request
                .start_date
                .iter_days()
                .take_while(|d| *d <= request.end_date)
                .filter(|d| d.year() == year && is_weekday(*d))
                .count();
            (year, Decimal::from(weekdays))
        })
        .collect()
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
