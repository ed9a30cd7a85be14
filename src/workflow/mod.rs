//! Workflow orchestrators for the Time and Leave Accounting Engine.
//!
//! Each workflow operation takes the records the caller loaded, evaluates
//! every guard before mutating anything, and returns the created or mutated
//! records for the caller to persist. A returned error always means no
//! state change.

mod attendance;
mod authorization;
mod comp_off;
mod leave_approval;
mod leave_ledger;
mod regularization;

pub use attendance::{
    clock_in, clock_out, ClockInOutcome, ClockOutOutcome, HALF_DAY_PENALTY_MINUTES,
};
pub use authorization::{AccessPolicy, Capability};
pub use comp_off::{approve_comp_off, request_comp_off, CompOffApproval};
pub use leave_approval::{
    apply_leave, approve_leave, cancel_leave, reject_leave, ApplyLeaveInput, CancelOutcome,
    LeaveDecision,
};
pub use leave_ledger::{
    available_balance, deduct, pending_days, restoration_slices, restore,
};
pub use regularization::{
    approve_regularization, reject_regularization, submit_regularization, RegularizationDecision,
    RegularizationSubmission,
};
