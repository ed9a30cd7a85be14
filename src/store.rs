//! In-memory persistence and service orchestration.
//!
//! [`MemStore`] owns every entity collection, loads the snapshots each
//! workflow needs, invokes the workflow, and commits the outcome. The
//! workflows themselves never see the store; they operate on records
//! passed in and return the mutated ones.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::calculation::{holidays_in_range, resolve_assignment, HalfDayOverride, ResolvedShift};
use crate::config::HrConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    default_weekly_offs, Actor, AttendanceRecord, AttendanceRegularization, AttendanceStatus,
    ClockEntry, ClockSource, CompOffGrant, Employee, LeaveBalance, LeaveRequest, Role,
    ShiftAssignment,
};
use crate::workflow::{
    apply_leave, approve_comp_off, approve_leave, approve_regularization, cancel_leave, clock_in,
    clock_out, reject_leave, reject_regularization, request_comp_off, submit_regularization,
    ApplyLeaveInput, CancelOutcome, ClockInOutcome, ClockOutOutcome, CompOffApproval,
    LeaveDecision, RegularizationDecision, RegularizationSubmission,
};

/// A derived balance summary for one (employee, leave type, year).
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSummary {
    /// The leave type code.
    pub leave_type: String,
    /// The balance year.
    pub year: i32,
    /// Stored current balance: opening + accrued + carry_forwarded +
    /// adjusted - used.
    pub current: Decimal,
    /// Days held by pending requests of the same type and year.
    pub pending: Decimal,
    /// current - pending; what a new request can draw on.
    pub available: Decimal,
}

/// In-memory entity store and service layer.
pub struct MemStore {
    config: HrConfig,
    employees: HashMap<Uuid, Employee>,
    roles: HashMap<Uuid, Vec<Role>>,
    assignments: Vec<ShiftAssignment>,
    records: Vec<AttendanceRecord>,
    entries: Vec<ClockEntry>,
    leave_requests: Vec<LeaveRequest>,
    balances: Vec<LeaveBalance>,
    regularizations: Vec<AttendanceRegularization>,
    comp_offs: Vec<CompOffGrant>,
}

impl MemStore {
    /// Creates an empty store over the given configuration.
    pub fn new(config: HrConfig) -> Self {
        Self {
            config,
            employees: HashMap::new(),
            roles: HashMap::new(),
            assignments: Vec::new(),
            records: Vec::new(),
            entries: Vec::new(),
            leave_requests: Vec::new(),
            balances: Vec::new(),
            regularizations: Vec::new(),
            comp_offs: Vec::new(),
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    // ---- seeding -------------------------------------------------------

    /// Registers an employee with their roles and seeds one balance row
    /// per configured leave type for the given year.
    pub fn add_employee(&mut self, employee: Employee, roles: Vec<Role>, year: i32) {
        for leave_type in self.config.leave_types() {
            self.balances.push(LeaveBalance::open(
                employee.id,
                leave_type.id,
                year,
                leave_type.default_balance,
            ));
        }
        self.roles.insert(employee.id, roles);
        self.employees.insert(employee.id, employee);
    }

    /// Assigns a shift and weekly-off policy to an employee, effective
    /// from the given date.
    pub fn assign_shift(
        &mut self,
        employee_id: Uuid,
        shift_name: &str,
        weekly_off_name: &str,
        effective_from: NaiveDate,
    ) -> EngineResult<()> {
        self.employee(employee_id)?;
        let shift = self.config.shift_policy(shift_name)?;
        let weekly_off = self.config.weekly_off_policy(weekly_off_name)?;
        self.assignments.push(ShiftAssignment {
            id: Uuid::new_v4(),
            employee_id,
            shift_policy_id: shift.id,
            weekly_off_policy_id: weekly_off.id,
            effective_from,
            effective_to: None,
        });
        Ok(())
    }

    // ---- lookups -------------------------------------------------------

    fn employee(&self, id: Uuid) -> EngineResult<&Employee> {
        self.employees
            .get(&id)
            .ok_or(EngineError::EmployeeNotFound { id })
    }

    fn actor(&self, id: Uuid) -> Actor {
        Actor {
            id,
            roles: self.roles.get(&id).cloned().unwrap_or_default(),
        }
    }

    /// Resolves the employee's shift and weekly-off policies for a date.
    fn resolved_shift(&self, employee_id: Uuid, date: NaiveDate) -> ResolvedShift {
        let assignments: Vec<ShiftAssignment> = self
            .assignments
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect();

        match resolve_assignment(&assignments, date) {
            Some(assignment) => ResolvedShift {
                shift: self
                    .config
                    .shift_policies()
                    .iter()
                    .find(|sp| sp.id == assignment.shift_policy_id)
                    .cloned(),
                weekly_off: self
                    .config
                    .weekly_off_policies()
                    .iter()
                    .find(|wo| wo.id == assignment.weekly_off_policy_id)
                    .cloned(),
            },
            None => ResolvedShift::default(),
        }
    }

    fn weekly_offs(&self, employee_id: Uuid, date: NaiveDate) -> HashSet<Weekday> {
        self.resolved_shift(employee_id, date)
            .weekly_off
            .map(|wo| wo.off_days())
            .unwrap_or_else(default_weekly_offs)
    }

    fn holidays(
        &self,
        employee: &Employee,
        from: NaiveDate,
        to: NaiveDate,
    ) -> BTreeSet<NaiveDate> {
        holidays_in_range(
            self.config.calendars(),
            employee.location.as_deref(),
            from,
            to,
        )
    }

    fn record_for(&self, employee_id: Uuid, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == date)
    }

    fn open_entry_for(&self, employee_id: Uuid) -> Option<&ClockEntry> {
        self.entries
            .iter()
            .find(|e| e.employee_id == employee_id && e.is_open())
    }

    fn balance_for(&self, employee_id: Uuid, leave_type_id: Uuid, year: i32) -> Option<&LeaveBalance> {
        self.balances
            .iter()
            .find(|b| b.employee_id == employee_id && b.leave_type_id == leave_type_id && b.year == year)
    }

    // ---- commit helpers ------------------------------------------------

    fn commit_record(&mut self, record: AttendanceRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    fn commit_entry(&mut self, entry: ClockEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    fn commit_balance(&mut self, balance: LeaveBalance) {
        match self.balances.iter_mut().find(|b| b.id == balance.id) {
            Some(existing) => *existing = balance,
            None => self.balances.push(balance),
        }
    }

    fn commit_request(&mut self, request: LeaveRequest) {
        match self.leave_requests.iter_mut().find(|r| r.id == request.id) {
            Some(existing) => *existing = request,
            None => self.leave_requests.push(request),
        }
    }

    // ---- attendance ----------------------------------------------------

    /// Registers a clock-in for the employee at `now`.
    pub fn clock_in(
        &mut self,
        employee_id: Uuid,
        now: NaiveDateTime,
        source: ClockSource,
    ) -> EngineResult<ClockInOutcome> {
        self.employee(employee_id)?;
        let shift = self.resolved_shift(employee_id, now.date()).shift;
        let record = self.record_for(employee_id, now.date()).cloned();
        let open_entry = self.open_entry_for(employee_id).cloned();

        let outcome = clock_in(
            employee_id,
            now,
            source,
            shift.as_ref(),
            record,
            open_entry.as_ref(),
        )?;

        self.commit_record(outcome.record.clone());
        self.commit_entry(outcome.entry.clone());
        info!(
            employee_id = %employee_id,
            date = %now.date(),
            record_created = outcome.record_created,
            "clock-in registered"
        );
        Ok(outcome)
    }

    /// Registers a clock-out for the employee at `now`, closing the open
    /// entry and recomputing the day's hours.
    pub fn clock_out(
        &mut self,
        employee_id: Uuid,
        now: NaiveDateTime,
    ) -> EngineResult<ClockOutOutcome> {
        self.employee(employee_id)?;
        let open_entry = self.open_entry_for(employee_id).cloned();
        let record = open_entry
            .as_ref()
            .and_then(|e| self.records.iter().find(|r| r.id == e.attendance_record_id))
            .cloned()
            .ok_or_else(|| {
                EngineError::validation("no open clock entry exists; clock in first")
            })?;
        let shift = self.resolved_shift(employee_id, record.date).shift;

        let outcome = clock_out(now, record, open_entry, shift.as_ref())?;

        self.commit_record(outcome.record.clone());
        self.commit_entry(outcome.entry.clone());
        info!(
            employee_id = %employee_id,
            date = %outcome.record.date,
            status = %outcome.record.status,
            effective_minutes = outcome.record.effective_work_minutes,
            "clock-out registered"
        );
        Ok(outcome)
    }

    // ---- leave ---------------------------------------------------------

    /// Applies for leave on behalf of the employee.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_leave(
        &mut self,
        employee_id: Uuid,
        leave_type_code: &str,
        today: NaiveDate,
        from_date: NaiveDate,
        to_date: NaiveDate,
        half_day_overrides: &HashMap<NaiveDate, HalfDayOverride>,
        reason: &str,
    ) -> EngineResult<LeaveRequest> {
        let employee = self.employee(employee_id)?.clone();
        let leave_type = self.config.leave_type(leave_type_code)?.clone();
        let weekly_offs = self.weekly_offs(employee_id, from_date);
        let holidays = self.holidays(&employee, from_date, to_date);
        let balance = self.balance_for(employee_id, leave_type.id, from_date.year());
        let existing: Vec<LeaveRequest> = self
            .leave_requests
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();

        let decision = apply_leave(ApplyLeaveInput {
            employee: &employee,
            leave_type: &leave_type,
            today,
            from_date,
            to_date,
            half_day_overrides,
            reason,
            weekly_offs: &weekly_offs,
            holidays: &holidays,
            sandwich: self.config.policy().sandwich_rule,
            existing_requests: &existing,
            balance,
        })?;

        if let Some(balance) = decision.balance {
            self.commit_balance(balance);
        }
        self.commit_request(decision.request.clone());
        info!(
            employee_id = %employee_id,
            leave_type = %leave_type.code,
            total_days = %decision.request.total_days,
            status = %decision.request.status,
            "leave request created"
        );
        Ok(decision.request)
    }

    fn leave_request(&self, id: Uuid) -> EngineResult<&LeaveRequest> {
        self.leave_requests
            .iter()
            .find(|r| r.id == id)
            .ok_or(EngineError::RequestNotFound { id })
    }

    /// Approves a pending leave request.
    pub fn approve_leave(
        &mut self,
        request_id: Uuid,
        actor_id: Uuid,
        remarks: Option<String>,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveDecision> {
        let request = self.leave_request(request_id)?.clone();
        let employee = self.employee(request.employee_id)?.clone();
        let balance = self
            .balance_for(request.employee_id, request.leave_type_id, request.start_date.year())
            .cloned()
            .ok_or_else(|| {
                EngineError::validation("no leave balance exists for the request's year")
            })?;
        let actor = self.actor(actor_id);

        let decision = approve_leave(
            request,
            balance,
            &actor,
            &employee,
            self.config.access_policy(),
            remarks,
            now,
        )?;

        if let Some(balance) = decision.balance.clone() {
            self.commit_balance(balance);
        }
        self.commit_request(decision.request.clone());
        info!(request_id = %request_id, approver = %actor_id, "leave request approved");
        Ok(decision)
    }

    /// Rejects a pending leave request.
    pub fn reject_leave(
        &mut self,
        request_id: Uuid,
        actor_id: Uuid,
        remarks: Option<String>,
        now: NaiveDateTime,
    ) -> EngineResult<LeaveRequest> {
        let request = self.leave_request(request_id)?.clone();
        let employee = self.employee(request.employee_id)?.clone();
        let actor = self.actor(actor_id);

        let rejected = reject_leave(
            request,
            &actor,
            &employee,
            self.config.access_policy(),
            remarks,
            now,
        )?;

        self.commit_request(rejected.clone());
        info!(request_id = %request_id, reviewer = %actor_id, "leave request rejected");
        Ok(rejected)
    }

    /// Cancels a pending or approved leave request on behalf of its owner.
    pub fn cancel_leave(
        &mut self,
        request_id: Uuid,
        actor_id: Uuid,
        now: NaiveDateTime,
    ) -> EngineResult<CancelOutcome> {
        let request = self.leave_request(request_id)?.clone();
        let years: BTreeSet<i32> = (request.start_date.year()..=request.end_date.year()).collect();
        let balances: Vec<LeaveBalance> = self
            .balances
            .iter()
            .filter(|b| {
                b.employee_id == request.employee_id
                    && b.leave_type_id == request.leave_type_id
                    && years.contains(&b.year)
            })
            .cloned()
            .collect();
        let actor = self.actor(actor_id);

        let outcome = cancel_leave(request, balances, &actor, now)?;

        for balance in &outcome.balances {
            self.commit_balance(balance.clone());
        }
        self.commit_request(outcome.request.clone());
        info!(request_id = %request_id, "leave request cancelled");
        Ok(outcome)
    }

    /// The employee's balance summary for a leave type and year.
    pub fn leave_balance(
        &self,
        employee_id: Uuid,
        leave_type_code: &str,
        year: i32,
    ) -> EngineResult<BalanceSummary> {
        self.employee(employee_id)?;
        let leave_type = self.config.leave_type(leave_type_code)?;
        let balance = self.balance_for(employee_id, leave_type.id, year);
        let pending = crate::workflow::pending_days(
            &self.leave_requests,
            employee_id,
            leave_type.id,
            year,
        );
        let current = balance.map(LeaveBalance::current_balance).unwrap_or_default();

        Ok(BalanceSummary {
            leave_type: leave_type.code.clone(),
            year,
            current,
            pending,
            available: current - pending,
        })
    }

    // ---- regularization ------------------------------------------------

    /// Submits an attendance regularization for a past date.
    pub fn submit_regularization(
        &mut self,
        employee_id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
        requested_status: AttendanceStatus,
        reason: &str,
    ) -> EngineResult<RegularizationSubmission> {
        self.employee(employee_id)?;
        let record = self.record_for(employee_id, date).cloned();
        let has_pending = self.regularizations.iter().any(|r| {
            r.employee_id == employee_id
                && r.status == crate::models::RegularizationStatus::Pending
                && self
                    .records
                    .iter()
                    .any(|rec| rec.id == r.attendance_record_id && rec.date == date)
        });

        let submission = submit_regularization(
            employee_id,
            date,
            today,
            requested_status,
            reason,
            record,
            has_pending,
        )?;

        self.commit_record(submission.record.clone());
        self.regularizations.push(submission.regularization.clone());
        info!(
            employee_id = %employee_id,
            date = %date,
            requested_status = %requested_status,
            "regularization submitted"
        );
        Ok(submission)
    }

    fn regularization(&self, id: Uuid) -> EngineResult<&AttendanceRegularization> {
        self.regularizations
            .iter()
            .find(|r| r.id == id)
            .ok_or(EngineError::RegularizationNotFound { id })
    }

    fn load_regularization_pair(
        &self,
        id: Uuid,
    ) -> EngineResult<(AttendanceRegularization, AttendanceRecord, Employee)> {
        let regularization = self.regularization(id)?.clone();
        let record = self
            .records
            .iter()
            .find(|r| r.id == regularization.attendance_record_id)
            .cloned()
            .ok_or_else(|| {
                EngineError::validation("regularization targets a missing attendance record")
            })?;
        let employee = self.employee(regularization.employee_id)?.clone();
        Ok((regularization, record, employee))
    }

    /// Approves a pending regularization, rewriting the attendance record.
    pub fn approve_regularization(
        &mut self,
        id: Uuid,
        actor_id: Uuid,
        remarks: Option<String>,
        now: NaiveDateTime,
    ) -> EngineResult<RegularizationDecision> {
        let (regularization, record, employee) = self.load_regularization_pair(id)?;
        let actor = self.actor(actor_id);

        let decision = approve_regularization(
            regularization,
            record,
            &actor,
            &employee,
            self.config.access_policy(),
            remarks,
            now,
        )?;

        self.commit_record(decision.record.clone());
        self.commit_regularization(decision.regularization.clone());
        info!(regularization_id = %id, reviewer = %actor_id, "regularization approved");
        Ok(decision)
    }

    /// Rejects a pending regularization.
    pub fn reject_regularization(
        &mut self,
        id: Uuid,
        actor_id: Uuid,
        remarks: Option<String>,
        now: NaiveDateTime,
    ) -> EngineResult<RegularizationDecision> {
        let (regularization, record, employee) = self.load_regularization_pair(id)?;
        let actor = self.actor(actor_id);

        let decision = reject_regularization(
            regularization,
            record,
            &actor,
            &employee,
            self.config.access_policy(),
            remarks,
            now,
        )?;

        self.commit_regularization(decision.regularization.clone());
        info!(regularization_id = %id, reviewer = %actor_id, "regularization rejected");
        Ok(decision)
    }

    fn commit_regularization(&mut self, regularization: AttendanceRegularization) {
        if let Some(existing) = self
            .regularizations
            .iter_mut()
            .find(|r| r.id == regularization.id)
        {
            *existing = regularization;
        } else {
            self.regularizations.push(regularization);
        }
    }

    // ---- comp-off ------------------------------------------------------

    /// Requests a comp-off for work done on an off day.
    pub fn request_comp_off(
        &mut self,
        employee_id: Uuid,
        work_date: NaiveDate,
        reason: &str,
    ) -> EngineResult<CompOffGrant> {
        self.employee(employee_id)?;
        let already_requested = self
            .comp_offs
            .iter()
            .any(|c| c.employee_id == employee_id && c.work_date == work_date);

        let grant = request_comp_off(employee_id, work_date, reason, already_requested)?;

        self.comp_offs.push(grant.clone());
        info!(employee_id = %employee_id, work_date = %work_date, "comp-off requested");
        Ok(grant)
    }

    /// Approves a comp-off request, crediting one accrued day on the
    /// comp-off balance for the work date's year.
    pub fn approve_comp_off(
        &mut self,
        grant_id: Uuid,
        actor_id: Uuid,
    ) -> EngineResult<CompOffApproval> {
        let grant = self
            .comp_offs
            .iter()
            .find(|c| c.id == grant_id)
            .cloned()
            .ok_or(EngineError::CompOffNotFound { id: grant_id })?;
        let employee = self.employee(grant.employee_id)?.clone();
        let comp_off_type = self.config.comp_off_type()?.clone();
        let balance = self
            .balance_for(grant.employee_id, comp_off_type.id, grant.work_date.year())
            .cloned();
        let actor = self.actor(actor_id);

        let approval = approve_comp_off(
            grant,
            balance,
            comp_off_type.id,
            &actor,
            &employee,
            self.config.access_policy(),
        )?;

        self.commit_balance(approval.balance.clone());
        if let Some(existing) = self.comp_offs.iter_mut().find(|c| c.id == grant_id) {
            *existing = approval.grant.clone();
        }
        info!(grant_id = %grant_id, approver = %actor_id, "comp-off granted");
        Ok(approval)
    }
}
