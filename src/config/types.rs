//! Configuration types for the time and leave engine.
//!
//! Raw structures deserialized from the YAML files, plus [`HrConfig`],
//! the resolved aggregate the rest of the crate consumes. Identifiers are
//! assigned at load time; the YAML files reference entities by code or
//! name only.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::calculation::HolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{Gender, LeaveType, Role, ShiftPolicy, WeeklyOffPolicy};
use crate::workflow::{AccessPolicy, Capability};

/// Company policy toggles from policy.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyPolicy {
    /// Whether interior weekends and holidays inside a leave range count
    /// as leave days.
    pub sandwich_rule: bool,
    /// Code of the leave type credited by comp-off grants.
    pub comp_off_leave_type: String,
}

/// A leave type definition from leave_types.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypeConfig {
    /// Stable code, e.g. "casual_leave".
    pub code: String,
    /// Display name.
    pub name: String,
    /// Days seeded into a fresh yearly balance.
    pub default_balance: Decimal,
    /// Maximum days carried into the next year.
    #[serde(default)]
    pub max_carry_forward: Decimal,
    /// Whether leave days are paid.
    #[serde(default = "default_true")]
    pub is_paid: bool,
    /// Whether requests need reviewer approval.
    #[serde(default = "default_true")]
    pub requires_approval: bool,
    /// Minimum days between application and start date.
    #[serde(default)]
    pub min_days_notice: i64,
    /// Cap on a single request's total days.
    #[serde(default)]
    pub max_consecutive_days: Option<Decimal>,
    /// Restricts the type to one gender when set.
    #[serde(default)]
    pub applicable_gender: Option<Gender>,
    /// Inactive types reject new applications.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// Leave types file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveTypesConfig {
    /// All configured leave types.
    pub leave_types: Vec<LeaveTypeConfig>,
}

/// A shift policy definition from shift_policies.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftPolicyConfig {
    /// Display name, also the lookup key.
    pub name: String,
    /// Scheduled start, "HH:MM:SS".
    pub start_time: NaiveTime,
    /// Scheduled end.
    pub end_time: NaiveTime,
    /// Minutes after start still classified on time.
    #[serde(default)]
    pub grace_minutes: i64,
    /// Effective minutes required for a half day.
    pub half_day_minutes: i64,
    /// Effective minutes required for a full day.
    pub full_day_minutes: i64,
    /// Whether the shift crosses midnight.
    #[serde(default)]
    pub is_night_shift: bool,
    /// Inactive shifts are kept for history but not assigned.
    #[serde(default = "default_true")]
    pub active: bool,
}

/// A weekly-off policy definition.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyOffPolicyConfig {
    /// Display name, also the lookup key.
    pub name: String,
    /// Monday is an off day.
    #[serde(default)]
    pub monday: bool,
    /// Tuesday is an off day.
    #[serde(default)]
    pub tuesday: bool,
    /// Wednesday is an off day.
    #[serde(default)]
    pub wednesday: bool,
    /// Thursday is an off day.
    #[serde(default)]
    pub thursday: bool,
    /// Friday is an off day.
    #[serde(default)]
    pub friday: bool,
    /// Saturday is an off day.
    #[serde(default)]
    pub saturday: bool,
    /// Sunday is an off day.
    #[serde(default)]
    pub sunday: bool,
}

/// Shift policies file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftsConfig {
    /// All configured shift policies.
    pub shift_policies: Vec<ShiftPolicyConfig>,
    /// All configured weekly-off policies.
    pub weekly_off_policies: Vec<WeeklyOffPolicyConfig>,
}

/// Holidays file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// Calendars, global and per-location.
    pub calendars: Vec<HolidayCalendar>,
}

/// Role-capability grants from permissions.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionsConfig {
    /// Capabilities granted to each role, beyond manager relationships.
    pub grants: HashMap<Role, Vec<Capability>>,
}

fn default_true() -> bool {
    true
}

/// The resolved configuration aggregate.
///
/// Built by [`super::ConfigLoader`]; types and policies carry freshly
/// assigned identifiers and are looked up by code or name.
#[derive(Debug, Clone)]
pub struct HrConfig {
    policy: CompanyPolicy,
    leave_types: Vec<LeaveType>,
    shift_policies: Vec<ShiftPolicy>,
    weekly_off_policies: Vec<WeeklyOffPolicy>,
    calendars: Vec<HolidayCalendar>,
    access_policy: AccessPolicy,
}

impl HrConfig {
    pub(super) fn new(
        policy: CompanyPolicy,
        leave_types: LeaveTypesConfig,
        shifts: ShiftsConfig,
        holidays: HolidaysConfig,
        permissions: PermissionsConfig,
    ) -> EngineResult<Self> {
        let leave_types: Vec<LeaveType> = leave_types
            .leave_types
            .into_iter()
            .map(|lt| LeaveType {
                id: Uuid::new_v4(),
                code: lt.code,
                name: lt.name,
                default_balance: lt.default_balance,
                max_carry_forward: lt.max_carry_forward,
                is_paid: lt.is_paid,
                requires_approval: lt.requires_approval,
                min_days_notice: lt.min_days_notice,
                max_consecutive_days: lt.max_consecutive_days,
                applicable_gender: lt.applicable_gender,
                active: lt.active,
            })
            .collect();

        let shift_policies = shifts
            .shift_policies
            .into_iter()
            .map(|sp| ShiftPolicy {
                id: Uuid::new_v4(),
                name: sp.name,
                start_time: sp.start_time,
                end_time: sp.end_time,
                grace_minutes: sp.grace_minutes,
                half_day_minutes: sp.half_day_minutes,
                full_day_minutes: sp.full_day_minutes,
                is_night_shift: sp.is_night_shift,
                active: sp.active,
            })
            .collect();

        let weekly_off_policies = shifts
            .weekly_off_policies
            .into_iter()
            .map(|wo| WeeklyOffPolicy {
                id: Uuid::new_v4(),
                name: wo.name,
                monday: wo.monday,
                tuesday: wo.tuesday,
                wednesday: wo.wednesday,
                thursday: wo.thursday,
                friday: wo.friday,
                saturday: wo.saturday,
                sunday: wo.sunday,
            })
            .collect();

        let grants = permissions
            .grants
            .into_iter()
            .map(|(role, capabilities)| (role, capabilities.into_iter().collect()))
            .collect();
        let access_policy = AccessPolicy::new(grants);

        let config = Self {
            policy,
            leave_types,
            shift_policies,
            weekly_off_policies,
            calendars: holidays.calendars,
            access_policy,
        };

        // The comp-off flow depends on its leave type existing.
        config.leave_type(&config.policy.comp_off_leave_type)?;

        Ok(config)
    }

    /// Company policy toggles.
    pub fn policy(&self) -> &CompanyPolicy {
        &self.policy
    }

    /// All configured leave types.
    pub fn leave_types(&self) -> &[LeaveType] {
        &self.leave_types
    }

    /// Looks up a leave type by code.
    pub fn leave_type(&self, code: &str) -> EngineResult<&LeaveType> {
        self.leave_types
            .iter()
            .find(|lt| lt.code == code)
            .ok_or_else(|| EngineError::LeaveTypeNotFound {
                code: code.to_string(),
            })
    }

    /// The leave type credited by comp-off grants.
    pub fn comp_off_type(&self) -> EngineResult<&LeaveType> {
        self.leave_type(&self.policy.comp_off_leave_type)
    }

    /// All configured shift policies.
    pub fn shift_policies(&self) -> &[ShiftPolicy] {
        &self.shift_policies
    }

    /// Looks up a shift policy by name.
    pub fn shift_policy(&self, name: &str) -> EngineResult<&ShiftPolicy> {
        self.shift_policies
            .iter()
            .find(|sp| sp.name == name)
            .ok_or_else(|| EngineError::validation(format!("unknown shift policy '{}'", name)))
    }

    /// All configured weekly-off policies.
    pub fn weekly_off_policies(&self) -> &[WeeklyOffPolicy] {
        &self.weekly_off_policies
    }

    /// Looks up a weekly-off policy by name.
    pub fn weekly_off_policy(&self, name: &str) -> EngineResult<&WeeklyOffPolicy> {
        self.weekly_off_policies
            .iter()
            .find(|wo| wo.name == name)
            .ok_or_else(|| {
                EngineError::validation(format!("unknown weekly-off policy '{}'", name))
            })
    }

    /// Holiday calendars, global and per-location.
    pub fn calendars(&self) -> &[HolidayCalendar] {
        &self.calendars
    }

    /// Role-capability grants.
    pub fn access_policy(&self) -> &AccessPolicy {
        &self.access_policy
    }
}
