//! Authorization policy for review operations.
//!
//! Authority is a combination of the reporting-chain relationship (direct or
//! L2 manager of the target employee) and a role→capability table injected
//! at construction, so guards can be tested with fake policies instead of a
//! module-level constant.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{Actor, Employee, Role};

/// A capability a role can grant, independent of the reporting chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Approve leave requests of any employee.
    ApproveLeave,
    /// Reject leave requests of any employee.
    RejectLeave,
    /// Review attendance regularizations of any employee.
    ReviewRegularization,
    /// Approve comp-off grants of any employee.
    ApproveCompOff,
}

/// The role→capability table plus relationship predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPolicy {
    grants: HashMap<Role, HashSet<Capability>>,
}

impl AccessPolicy {
    /// Builds a policy from an explicit role→capability table.
    pub fn new(grants: HashMap<Role, HashSet<Capability>>) -> Self {
        Self { grants }
    }

    /// The stock table: HR admins hold every capability, managers and
    /// employees rely on the reporting-chain relationship alone.
    pub fn standard() -> Self {
        let mut grants = HashMap::new();
        grants.insert(
            Role::HrAdmin,
            HashSet::from([
                Capability::ApproveLeave,
                Capability::RejectLeave,
                Capability::ReviewRegularization,
                Capability::ApproveCompOff,
            ]),
        );
        Self::new(grants)
    }

    /// Returns true if any of the actor's roles grants the capability.
    pub fn grants(&self, actor: &Actor, capability: Capability) -> bool {
        actor
            .roles
            .iter()
            .any(|role| self.grants.get(role).is_some_and(|caps| caps.contains(&capability)))
    }

    fn is_direct_manager(actor: &Actor, employee: &Employee) -> bool {
        employee.reporting_manager_id == Some(actor.id)
    }

    fn is_l2_manager(actor: &Actor, employee: &Employee) -> bool {
        employee.l2_manager_id == Some(actor.id)
    }

    /// Approval authority: direct manager, L2 manager, or a role granting
    /// [`Capability::ApproveLeave`].
    pub fn may_approve_leave(&self, actor: &Actor, employee: &Employee) -> bool {
        Self::is_direct_manager(actor, employee)
            || Self::is_l2_manager(actor, employee)
            || self.grants(actor, Capability::ApproveLeave)
    }

    /// Rejection authority: direct manager or a role granting
    /// [`Capability::RejectLeave`]. The L2 manager may not reject.
    pub fn may_reject_leave(&self, actor: &Actor, employee: &Employee) -> bool {
        Self::is_direct_manager(actor, employee) || self.grants(actor, Capability::RejectLeave)
    }

    /// Regularization review authority: direct manager, L2 manager, or a
    /// role granting [`Capability::ReviewRegularization`].
    pub fn may_review_regularization(&self, actor: &Actor, employee: &Employee) -> bool {
        Self::is_direct_manager(actor, employee)
            || Self::is_l2_manager(actor, employee)
            || self.grants(actor, Capability::ReviewRegularization)
    }

    /// Comp-off approval authority: direct manager, L2 manager, or a role
    /// granting [`Capability::ApproveCompOff`].
    pub fn may_approve_comp_off(&self, actor: &Actor, employee: &Employee) -> bool {
        Self::is_direct_manager(actor, employee)
            || Self::is_l2_manager(actor, employee)
            || self.grants(actor, Capability::ApproveCompOff)
    }
}
