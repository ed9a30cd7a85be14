//! Employee model and actor types.
//!
//! The engine only reads a narrow slice of the employee record: identity,
//! gender (for leave-type applicability), the reporting chain (for approval
//! authority), and location (for holiday calendar selection).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee gender, used only for leave-type applicability checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Any other or undisclosed gender.
    Other,
}

/// A role an actor can hold, used by the permission table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular employee with self-service capabilities only.
    Employee,
    /// People manager; can review requests of direct reports.
    Manager,
    /// HR administrator; can review requests of any employee.
    HrAdmin,
}

/// The slice of an employee record the engine consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The employee's gender.
    pub gender: Gender,
    /// Direct reporting manager, if any.
    pub reporting_manager_id: Option<Uuid>,
    /// Second-level manager, if any.
    pub l2_manager_id: Option<Uuid>,
    /// Work location, used to select the holiday calendar.
    pub location: Option<String>,
}

/// The identity attempting an operation, with its resolved roles.
///
/// Authorization guards combine the actor's roles (via the permission
/// table) with its relationship to the target employee's reporting chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// The actor's employee id.
    pub id: Uuid,
    /// Roles held by the actor.
    pub roles: Vec<Role>,
}
