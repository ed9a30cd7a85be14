//! Configuration loading for the time and leave engine.
//!
//! Leave types, shift and weekly-off policies, holiday calendars,
//! role-capability grants, and company policy toggles all come from YAML
//! files in a single directory.
//!
//! # Example
//!
//! ```no_run
//! use hr_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/hr").unwrap();
//! println!("Sandwich rule enabled: {}", loader.policy().sandwich_rule);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompanyPolicy, HolidaysConfig, HrConfig, LeaveTypeConfig, LeaveTypesConfig, PermissionsConfig,
    ShiftPolicyConfig, ShiftsConfig, WeeklyOffPolicyConfig,
};
