//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    CompanyPolicy, HolidaysConfig, HrConfig, LeaveTypesConfig, PermissionsConfig, ShiftsConfig,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/hr/
/// ├── policy.yaml          # Company policy toggles
/// ├── leave_types.yaml     # Leave type catalogue
/// ├── shift_policies.yaml  # Shift and weekly-off policies
/// ├── holidays.yaml        # Holiday calendars
/// └── permissions.yaml     # Role-capability grants
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hr").unwrap();
/// let casual = loader.config().leave_type("casual_leave").unwrap();
/// println!("Default balance: {}", casual.default_balance);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/hr")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if any
    /// required file is missing, contains invalid YAML, or references a
    /// comp-off leave type that is not in the catalogue.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<CompanyPolicy>(&path.join("policy.yaml"))?;
        let leave_types = Self::load_yaml::<LeaveTypesConfig>(&path.join("leave_types.yaml"))?;
        let shifts = Self::load_yaml::<ShiftsConfig>(&path.join("shift_policies.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?;
        let permissions = Self::load_yaml::<PermissionsConfig>(&path.join("permissions.yaml"))?;

        let config = HrConfig::new(policy, leave_types, shifts, holidays, permissions)?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the resolved configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    /// Company policy toggles.
    pub fn policy(&self) -> &CompanyPolicy {
        self.config.policy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::NaiveTime;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/hr"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert!(loader.policy().sandwich_rule);
        assert_eq!(loader.policy().comp_off_leave_type, "comp_off");
    }

    #[test]
    fn test_leave_type_catalogue() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let casual = loader.config().leave_type("casual_leave").unwrap();
        assert_eq!(casual.name, "Casual Leave");
        assert_eq!(casual.default_balance, dec("12"));
        assert!(casual.requires_approval);
        assert!(casual.applicable_gender.is_none());

        let maternity = loader.config().leave_type("maternity_leave").unwrap();
        assert_eq!(maternity.applicable_gender, Some(Gender::Female));
    }

    #[test]
    fn test_unknown_leave_type_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let result = loader.config().leave_type("unknown");
        match result {
            Err(EngineError::LeaveTypeNotFound { code }) => assert_eq!(code, "unknown"),
            other => panic!("Expected LeaveTypeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_comp_off_type_resolves() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let comp_off = loader.config().comp_off_type().unwrap();
        assert_eq!(comp_off.code, "comp_off");
        assert_eq!(comp_off.default_balance, Decimal::ZERO);
    }

    #[test]
    fn test_shift_policies_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let general = loader.config().shift_policy("general").unwrap();
        assert_eq!(general.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(general.grace_minutes, 15);
        assert_eq!(general.full_day_minutes, 480);
        assert!(!general.is_night_shift);

        let night = loader.config().shift_policy("night").unwrap();
        assert!(night.is_night_shift);
    }

    #[test]
    fn test_weekly_off_policies_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let standard = loader.config().weekly_off_policy("standard_weekend").unwrap();
        let offs = standard.off_days();
        assert!(offs.contains(&chrono::Weekday::Sat));
        assert!(offs.contains(&chrono::Weekday::Sun));
        assert_eq!(offs.len(), 2);
    }

    #[test]
    fn test_holiday_calendars_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let calendars = loader.config().calendars();
        assert!(calendars.iter().any(|c| c.location.is_none()));
        assert!(!calendars.is_empty());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }
}
