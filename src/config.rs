//! Deployment-tunable validation settings.

use crate::validation::format::PasswordPolicy;

/// Settings the validation engine reads at runtime.
///
/// Defaults match the reference deployment; every field can be overridden
/// when the transport layer constructs the validator.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Password strength policy
    pub password_policy: PasswordPolicy,
    /// Canonical day suffix appended to a year-month date of birth
    pub dob_day_suffix: String,
    /// Lookup key tags accepted by the lookup operation, besides "id"
    pub lookup_types: Vec<String>,
    /// Location type tags accepted by the standalone location-type check
    pub location_types: Vec<String>,
    /// Fallback taxonomy scope when a tenant scope is unset or unconfigured
    pub default_persona: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            password_policy: PasswordPolicy::default(),
            dob_day_suffix: "-01".to_string(),
            lookup_types: vec![
                "email".to_string(),
                "phone".to_string(),
                "username".to_string(),
            ],
            location_types: vec![
                "state".to_string(),
                "district".to_string(),
                "block".to_string(),
                "cluster".to_string(),
                "school".to_string(),
            ],
            default_persona: "default".to_string(),
        }
    }
}
