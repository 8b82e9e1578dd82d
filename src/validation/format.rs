//! Primitive shape checks for scalar request fields.
//!
//! Each function takes a single value (plus an auxiliary parameter where
//! needed) and either returns successfully or fails with an error naming the
//! offending field. Blank-value guards live with the callers: a validator
//! here errors only on non-blank-but-malformed input.

use crate::error::{ValidationError, ValidationResult};
use crate::request::document::RequestDocument;
use crate::request::keys;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4,15}$").unwrap());

static COUNTRY_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{1,4}$").unwrap());

/// Display format for a canonical date of birth.
pub const DATE_FORMAT: &str = "yyyy-MM-dd";

const CHRONO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate an email address against the standard grammar.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmailFormat)
    }
}

/// Validate a phone number, optionally against a country code.
///
/// The country code must be supplied separately; a literal `+` inside the
/// number is rejected outright.
pub fn validate_phone(phone: &str, country_code: Option<&str>) -> ValidationResult<()> {
    if phone.contains('+') {
        return Err(ValidationError::PhoneWithCountryCode);
    }
    if let Some(code) = country_code.filter(|c| !c.trim().is_empty()) {
        validate_country_code(code)?;
    }
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhoneFormat)
    }
}

/// Validate a dialing country code: optional `+`, then 1-4 digits.
pub fn validate_country_code(country_code: &str) -> ValidationResult<()> {
    if COUNTRY_CODE_RE.is_match(country_code) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCountryCode)
    }
}

/// Configurable password strength policy.
///
/// Expressed as explicit length and character-class requirements rather than
/// a lookahead pattern, with defaults matching the reference policy.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

impl PasswordPolicy {
    /// Check a password against this policy.
    pub fn validate(&self, password: &str) -> ValidationResult<()> {
        let long_enough = password.chars().count() >= self.min_length;
        let upper = !self.require_uppercase || password.chars().any(|c| c.is_ascii_uppercase());
        let lower = !self.require_lowercase || password.chars().any(|c| c.is_ascii_lowercase());
        let digit = !self.require_digit || password.chars().any(|c| c.is_ascii_digit());
        let special = !self.require_special
            || password.chars().any(|c| !c.is_ascii_alphanumeric() && !c.is_whitespace());

        if long_enough && upper && lower && digit && special {
            Ok(())
        } else {
            Err(ValidationError::PasswordPolicyViolation)
        }
    }
}

/// Compute the canonical date-of-birth patch for a document, if any.
///
/// The inbound `dob` is a year-month value; the configured day suffix turns
/// it into a full date which must parse as `yyyy-MM-dd`. Returns the
/// canonical value for the orchestrator to write back, or `None` when `dob`
/// is absent or the document already carries a non-null validated marker.
pub fn canonical_dob(
    doc: &RequestDocument,
    day_suffix: &str,
) -> ValidationResult<Option<String>> {
    if doc
        .get(keys::DOB_VALIDATION_DONE)
        .is_some_and(|v| !v.is_null())
    {
        return Ok(None);
    }
    let dob = match doc.get(keys::DOB) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(dob)) => dob,
        Some(_) => return Err(ValidationError::data_type(keys::DOB, "string")),
    };
    let full = format!("{dob}{day_suffix}");
    match NaiveDate::parse_from_str(&full, CHRONO_DATE_FORMAT) {
        Ok(_) => Ok(Some(full)),
        Err(_) => Err(ValidationError::InvalidDateFormat {
            value: full,
            format: DATE_FORMAT.to_string(),
        }),
    }
}

/// Validate a UUID-shaped identifier; empty values pass.
pub fn validate_uuid(uuid: &str) -> ValidationResult<()> {
    if uuid.is_empty() {
        return Ok(());
    }
    if Uuid::parse_str(uuid).is_ok() {
        Ok(())
    } else {
        Err(ValidationError::invalid_request_param(uuid))
    }
}

/// Validate a location type against the configured type list.
///
/// Standalone helper used by collaborator components; comparison is
/// case-insensitive.
pub fn validate_location_type(location_type: &str, allowed: &[String]) -> ValidationResult<()> {
    let wanted = location_type.to_lowercase();
    if allowed.iter().any(|t| t.to_lowercase() == wanted) {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            param: "locationType".to_string(),
            value: location_type.to_string(),
            allowed: allowed.to_vec(),
        })
    }
}
