//! Validation of the `framework` sub-document on a user profile.
//!
//! A framework declaration attaches a tenant-defined curriculum taxonomy to
//! a user. Three independent checks cover it: a structural shape check on
//! the `id` field, a whitelist/mandatory-field check against an externally
//! supplied schema, and an allowed-value check against an injected category
//! map.

use crate::error::{ValidationError, ValidationResult};
use crate::request::document::RequestDocument;
use crate::request::keys;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One allowed term inside a framework category.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FrameworkTerm {
    pub name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl FrameworkTerm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: HashMap::new(),
        }
    }
}

/// Category name → allowed terms, supplied by the caller.
pub type FrameworkCategoryMap = HashMap<String, Vec<FrameworkTerm>>;

fn framework_id_param() -> String {
    format!("{}.{}", keys::FRAMEWORK, keys::ID)
}

/// Structural check on the `framework` sub-document.
///
/// `framework`, when present, must be an object. A non-empty framework must
/// carry a usable `id`: either a non-blank string or a singleton list whose
/// sole element is non-blank. An empty list or a blank value is a
/// mandatory-parameter failure; a multi-element list is a size failure.
pub fn validate_framework_shape(doc: &RequestDocument) -> ValidationResult<()> {
    let Some(value) = doc.get(keys::FRAMEWORK) else {
        return Ok(());
    };
    let Value::Object(framework) = value else {
        return Err(ValidationError::data_type(keys::FRAMEWORK, "map"));
    };
    if framework.is_empty() {
        return Ok(());
    }

    match framework.get(keys::ID) {
        Some(Value::Array(ids)) => match ids.as_slice() {
            [] => Err(ValidationError::mandatory_param(framework_id_param())),
            [single] => {
                if single.as_str().is_some_and(|id| !id.trim().is_empty()) {
                    Ok(())
                } else {
                    Err(ValidationError::mandatory_param(framework_id_param()))
                }
            }
            many => Err(ValidationError::InvalidParameterSize {
                param: framework_id_param(),
                expected: 1,
                actual: many.len(),
            }),
        },
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::mandatory_param(framework_id_param())),
    }
}

/// Whitelist and mandatory-field check against an externally supplied schema.
///
/// Every mandatory field must be present as a non-empty list; any other
/// whitelisted field present must be list-typed when non-null; any field
/// outside the whitelist is unsupported.
pub fn validate_framework_fields(
    doc: &RequestDocument,
    fields: &[String],
    mandatory_fields: &[String],
) -> ValidationResult<()> {
    let Some(framework) = doc.object(keys::FRAMEWORK) else {
        return Ok(());
    };

    for field in fields {
        if mandatory_fields.contains(field) {
            validate_mandatory_list_field(framework, field)?;
        } else if let Some(value) = framework.get(field) {
            if !value.is_null() && !value.is_array() {
                return Err(ValidationError::data_type(field, "list"));
            }
        }
    }

    for present in framework.keys() {
        if !fields.contains(present) {
            return Err(ValidationError::UnsupportedField {
                field: format!("{}.{present}", keys::FRAMEWORK),
            });
        }
    }
    Ok(())
}

fn validate_mandatory_list_field(
    framework: &Map<String, Value>,
    field: &str,
) -> ValidationResult<()> {
    let Some(value) = framework.get(field) else {
        return Err(ValidationError::mandatory_param(field));
    };
    let Value::Array(items) = value else {
        return Err(ValidationError::data_type(
            format!("{}.{field}", keys::FRAMEWORK),
            "list",
        ));
    };
    if items.is_empty() {
        return Err(ValidationError::MandatoryParamEmpty {
            param: format!("{}.{field}", keys::FRAMEWORK),
        });
    }
    Ok(())
}

/// Allowed-value check against an injected framework category map.
///
/// Every value declared for a category must match the `name` of one of the
/// allowed terms for that category.
pub fn validate_framework_values(
    doc: &RequestDocument,
    allowed: &FrameworkCategoryMap,
) -> ValidationResult<()> {
    let Some(framework) = doc.object(keys::FRAMEWORK) else {
        return Ok(());
    };

    for (category, declared) in framework {
        let Value::Array(declared) = declared else {
            continue;
        };
        if declared.is_empty() {
            continue;
        }
        let Some(terms) = allowed.get(category) else {
            return Err(ValidationError::UnsupportedField {
                field: format!("{category} in {}", keys::FRAMEWORK),
            });
        };
        for value in declared {
            let value = value.as_str().unwrap_or_default();
            if !terms.iter().any(|term| term.name == value) {
                return Err(ValidationError::invalid_param_value(
                    format!("{}.{category}", keys::FRAMEWORK),
                    value,
                ));
            }
        }
    }
    Ok(())
}
