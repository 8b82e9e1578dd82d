//! Validation of the list-valued `externalIds` sub-resource.
//!
//! External identifiers are provider-issued credentials attached to a user.
//! Each item carries mandatory `id`, `provider` and `idType` fields and an
//! optional mutation verb. At create time only `add` is a legal verb and the
//! list must be free of duplicate (provider, idType) pairs, compared
//! case-insensitively.

use crate::error::{ValidationError, ValidationResult};
use crate::request::document::{RequestDocument, is_blank};
use crate::request::keys;
use crate::request::operation::UserOperation;
use serde_json::Value;

/// Mutation verbs accepted on an external identifier item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalIdOperation {
    Add,
    Remove,
    Edit,
}

impl ExternalIdOperation {
    pub const ALL: [Self; 3] = [Self::Add, Self::Remove, Self::Edit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Edit => "edit",
        }
    }

    /// Case-insensitive parse of a verb.
    pub fn parse(verb: &str) -> Option<Self> {
        match verb.to_lowercase().as_str() {
            "add" => Some(Self::Add),
            "remove" => Some(Self::Remove),
            "edit" => Some(Self::Edit),
            _ => None,
        }
    }

    fn allowed_values() -> Vec<String> {
        Self::ALL.iter().map(|op| op.as_str().to_string()).collect()
    }
}

/// Validate the `externalIds` entry of a request document, if present.
///
/// A missing or null key is a no-op. A non-list value is a type error.
/// Per-item checks run in list order; on the create operation a duplicate
/// pass follows, reporting the first colliding pair in input order.
pub fn validate_external_ids(
    doc: &RequestDocument,
    operation: UserOperation,
) -> ValidationResult<()> {
    let Some(value) = doc.get(keys::EXTERNAL_IDS) else {
        return Ok(());
    };
    if value.is_null() {
        return Ok(());
    }
    let Value::Array(items) = value else {
        return Err(ValidationError::data_type(keys::EXTERNAL_IDS, "list"));
    };

    for item in items {
        validate_item(item, operation)?;
    }
    if operation.is_create() {
        check_for_duplicates(items)?;
    }
    Ok(())
}

fn validate_item(item: &Value, operation: UserOperation) -> ValidationResult<()> {
    let verb = item.get(keys::OPERATION).and_then(Value::as_str);
    if let Some(verb) = verb.filter(|v| !v.trim().is_empty()) {
        let param = joined(keys::EXTERNAL_IDS, keys::OPERATION);
        let Some(parsed) = ExternalIdOperation::parse(verb) else {
            return Err(ValidationError::InvalidValue {
                param,
                value: verb.to_string(),
                allowed: ExternalIdOperation::allowed_values(),
            });
        };
        // at creation time external ids can only be added
        if operation.is_create() && parsed != ExternalIdOperation::Add {
            return Err(ValidationError::InvalidValue {
                param,
                value: verb.to_string(),
                allowed: vec![ExternalIdOperation::Add.as_str().to_string()],
            });
        }
    }

    for field in [keys::ID, keys::PROVIDER, keys::ID_TYPE] {
        if is_blank(item.get(field)) {
            return Err(ValidationError::mandatory_param(joined(
                keys::EXTERNAL_IDS,
                field,
            )));
        }
    }
    Ok(())
}

/// Pairwise duplicate scan over (provider, idType), case-insensitive.
///
/// O(n²) in list length; identifier lists are bounded by a handful of
/// providers per user.
fn check_for_duplicates(items: &[Value]) -> ValidationResult<()> {
    for (idx, item) in items.iter().enumerate() {
        let provider = lowered(item, keys::PROVIDER);
        let id_type = lowered(item, keys::ID_TYPE);
        for earlier in &items[..idx] {
            if lowered(earlier, keys::PROVIDER) == provider
                && lowered(earlier, keys::ID_TYPE) == id_type
            {
                return Err(ValidationError::DuplicateExternalIds {
                    id_type: earlier
                        .get(keys::ID_TYPE)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    provider: earlier
                        .get(keys::PROVIDER)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                });
            }
        }
    }
    Ok(())
}

fn lowered(item: &Value, field: &str) -> String {
    item.get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_lowercase()
}

fn joined(parent: &str, field: &str) -> String {
    format!("{parent}.{field}")
}
