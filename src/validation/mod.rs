//! Validation rules for user-lifecycle requests.
//!
//! - [`format`]: field-level format checks (email, phone, password, dates)
//! - [`external_ids`]: external-identifier list rules and duplicate detection
//! - [`framework`]: framework sub-document shape, field and value checks
//! - [`fields`]: the operation-scoped orchestrator tying the rules together

pub mod external_ids;
pub mod fields;
pub mod format;
pub mod framework;

pub use external_ids::{ExternalIdOperation, validate_external_ids};
pub use fields::UserRequestValidator;
pub use format::PasswordPolicy;
pub use framework::{FrameworkCategoryMap, FrameworkTerm};
