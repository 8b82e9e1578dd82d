//! Rule-based validation engine for user-lifecycle requests.
//!
//! This library gates inbound user-management requests (create, update,
//! lookup, verification, role assignment, password recovery, account merge
//! and self-declaration) before any business logic runs. Each operation has
//! a fixed rule pipeline; the first violated rule aborts validation and is
//! reported as a classified [`ValidationError`] carrying a stable error code
//! and an HTTP status class.
//!
//! Requests are heterogeneous JSON documents wrapped in
//! [`RequestDocument`]. Validation never mutates the caller's document:
//! entry points that normalize fields (date-of-birth completion,
//! declaration persona defaulting) return a patched copy.
//!
//! User-type rules are tenant-scoped. The [`taxonomy`] module resolves the
//! allowed `userType`/`userSubType` values through a process-wide cache
//! backed by a pluggable [`ProfileConfigProvider`], falling back to a
//! default scope when a tenant has no configuration of its own.
//!
//! # Example
//!
//! ```
//! use user_request_validator::{
//!     ProfileConfigProvider, RequestContext, RequestDocument, UserOperation,
//!     UserRequest, UserRequestValidator, UserTypeConfig,
//! };
//! use serde_json::json;
//! use std::convert::Infallible;
//!
//! struct NoConfig;
//!
//! impl ProfileConfigProvider for NoConfig {
//!     type Error = Infallible;
//!     async fn profile_config(
//!         &self,
//!         _scope: &str,
//!         _context: &RequestContext,
//!     ) -> Result<UserTypeConfig, Self::Error> {
//!         Ok(UserTypeConfig::new())
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let validator = UserRequestValidator::new(NoConfig);
//! let document = RequestDocument::from_value(json!({
//!     "firstName": "Amy",
//!     "email": "amy@example.com",
//! }))
//! .unwrap();
//! let request = UserRequest::new(UserOperation::Create, document);
//! let context = RequestContext::with_generated_id();
//!
//! let normalized = validator.validate_create(&request, &context).await;
//! assert!(normalized.is_ok());
//! # }
//! ```

pub mod config;
pub mod error;
pub mod request;
pub mod taxonomy;
pub mod validation;

pub use config::ValidatorConfig;
pub use error::{ErrorClass, ValidationError, ValidationResult};
pub use request::{RequestContext, RequestDocument, UserOperation, UserRequest};
pub use taxonomy::{ProfileConfigProvider, TaxonomyCache, TaxonomyResolver, UserTypeConfig};
pub use validation::{PasswordPolicy, UserRequestValidator};
