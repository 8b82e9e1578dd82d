//! Request payloads, operation tags and request-scoped context.

pub mod context;
pub mod document;
pub mod keys;
pub mod operation;

pub use context::RequestContext;
pub use document::RequestDocument;
pub use operation::{UserOperation, UserRequest};
