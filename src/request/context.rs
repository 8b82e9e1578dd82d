//! Request-scoped context passed through to the taxonomy resolver.
//!
//! Carries tracing and tenant information only; it holds no validation
//! state of its own.

use uuid::Uuid;

/// Context accompanying one validation call.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request, used in log lines
    pub request_id: String,
    /// Tenant/state scope code selecting taxonomy configuration
    pub scope_code: Option<String>,
    /// Caller locale, passed through to the configuration provider
    pub locale: Option<String>,
}

impl RequestContext {
    /// Create a context with a specific request ID.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            scope_code: None,
            locale: None,
        }
    }

    /// Create a context with a generated request ID.
    pub fn with_generated_id() -> Self {
        Self::new(Uuid::new_v4().to_string())
    }

    /// Attach a tenant scope code.
    pub fn with_scope(mut self, scope_code: impl Into<String>) -> Self {
        self.scope_code = Some(scope_code.into());
        self
    }

    /// Attach a locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Tenant scope code, if any.
    pub fn scope_code(&self) -> Option<&str> {
        self.scope_code.as_deref()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_generated_id()
    }
}
