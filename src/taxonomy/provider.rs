//! Capability trait for the external profile-configuration collaborator.

use crate::request::context::RequestContext;
use crate::taxonomy::cache::UserTypeConfig;

/// Source of tenant-scoped user type configuration.
///
/// Implementations typically query a remote forms service. Fetches happen
/// inline during resolution; timeouts and cancellation belong to the
/// implementation, and the resolver performs no retries —
/// a failed fetch is treated as an empty one and resolution proceeds
/// through the fallback chain.
pub trait ProfileConfigProvider: Send + Sync {
    /// Error type for fetch failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch the profile configuration for a scope key.
    ///
    /// Returns an empty map when the scope has no configuration.
    fn profile_config(
        &self,
        scope: &str,
        context: &RequestContext,
    ) -> impl Future<Output = Result<UserTypeConfig, Self::Error>> + Send;
}
