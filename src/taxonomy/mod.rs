//! Tenant-scoped user type taxonomy: cache, provider capability, resolver.

pub mod cache;
pub mod provider;
pub mod resolver;

pub use cache::{TaxonomyCache, UserTypeConfig};
pub use provider::ProfileConfigProvider;
pub use resolver::TaxonomyResolver;
