//! Resolution of user type and sub-type against tenant-scoped configuration.
//!
//! `userType` (and, where present, the per-item entries under
//! `profileUserTypes`) must name a type configured for the request's tenant
//! scope. Configuration is fetched on demand from the profile-configuration
//! provider and cached for the process lifetime, with a fallback to the
//! default-persona scope when a tenant scope has no configuration.

use crate::error::{ValidationError, ValidationResult};
use crate::request::context::RequestContext;
use crate::request::document::RequestDocument;
use crate::request::keys;
use crate::taxonomy::cache::{TaxonomyCache, UserTypeConfig};
use crate::taxonomy::provider::ProfileConfigProvider;
use log::{info, warn};
use serde_json::Value;

/// Resolves taxonomy values through a shared cache and an external provider.
#[derive(Debug, Clone)]
pub struct TaxonomyResolver<P> {
    cache: TaxonomyCache,
    provider: P,
    default_persona: String,
}

impl<P: ProfileConfigProvider> TaxonomyResolver<P> {
    pub fn new(provider: P, default_persona: impl Into<String>) -> Self {
        Self {
            cache: TaxonomyCache::new(),
            provider,
            default_persona: default_persona.into(),
        }
    }

    /// Access the underlying cache (shared across clones).
    pub fn cache(&self) -> &TaxonomyCache {
        &self.cache
    }

    /// Resolve and validate the request's user type.
    ///
    /// Returns the scope key actually used, so a subsequent sub-type check
    /// runs against the same resolved scope. Absent `userType` is a no-op
    /// that still returns the effective scope.
    pub async fn resolve_user_type(
        &self,
        doc: &RequestDocument,
        scope: Option<&str>,
        context: &RequestContext,
    ) -> ValidationResult<String> {
        let mut scope_key = match scope {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => self.default_persona.clone(),
        };
        let Some(user_type) = doc.string(keys::USER_TYPE).filter(|t| !t.trim().is_empty())
        else {
            return Ok(scope_key);
        };

        let mut config = self.cache.get(&scope_key).await;
        if config.is_none() {
            let fetched = self.fetch(&scope_key, context).await;
            if fetched.is_empty() {
                scope_key = self.default_persona.clone();
                config = self.cache.get(&scope_key).await;
                if config.as_ref().is_none_or(UserTypeConfig::is_empty) {
                    let fetched = self.fetch(&scope_key, context).await;
                    if fetched.is_empty() {
                        info!(
                            "[{}] profile configuration not found for scope {}",
                            context.request_id, scope_key
                        );
                        config = None;
                    } else {
                        self.cache.insert(&scope_key, fetched.clone()).await;
                        config = Some(fetched);
                    }
                }
            } else {
                self.cache.insert(&scope_key, fetched.clone()).await;
                config = Some(fetched);
            }
        }

        let config = config.unwrap_or_default();
        if config.is_empty() {
            return Err(ValidationError::UserTypeConfigEmpty { scope: scope_key });
        }

        if let Some(items) = profile_user_type_items(doc) {
            for item in items {
                let item_type = item
                    .get(keys::TYPE)
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                if !config.contains_key(item_type) {
                    return Err(ValidationError::invalid_param_value(
                        keys::USER_TYPE,
                        item_type,
                    ));
                }
            }
        } else if !config.contains_key(user_type) {
            return Err(ValidationError::invalid_param_value(
                keys::USER_TYPE,
                user_type,
            ));
        }
        Ok(scope_key)
    }

    /// Validate user sub-types against an already-resolved scope.
    ///
    /// A supplied sub-type must appear in the allowed-subtype list of its
    /// type; absent sub-types pass.
    pub async fn validate_user_sub_type(
        &self,
        doc: &RequestDocument,
        scope: &str,
    ) -> ValidationResult<()> {
        let config = self.cache.get(scope).await.unwrap_or_default();

        if let Some(items) = profile_user_type_items(doc) {
            for item in items {
                let item_type = item
                    .get(keys::TYPE)
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let sub_type = item
                    .get(keys::SUB_TYPE)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty());
                if let Some(sub_type) = sub_type {
                    check_sub_type(&config, item_type, sub_type)?;
                }
            }
        } else if let Some(sub_type) =
            doc.string(keys::USER_SUB_TYPE).filter(|s| !s.is_empty())
        {
            let user_type = doc.string(keys::USER_TYPE).unwrap_or_default();
            check_sub_type(&config, user_type, sub_type)?;
        }
        Ok(())
    }

    async fn fetch(&self, scope: &str, context: &RequestContext) -> UserTypeConfig {
        match self.provider.profile_config(scope, context).await {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "[{}] profile configuration fetch failed for scope {}: {}",
                    context.request_id, scope, err
                );
                UserTypeConfig::new()
            }
        }
    }
}

/// Non-empty `profileUserTypes` list with a non-empty first item, if present.
fn profile_user_type_items(doc: &RequestDocument) -> Option<&Vec<Value>> {
    doc.list(keys::PROFILE_USERTYPES).filter(|items| {
        !items.is_empty()
            && items[0]
                .as_object()
                .is_some_and(|first| !first.is_empty())
    })
}

fn check_sub_type(
    config: &UserTypeConfig,
    user_type: &str,
    sub_type: &str,
) -> ValidationResult<()> {
    let allowed = config.get(user_type);
    if allowed.is_some_and(|subs| subs.iter().any(|s| s == sub_type)) {
        Ok(())
    } else {
        Err(ValidationError::invalid_param_value(
            keys::USER_SUB_TYPE,
            sub_type,
        ))
    }
}
