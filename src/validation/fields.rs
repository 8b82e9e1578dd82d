//! Operation-scoped orchestration of the validation rules.
//!
//! `UserRequestValidator` exposes one entry point per user-lifecycle
//! operation. Each entry point runs the format, external-identifier,
//! taxonomy and framework checks in a fixed order and reports the first
//! violated rule as the single failure. Entry points that normalize fields
//! (date of birth, declaration personas) clone the inbound document, patch
//! the clone only after the corresponding check succeeded, and return it;
//! the caller's document is never mutated.

use crate::config::ValidatorConfig;
use crate::error::{ValidationError, ValidationResult};
use crate::request::context::RequestContext;
use crate::request::document::{RequestDocument, is_blank};
use crate::request::keys;
use crate::request::operation::{UserOperation, UserRequest};
use crate::taxonomy::provider::ProfileConfigProvider;
use crate::taxonomy::resolver::TaxonomyResolver;
use crate::validation::external_ids::validate_external_ids;
use crate::validation::format;
use crate::validation::framework::validate_framework_shape;
use serde_json::Value;

/// Fields a client may not supply on a create request.
const CREATE_RESERVED_FIELDS: [&str; 8] = [
    keys::REGISTERED_ORG_ID,
    keys::ROOT_ORG_ID,
    keys::PROVIDER,
    keys::EXTERNAL_ID,
    keys::EXTERNAL_ID_PROVIDER,
    keys::EXTERNAL_ID_TYPE,
    keys::ID_TYPE,
    keys::PROFILE_USERTYPES,
];

/// Fields that cannot be mutated via update.
const UPDATE_IMMUTABLE_FIELDS: [&str; 6] = [
    keys::REGISTERED_ORG_ID,
    keys::ROOT_ORG_ID,
    keys::CHANNEL,
    keys::USERNAME,
    keys::PROVIDER,
    keys::ID_TYPE,
];

/// Rule-based gate for user-lifecycle requests.
#[derive(Debug, Clone)]
pub struct UserRequestValidator<P> {
    config: ValidatorConfig,
    resolver: TaxonomyResolver<P>,
}

impl<P: ProfileConfigProvider> UserRequestValidator<P> {
    /// Create a validator with default settings.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ValidatorConfig::default())
    }

    /// Create a validator with explicit settings.
    pub fn with_config(provider: P, config: ValidatorConfig) -> Self {
        let resolver = TaxonomyResolver::new(provider, config.default_persona.clone());
        Self { config, resolver }
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The taxonomy resolver, for callers running the separate sub-type
    /// check after resolution.
    pub fn taxonomy(&self) -> &TaxonomyResolver<P> {
        &self.resolver
    }

    /// Validate a create request.
    ///
    /// Returns the normalized document on success.
    pub async fn validate_create(
        &self,
        request: &UserRequest,
        context: &RequestContext,
    ) -> ValidationResult<RequestDocument> {
        let mut doc = request.document.clone();
        validate_external_ids(&doc, UserOperation::Create)?;
        fields_not_allowed(&doc, &CREATE_RESERVED_FIELDS)?;
        self.create_basic_validation(&mut doc)?;
        let scope = self
            .resolver
            .resolve_user_type(&doc, context.scope_code(), context)
            .await?;
        if doc.has_text(keys::USER_TYPE) {
            self.resolver.validate_user_sub_type(&doc, &scope).await?;
        }
        self.phone_validation(&doc)?;
        self.password_validation(&doc)?;
        Ok(doc)
    }

    /// Validate a v1 create request: a mandatory `userName` on top of the
    /// base create rules.
    pub async fn validate_create_v1(
        &self,
        request: &UserRequest,
        context: &RequestContext,
    ) -> ValidationResult<RequestDocument> {
        mandatory_text(&request.document, keys::USERNAME)?;
        self.validate_create(request, context).await
    }

    /// Validate a v3 create request (managed-user flow): mandatory
    /// `firstName`, the email/phone/managedBy triple rule, and format checks
    /// only — no taxonomy resolution.
    pub fn validate_create_v3(&self, request: &UserRequest) -> ValidationResult<RequestDocument> {
        let mut doc = request.document.clone();
        mandatory_text(&doc, keys::FIRST_NAME)?;
        email_phone_managed_by_rule(&doc)?;
        self.password_validation(&doc)?;
        if let Some(email) = doc.string(keys::EMAIL).filter(|e| !e.trim().is_empty()) {
            format::validate_email(email)?;
        }
        if let Some(phone) = doc.string(keys::PHONE).filter(|p| !p.trim().is_empty()) {
            format::validate_phone(phone, None)?;
        }
        self.apply_dob_patch(&mut doc)?;
        Ok(doc)
    }

    /// Validate a v4 create request: v3 rules plus the framework shape check.
    pub fn validate_create_v4(&self, request: &UserRequest) -> ValidationResult<RequestDocument> {
        let doc = self.validate_create_v3(request)?;
        validate_framework_shape(&doc)?;
        Ok(doc)
    }

    /// Validate an update request (legacy or v3 variant, per the request's
    /// operation tag).
    pub fn validate_update(&self, request: &UserRequest) -> ValidationResult<RequestDocument> {
        let mut doc = request.document.clone();
        if doc.contains(keys::MANAGED_BY) {
            return Err(ValidationError::ManagedByNotAllowed);
        }
        check_empty_phone_and_email(&doc)?;
        validate_external_ids(&doc, request.operation)?;
        self.phone_validation(&doc)?;
        self.update_basic_validation(&doc, request.operation)?;
        if doc.contains(keys::ORGANISATIONS) {
            return Err(ValidationError::UnsupportedField {
                field: keys::ORGANISATIONS.to_string(),
            });
        }
        self.apply_dob_patch(&mut doc)?;
        if doc.contains(keys::ROOT_ORG_ID) && doc.is_blank_text(keys::ROOT_ORG_ID) {
            return Err(ValidationError::InvalidRootOrgId);
        }
        external_id_triple_rule(&doc)?;
        validate_framework_shape(&doc)?;
        recovery_contact_validation(&doc)?;
        Ok(doc)
    }

    /// Validate a lookup request: `value` plus a `key` from the closed set
    /// of lookup types.
    pub fn validate_lookup(&self, request: &UserRequest) -> ValidationResult<()> {
        let doc = &request.document;
        mandatory_text(doc, keys::VALUE)?;
        mandatory_text(doc, keys::KEY)?;

        let mut allowed = self.config.lookup_types.clone();
        allowed.push(keys::ID.to_string());
        let key = doc.string(keys::KEY).unwrap_or_default();
        if !allowed.iter().any(|t| t == key) {
            return Err(ValidationError::InvalidValue {
                param: keys::KEY.to_string(),
                value: key.to_string(),
                allowed,
            });
        }
        Ok(())
    }

    /// Validate a verify-user request.
    pub fn validate_verify(&self, request: &UserRequest) -> ValidationResult<()> {
        if request.document.is_blank_text(keys::LOGIN_ID) {
            return Err(ValidationError::LoginIdRequired);
        }
        Ok(())
    }

    /// Validate a forgot-password request.
    pub fn validate_forgot_password(&self, request: &UserRequest) -> ValidationResult<()> {
        if request.document.is_blank_text(keys::USERNAME) {
            return Err(ValidationError::UserNameRequired);
        }
        Ok(())
    }

    /// Validate a role-assignment request: `userId`, a non-empty `roles`
    /// list, and either `organisationId` or the (externalId, provider) pair.
    pub fn validate_assign_role(&self, request: &UserRequest) -> ValidationResult<()> {
        let doc = &request.document;
        if doc.is_blank_text(keys::USER_ID) {
            return Err(ValidationError::UserIdRequired);
        }
        match doc.get(keys::ROLES) {
            Some(Value::Array(roles)) if roles.is_empty() => {
                return Err(ValidationError::RolesRequired);
            }
            Some(Value::Array(_)) => {}
            _ => return Err(ValidationError::data_type(keys::ROLES, "list")),
        }
        if doc.is_blank_text(keys::ORGANISATION_ID)
            && (doc.is_blank_text(keys::EXTERNAL_ID) || doc.is_blank_text(keys::PROVIDER))
        {
            return Err(ValidationError::mandatory_param(format!(
                "{} or ({}, {})",
                keys::ORGANISATION_ID,
                keys::EXTERNAL_ID,
                keys::PROVIDER
            )));
        }
        Ok(())
    }

    /// Validate an account-merge request.
    ///
    /// The two tokens travel as headers and are supplied out-of-band by the
    /// transport layer.
    pub fn validate_merge_account(
        &self,
        request: &UserRequest,
        auth_user_token: Option<&str>,
        source_user_token: Option<&str>,
    ) -> ValidationResult<()> {
        let doc = &request.document;
        if doc.is_blank_text(keys::FROM_ACCOUNT_ID) {
            return Err(ValidationError::FromAccountIdRequired);
        }
        if doc.is_blank_text(keys::TO_ACCOUNT_ID) {
            return Err(ValidationError::ToAccountIdRequired);
        }
        if auth_user_token.is_none_or(|t| t.trim().is_empty()) {
            return Err(ValidationError::mandatory_header(
                keys::X_AUTHENTICATED_USER_TOKEN,
            ));
        }
        if source_user_token.is_none_or(|t| t.trim().is_empty()) {
            return Err(ValidationError::mandatory_header(keys::X_SOURCE_USER_TOKEN));
        }
        Ok(())
    }

    /// Validate a self-declaration request.
    ///
    /// Each declaration item needs a non-blank `userId` and `orgId`; a
    /// missing persona is defaulted in the returned document. Any failure
    /// while walking the items is re-signaled as a client error carrying
    /// the underlying message, never an opaque fault.
    pub fn validate_declare(&self, request: &UserRequest) -> ValidationResult<RequestDocument> {
        self.validate_declarations(&request.document)
            .map_err(|err| match err {
                err @ ValidationError::InvalidDeclaration { .. } => err,
                other => ValidationError::InvalidDeclaration {
                    message: other.to_string(),
                },
            })
    }

    fn validate_declarations(&self, doc: &RequestDocument) -> ValidationResult<RequestDocument> {
        let Some(declarations) = doc.list(keys::DECLARATIONS).filter(|d| !d.is_empty()) else {
            return Err(ValidationError::mandatory_param(keys::DECLARATIONS));
        };

        let mut normalized = Vec::with_capacity(declarations.len());
        for item in declarations {
            let Value::Object(fields) = item else {
                return Err(ValidationError::InvalidDeclaration {
                    message: "declaration item must be an object".to_string(),
                });
            };
            if is_blank(fields.get(keys::USER_ID)) || is_blank(fields.get(keys::ORG_ID)) {
                return Err(ValidationError::mandatory_param(format!(
                    "{}, {}",
                    keys::USER_ID,
                    keys::ORG_ID
                )));
            }
            let mut fields = fields.clone();
            if is_blank(fields.get(keys::PERSONA)) {
                fields.insert(
                    keys::PERSONA.to_string(),
                    Value::String(self.config.default_persona.clone()),
                );
            }
            normalized.push(Value::Object(fields));
        }

        let mut doc = doc.clone();
        doc.set(keys::DECLARATIONS, Value::Array(normalized));
        Ok(doc)
    }

    /// Standalone UUID check for user identifiers.
    pub fn validate_user_id(&self, uuid: &str) -> ValidationResult<()> {
        format::validate_uuid(uuid)
    }

    /// Standalone location-type check for collaborator components.
    pub fn validate_location_type(&self, location_type: &str) -> ValidationResult<()> {
        format::validate_location_type(location_type, &self.config.location_types)
    }

    fn create_basic_validation(&self, doc: &mut RequestDocument) -> ValidationResult<()> {
        mandatory_text(doc, keys::FIRST_NAME)?;
        email_phone_managed_by_rule(doc)?;
        self.apply_dob_patch(doc)?;
        if let Some(email) = doc.string(keys::EMAIL).filter(|e| !e.trim().is_empty()) {
            format::validate_email(email)?;
        }
        match doc.get(keys::ROLES) {
            None | Some(Value::Null) | Some(Value::Array(_)) => Ok(()),
            Some(_) => Err(ValidationError::data_type(keys::ROLES, "list")),
        }
    }

    fn update_basic_validation(
        &self,
        doc: &RequestDocument,
        operation: UserOperation,
    ) -> ValidationResult<()> {
        fields_not_allowed(doc, &UPDATE_IMMUTABLE_FIELDS)?;
        user_id_or_external_id_rule(doc)?;
        if doc.contains(keys::FIRST_NAME) && doc.is_blank_text(keys::FIRST_NAME) {
            return Err(ValidationError::FirstNameRequired);
        }
        match doc.get(keys::EMAIL) {
            None | Some(Value::Null) => {}
            Some(Value::String(email)) => format::validate_email(email)?,
            Some(_) => return Err(ValidationError::data_type(keys::EMAIL, "string")),
        }
        match doc.get(keys::ROLES) {
            None | Some(Value::Null) => {}
            Some(Value::Array(roles)) if roles.is_empty() => {
                return Err(ValidationError::RolesRequired);
            }
            Some(Value::Array(_)) => {}
            Some(_) => return Err(ValidationError::data_type(keys::ROLES, "list")),
        }

        // the legacy update carries the singular profileUserType; v3 carries
        // the plural form — each variant rejects the other's key
        match operation {
            UserOperation::UpdateV3 => {
                if doc.contains(keys::PROFILE_USERTYPE) {
                    return Err(ValidationError::invalid_request_param(
                        keys::PROFILE_USERTYPE,
                    ));
                }
            }
            _ => {
                if doc.contains(keys::PROFILE_USERTYPES) {
                    return Err(ValidationError::invalid_request_param(
                        keys::PROFILE_USERTYPES,
                    ));
                }
            }
        }
        match doc.get(keys::PROFILE_USERTYPES) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) if items.is_empty() => {
                return Err(ValidationError::ProfileUserTypesRequired);
            }
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(ValidationError::data_type(keys::PROFILE_USERTYPES, "list"));
            }
        }
        Ok(())
    }

    fn phone_validation(&self, doc: &RequestDocument) -> ValidationResult<()> {
        if let Some(code) = doc.string(keys::COUNTRY_CODE).filter(|c| !c.trim().is_empty()) {
            format::validate_country_code(code)?;
        }
        if let Some(phone) = doc.string(keys::PHONE).filter(|p| !p.trim().is_empty()) {
            format::validate_phone(phone, doc.string(keys::COUNTRY_CODE))?;
        }
        Ok(())
    }

    fn password_validation(&self, doc: &RequestDocument) -> ValidationResult<()> {
        if let Some(password) = doc.string(keys::PASSWORD).filter(|p| !p.trim().is_empty()) {
            self.config.password_policy.validate(password)?;
        }
        Ok(())
    }

    fn apply_dob_patch(&self, doc: &mut RequestDocument) -> ValidationResult<()> {
        if let Some(canonical) = format::canonical_dob(doc, &self.config.dob_day_suffix)? {
            doc.set(keys::DOB, Value::String(canonical));
            doc.set(keys::DOB_VALIDATION_DONE, Value::Bool(true));
        }
        Ok(())
    }
}

/// Reject any listed field present with a non-null value.
fn fields_not_allowed(doc: &RequestDocument, fields: &[&str]) -> ValidationResult<()> {
    for field in fields {
        if doc.get(field).is_some_and(|v| !v.is_null()) {
            return Err(ValidationError::invalid_request_param(*field));
        }
    }
    Ok(())
}

fn mandatory_text(doc: &RequestDocument, key: &str) -> ValidationResult<()> {
    if doc.is_blank_text(key) {
        return Err(ValidationError::mandatory_param(key));
    }
    Ok(())
}

/// At least one of email/phone/managedBy, and managedBy exclusive with the
/// other two.
fn email_phone_managed_by_rule(doc: &RequestDocument) -> ValidationResult<()> {
    let email = doc.has_text(keys::EMAIL);
    let phone = doc.has_text(keys::PHONE);
    let managed_by = doc.has_text(keys::MANAGED_BY);
    if !email && !phone && !managed_by {
        return Err(ValidationError::EmailOrPhoneOrManagedByRequired);
    }
    if (email || phone) && managed_by {
        return Err(ValidationError::OnlyEmailOrPhoneOrManagedByRequired);
    }
    Ok(())
}

/// Present-but-empty phone/email strings are invalid on update; absent is
/// fine.
fn check_empty_phone_and_email(doc: &RequestDocument) -> ValidationResult<()> {
    for key in [keys::PHONE, keys::EMAIL] {
        if let Some(value) = doc.string(key) {
            if value.trim().is_empty() {
                return Err(ValidationError::invalid_param_value(key, value));
            }
        }
    }
    Ok(())
}

/// Update must address a user: `userId`/`id`, or the full external-id triple.
fn user_id_or_external_id_rule(doc: &RequestDocument) -> ValidationResult<()> {
    let by_id = doc.has_text(keys::USER_ID) || doc.has_text(keys::ID);
    let by_external = doc.has_text(keys::EXTERNAL_ID)
        && doc.has_text(keys::EXTERNAL_ID_PROVIDER)
        && doc.has_text(keys::EXTERNAL_ID_TYPE);
    if by_id || by_external {
        Ok(())
    } else {
        Err(ValidationError::mandatory_param(format!(
            "{} or ({}, {}, {})",
            keys::USER_ID,
            keys::EXTERNAL_ID,
            keys::EXTERNAL_ID_TYPE,
            keys::EXTERNAL_ID_PROVIDER
        )))
    }
}

/// externalId, externalIdType and externalIdProvider appear together or not
/// at all.
fn external_id_triple_rule(doc: &RequestDocument) -> ValidationResult<()> {
    let present = [
        doc.has_text(keys::EXTERNAL_ID),
        doc.has_text(keys::EXTERNAL_ID_PROVIDER),
        doc.has_text(keys::EXTERNAL_ID_TYPE),
    ];
    if present.iter().all(|p| *p) || present.iter().all(|p| !*p) {
        Ok(())
    } else {
        Err(ValidationError::DependentParamsMissing {
            params: format!(
                "{}, {}, {}",
                keys::EXTERNAL_ID,
                keys::EXTERNAL_ID_TYPE,
                keys::EXTERNAL_ID_PROVIDER
            ),
        })
    }
}

/// Recovery contact fields, when supplied, must be well-formed.
fn recovery_contact_validation(doc: &RequestDocument) -> ValidationResult<()> {
    if let Some(email) = doc.string(keys::RECOVERY_EMAIL).filter(|e| !e.trim().is_empty()) {
        format::validate_email(email)?;
    }
    if let Some(phone) = doc.string(keys::RECOVERY_PHONE).filter(|p| !p.trim().is_empty()) {
        format::validate_phone(phone, None)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::provider::testing::StaticProvider;
    use crate::taxonomy::cache::UserTypeConfig;
    use serde_json::json;
    use std::collections::HashMap;

    fn validator() -> UserRequestValidator<StaticProvider> {
        let mut configs = HashMap::new();
        let mut ka = UserTypeConfig::new();
        ka.insert("teacher".to_string(), vec!["hm".to_string()]);
        configs.insert("ka".to_string(), ka.clone());
        configs.insert("default".to_string(), ka);
        UserRequestValidator::new(StaticProvider::new(configs))
    }

    fn request(operation: UserOperation, value: serde_json::Value) -> UserRequest {
        UserRequest::new(operation, RequestDocument::from_value(value).unwrap())
    }

    fn create(value: serde_json::Value) -> UserRequest {
        request(UserOperation::Create, value)
    }

    fn update(value: serde_json::Value) -> UserRequest {
        request(UserOperation::Update, value)
    }

    #[tokio::test]
    async fn create_requires_an_identity_anchor() {
        let v = validator();
        let ctx = RequestContext::with_generated_id();
        let err = v
            .validate_create(&create(json!({"firstName": "Amy"})), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::EmailOrPhoneOrManagedByRequired);
    }

    #[tokio::test]
    async fn managed_by_is_exclusive_on_create() {
        let v = validator();
        let ctx = RequestContext::with_generated_id();
        let err = v
            .validate_create(
                &create(json!({
                    "firstName": "Amy",
                    "email": "amy@example.com",
                    "managedBy": "parent-uuid"
                })),
                &ctx,
            )
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::OnlyEmailOrPhoneOrManagedByRequired);
    }

    #[tokio::test]
    async fn create_rejects_server_assigned_fields() {
        let v = validator();
        let ctx = RequestContext::with_generated_id();
        let err = v
            .validate_create(
                &create(json!({
                    "firstName": "Amy",
                    "email": "amy@example.com",
                    "rootOrgId": "org1"
                })),
                &ctx,
            )
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::invalid_request_param("rootOrgId"));
    }

    #[tokio::test]
    async fn weak_password_fails_strong_passes() {
        let v = validator();
        let ctx = RequestContext::with_generated_id();
        let weak = create(json!({
            "firstName": "A",
            "email": "a@example.com",
            "password": "Weak1"
        }));
        assert_eq!(
            v.validate_create(&weak, &ctx).await.unwrap_err(),
            ValidationError::PasswordPolicyViolation
        );

        let strong = create(json!({
            "firstName": "A",
            "email": "a@example.com",
            "password": "Strong#2024"
        }));
        assert!(v.validate_create(&strong, &ctx).await.is_ok());
    }

    #[tokio::test]
    async fn create_resolves_user_type_through_scope() {
        let v = validator();
        let ctx = RequestContext::with_generated_id().with_scope("ka");
        let ok = create(json!({
            "firstName": "Amy",
            "email": "amy@example.com",
            "userType": "teacher"
        }));
        assert!(v.validate_create(&ok, &ctx).await.is_ok());

        let bad = create(json!({
            "firstName": "Amy",
            "email": "amy@example.com",
            "userType": "astronaut"
        }));
        assert_eq!(
            v.validate_create(&bad, &ctx).await.unwrap_err(),
            ValidationError::invalid_param_value("userType", "astronaut")
        );
    }

    #[tokio::test]
    async fn create_checks_sub_type_when_user_type_present() {
        let v = validator();
        let ctx = RequestContext::with_generated_id().with_scope("ka");
        let ok = create(json!({
            "firstName": "Amy",
            "email": "amy@example.com",
            "userType": "teacher",
            "userSubType": "hm"
        }));
        assert!(v.validate_create(&ok, &ctx).await.is_ok());

        let bad = create(json!({
            "firstName": "Amy",
            "email": "amy@example.com",
            "userType": "teacher",
            "userSubType": "deo"
        }));
        assert_eq!(
            v.validate_create(&bad, &ctx).await.unwrap_err(),
            ValidationError::invalid_param_value("userSubType", "deo")
        );
    }

    #[tokio::test]
    async fn create_normalizes_dob_and_is_idempotent() {
        let v = validator();
        let ctx = RequestContext::with_generated_id();
        let req = create(json!({
            "firstName": "Amy",
            "email": "amy@example.com",
            "dob": "1990-06"
        }));
        let normalized = v.validate_create(&req, &ctx).await.unwrap();
        assert_eq!(normalized.string(keys::DOB), Some("1990-06-01"));
        assert_eq!(normalized.get(keys::DOB_VALIDATION_DONE), Some(&json!(true)));
        // inbound document untouched
        assert_eq!(req.document.string(keys::DOB), Some("1990-06"));

        // revalidating the normalized document is a no-op
        let again = v
            .validate_create(&UserRequest::new(UserOperation::Create, normalized.clone()), &ctx)
            .await
            .unwrap();
        assert_eq!(again.string(keys::DOB), Some("1990-06-01"));
    }

    #[tokio::test]
    async fn create_roles_must_be_a_list() {
        let v = validator();
        let ctx = RequestContext::with_generated_id();
        let err = v
            .validate_create(
                &create(json!({
                    "firstName": "Amy",
                    "email": "amy@example.com",
                    "roles": "PUBLIC"
                })),
                &ctx,
            )
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::data_type("roles", "list"));
    }

    #[tokio::test]
    async fn create_v1_requires_user_name() {
        let v = validator();
        let ctx = RequestContext::with_generated_id();
        let err = v
            .validate_create_v1(
                &request(
                    UserOperation::CreateV1,
                    json!({"firstName": "Amy", "email": "amy@example.com"}),
                ),
                &ctx,
            )
            .await
            .unwrap_err();
        assert_eq!(err, ValidationError::mandatory_param("userName"));
    }

    #[test]
    fn create_v3_skips_taxonomy_but_checks_formats() {
        let v = validator();
        let ok = request(
            UserOperation::CreateV3,
            json!({"firstName": "Amy", "managedBy": "parent-uuid", "userType": "astronaut"}),
        );
        // unknown userType passes here: v3 has no taxonomy resolution
        assert!(v.validate_create_v3(&ok).is_ok());

        let bad_email = request(
            UserOperation::CreateV3,
            json!({"firstName": "Amy", "email": "nope"}),
        );
        assert_eq!(
            v.validate_create_v3(&bad_email).unwrap_err(),
            ValidationError::InvalidEmailFormat
        );
    }

    #[test]
    fn create_v4_adds_framework_shape() {
        let v = validator();
        let err = v
            .validate_create_v4(&request(
                UserOperation::CreateV4,
                json!({
                    "firstName": "Amy",
                    "email": "amy@example.com",
                    "framework": {"id": ["a", "b"]}
                }),
            ))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidParameterSize {
                param: "framework.id".into(),
                expected: 1,
                actual: 2
            }
        );

        let ok = v.validate_create_v4(&request(
            UserOperation::CreateV4,
            json!({
                "firstName": "Amy",
                "email": "amy@example.com",
                "framework": {"id": ["ncf"]}
            }),
        ));
        assert!(ok.is_ok());
    }

    #[test]
    fn update_rejects_managed_by_even_blank() {
        let v = validator();
        for managed_by in [json!(""), json!("someone"), json!(null)] {
            let err = v
                .validate_update(&update(json!({"userId": "u1", "managedBy": managed_by})))
                .unwrap_err();
            assert_eq!(err, ValidationError::ManagedByNotAllowed);
        }
    }

    #[test]
    fn update_rejects_blank_phone_or_email() {
        let v = validator();
        let err = v
            .validate_update(&update(json!({"userId": "u1", "email": ""})))
            .unwrap_err();
        assert_eq!(err, ValidationError::invalid_param_value("email", ""));
    }

    #[test]
    fn update_needs_user_id_or_external_id_triple() {
        let v = validator();
        let err = v
            .validate_update(&update(json!({"firstName": "Amy"})))
            .unwrap_err();
        assert!(matches!(err, ValidationError::MandatoryParamMissing { .. }));

        let ok = update(json!({
            "externalId": "x1",
            "externalIdProvider": "ap",
            "externalIdType": "declared-ext-id"
        }));
        assert!(v.validate_update(&ok).is_ok());
    }

    #[test]
    fn update_rejects_immutable_fields() {
        let v = validator();
        let err = v
            .validate_update(&update(json!({"userId": "u1", "channel": "ch"})))
            .unwrap_err();
        assert_eq!(err, ValidationError::invalid_request_param("channel"));
    }

    #[test]
    fn update_first_name_must_be_non_blank_when_present() {
        let v = validator();
        let err = v
            .validate_update(&update(json!({"userId": "u1", "firstName": " "})))
            .unwrap_err();
        assert_eq!(err, ValidationError::FirstNameRequired);
    }

    #[test]
    fn update_roles_empty_list_is_distinct_from_wrong_type() {
        let v = validator();
        let err = v
            .validate_update(&update(json!({"userId": "u1", "roles": []})))
            .unwrap_err();
        assert_eq!(err, ValidationError::RolesRequired);

        let err = v
            .validate_update(&update(json!({"userId": "u1", "roles": "PUBLIC"})))
            .unwrap_err();
        assert_eq!(err, ValidationError::data_type("roles", "list"));
    }

    #[test]
    fn update_variant_profile_user_type_exclusion() {
        let v = validator();
        // legacy update rejects the plural key
        let err = v
            .validate_update(&update(json!({"userId": "u1", "profileUserTypes": [{"type": "teacher"}]})))
            .unwrap_err();
        assert_eq!(err, ValidationError::invalid_request_param("profileUserTypes"));

        // v3 rejects the singular key and accepts the plural
        let err = v
            .validate_update(&request(
                UserOperation::UpdateV3,
                json!({"userId": "u1", "profileUserType": {"type": "teacher"}}),
            ))
            .unwrap_err();
        assert_eq!(err, ValidationError::invalid_request_param("profileUserType"));

        let ok = request(
            UserOperation::UpdateV3,
            json!({"userId": "u1", "profileUserTypes": [{"type": "teacher"}]}),
        );
        assert!(v.validate_update(&ok).is_ok());

        let err = v
            .validate_update(&request(
                UserOperation::UpdateV3,
                json!({"userId": "u1", "profileUserTypes": []}),
            ))
            .unwrap_err();
        assert_eq!(err, ValidationError::ProfileUserTypesRequired);
    }

    #[test]
    fn update_rejects_organisations_key() {
        let v = validator();
        let err = v
            .validate_update(&update(json!({"userId": "u1", "organisations": []})))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnsupportedField {
                field: "organisations".into()
            }
        );
    }

    #[test]
    fn update_external_id_triple_all_or_nothing() {
        let v = validator();
        let err = v
            .validate_update(&update(json!({
                "userId": "u1",
                "externalId": "x1",
                "externalIdProvider": "ap"
            })))
            .unwrap_err();
        assert!(matches!(err, ValidationError::DependentParamsMissing { .. }));
    }

    #[test]
    fn update_validates_recovery_contacts() {
        let v = validator();
        let err = v
            .validate_update(&update(json!({"userId": "u1", "recoveryEmail": "nope"})))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmailFormat);
    }

    #[test]
    fn lookup_key_must_be_known() {
        let v = validator();
        let err = v
            .validate_lookup(&request(
                UserOperation::Lookup,
                json!({"key": "ssn", "value": "123"}),
            ))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { ref param, .. } if param == "key"));

        for key in ["email", "phone", "username", "id"] {
            let ok = request(UserOperation::Lookup, json!({"key": key, "value": "x"}));
            assert!(v.validate_lookup(&ok).is_ok());
        }

        let err = v
            .validate_lookup(&request(UserOperation::Lookup, json!({"key": "email"})))
            .unwrap_err();
        assert_eq!(err, ValidationError::mandatory_param("value"));
    }

    #[test]
    fn verify_and_forgot_password_single_fields() {
        let v = validator();
        assert_eq!(
            v.validate_verify(&request(UserOperation::Verify, json!({})))
                .unwrap_err(),
            ValidationError::LoginIdRequired
        );
        assert!(
            v.validate_verify(&request(UserOperation::Verify, json!({"loginId": "amy"})))
                .is_ok()
        );

        assert_eq!(
            v.validate_forgot_password(&request(UserOperation::ForgotPassword, json!({})))
                .unwrap_err(),
            ValidationError::UserNameRequired
        );
    }

    #[test]
    fn assign_role_rules() {
        let v = validator();
        assert_eq!(
            v.validate_assign_role(&request(UserOperation::AssignRole, json!({})))
                .unwrap_err(),
            ValidationError::UserIdRequired
        );
        assert_eq!(
            v.validate_assign_role(&request(
                UserOperation::AssignRole,
                json!({"userId": "u1", "roles": []})
            ))
            .unwrap_err(),
            ValidationError::RolesRequired
        );
        assert_eq!(
            v.validate_assign_role(&request(
                UserOperation::AssignRole,
                json!({"userId": "u1", "roles": ["PUBLIC"]})
            ))
            .unwrap_err(),
            ValidationError::mandatory_param("organisationId or (externalId, provider)")
        );
        assert!(
            v.validate_assign_role(&request(
                UserOperation::AssignRole,
                json!({"userId": "u1", "roles": ["PUBLIC"], "organisationId": "org1"})
            ))
            .is_ok()
        );
        assert!(
            v.validate_assign_role(&request(
                UserOperation::AssignRole,
                json!({"userId": "u1", "roles": ["PUBLIC"], "externalId": "x", "provider": "p"})
            ))
            .is_ok()
        );
    }

    #[test]
    fn merge_account_field_and_header_errors_are_distinct() {
        let v = validator();
        let base = json!({"fromAccountId": "a", "toAccountId": "b"});

        assert_eq!(
            v.validate_merge_account(
                &request(UserOperation::MergeAccount, json!({"toAccountId": "b"})),
                Some("t1"),
                Some("t2")
            )
            .unwrap_err(),
            ValidationError::FromAccountIdRequired
        );
        assert_eq!(
            v.validate_merge_account(
                &request(UserOperation::MergeAccount, base.clone()),
                None,
                Some("t2")
            )
            .unwrap_err(),
            ValidationError::mandatory_header("x-authenticated-user-token")
        );
        assert_eq!(
            v.validate_merge_account(
                &request(UserOperation::MergeAccount, base.clone()),
                Some("t1"),
                Some(" ")
            )
            .unwrap_err(),
            ValidationError::mandatory_header("x-source-user-token")
        );
        assert!(
            v.validate_merge_account(
                &request(UserOperation::MergeAccount, base),
                Some("t1"),
                Some("t2")
            )
            .is_ok()
        );
    }

    #[test]
    fn declare_defaults_missing_persona() {
        let v = validator();
        let req = request(
            UserOperation::Declare,
            json!({"declarations": [
                {"userId": "u1", "orgId": "o1"},
                {"userId": "u2", "orgId": "o2", "persona": "teacher"}
            ]}),
        );
        let normalized = v.validate_declare(&req).unwrap();
        let declarations = normalized.list(keys::DECLARATIONS).unwrap();
        assert_eq!(declarations[0]["persona"], json!("default"));
        assert_eq!(declarations[1]["persona"], json!("teacher"));
        // inbound document untouched
        assert!(req.document.list(keys::DECLARATIONS).unwrap()[0]
            .get("persona")
            .is_none());
    }

    #[test]
    fn declare_failures_are_rewrapped_client_errors() {
        let v = validator();
        let err = v
            .validate_declare(&request(UserOperation::Declare, json!({})))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDeclaration { ref message }
            if message.contains("declarations")));

        let err = v
            .validate_declare(&request(
                UserOperation::Declare,
                json!({"declarations": [{"userId": "u1"}]}),
            ))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDeclaration { ref message }
            if message.contains("userId")));

        let err = v
            .validate_declare(&request(
                UserOperation::Declare,
                json!({"declarations": ["not-an-object"]}),
            ))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDeclaration { .. }));
    }

    #[test]
    fn standalone_uuid_and_location_type() {
        let v = validator();
        assert!(v.validate_user_id("").is_ok());
        assert!(v.validate_user_id("not-a-uuid").is_err());
        assert!(v.validate_location_type("District").is_ok());
        assert!(v.validate_location_type("galaxy").is_err());
    }
}
