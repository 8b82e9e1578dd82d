//! Document key constants for user-lifecycle request payloads.
//!
//! Keeping the key strings in one place avoids typo drift between the
//! operation-scoped validators and their tests.

pub const CHANNEL: &str = "channel";
pub const COUNTRY_CODE: &str = "countryCode";
pub const DECLARATIONS: &str = "declarations";
pub const DOB: &str = "dob";
pub const DOB_VALIDATION_DONE: &str = "dobValidationDone";
pub const EMAIL: &str = "email";
pub const EXTERNAL_ID: &str = "externalId";
pub const EXTERNAL_ID_PROVIDER: &str = "externalIdProvider";
pub const EXTERNAL_ID_TYPE: &str = "externalIdType";
pub const EXTERNAL_IDS: &str = "externalIds";
pub const FIRST_NAME: &str = "firstName";
pub const FRAMEWORK: &str = "framework";
pub const FROM_ACCOUNT_ID: &str = "fromAccountId";
pub const ID: &str = "id";
pub const ID_TYPE: &str = "idType";
pub const KEY: &str = "key";
pub const LOGIN_ID: &str = "loginId";
pub const MANAGED_BY: &str = "managedBy";
pub const OPERATION: &str = "operation";
pub const ORGANISATION_ID: &str = "organisationId";
pub const ORGANISATIONS: &str = "organisations";
pub const ORG_ID: &str = "orgId";
pub const PASSWORD: &str = "password";
pub const PERSONA: &str = "persona";
pub const PHONE: &str = "phone";
pub const PROFILE_USERTYPE: &str = "profileUserType";
pub const PROFILE_USERTYPES: &str = "profileUserTypes";
pub const PROVIDER: &str = "provider";
pub const RECOVERY_EMAIL: &str = "recoveryEmail";
pub const RECOVERY_PHONE: &str = "recoveryPhone";
pub const REGISTERED_ORG_ID: &str = "registeredOrgId";
pub const ROLES: &str = "roles";
pub const ROOT_ORG_ID: &str = "rootOrgId";
pub const SUB_TYPE: &str = "subType";
pub const TO_ACCOUNT_ID: &str = "toAccountId";
pub const TYPE: &str = "type";
pub const USERNAME: &str = "userName";
pub const USER_ID: &str = "userId";
pub const USER_SUB_TYPE: &str = "userSubType";
pub const USER_TYPE: &str = "userType";
pub const VALUE: &str = "value";

/// Header carrying the authenticated-user token for account merges.
pub const X_AUTHENTICATED_USER_TOKEN: &str = "x-authenticated-user-token";
/// Header carrying the source-user token for account merges.
pub const X_SOURCE_USER_TOKEN: &str = "x-source-user-token";
