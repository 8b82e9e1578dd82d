//! Error types for user-lifecycle request validation.
//!
//! Every validation failure is a single terminal error: the first violated
//! rule in the orchestration order is the one reported. Each variant carries
//! a machine-readable code, a templated human-readable message with the
//! offending field/value interpolated, and an HTTP-style client/server
//! classification.

/// Classification of a validation failure.
///
/// Client errors describe malformed or invalid input and are safe to report
/// verbatim to the caller. Server errors indicate a misconfigured deployment
/// (the lone case: taxonomy configuration resolving to empty after fallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Client,
    Server,
}

/// Validation failures raised by the request validation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// None of email, phone or managedBy supplied on a create request
    #[error("Either email, phone or managedBy is required")]
    EmailOrPhoneOrManagedByRequired,

    /// managedBy supplied together with a non-blank email or phone
    #[error("Only one of email, phone or managedBy must be provided")]
    OnlyEmailOrPhoneOrManagedByRequired,

    /// Mandatory request parameter is missing or blank
    #[error("Mandatory parameter '{param}' is missing")]
    MandatoryParamMissing { param: String },

    /// Mandatory header is missing or blank
    #[error("Mandatory header parameter '{header}' is missing")]
    MandatoryHeaderMissing { header: String },

    /// Mandatory list parameter present but empty
    #[error("Mandatory parameter '{param}' is empty")]
    MandatoryParamEmpty { param: String },

    /// Value not in the allowed set for a parameter
    #[error("Invalid value '{value}' for parameter '{param}', allowed values are {allowed:?}")]
    InvalidValue {
        param: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Value rejected for a parameter (no enumerable allowed set)
    #[error("Invalid value '{value}' supplied for parameter '{param}'")]
    InvalidParameterValue { param: String, value: String },

    /// Parameter not acceptable in this request at all
    #[error("Invalid request parameter '{param}'")]
    InvalidRequestParameter { param: String },

    /// Parameter present with the wrong JSON type
    #[error("Data type of '{field}' should be '{expected}'")]
    DataTypeError { field: String, expected: String },

    /// Parameters that must be supplied together were partially supplied
    #[error("Missing dependent parameters, please provide {params} together")]
    DependentParamsMissing { params: String },

    /// Field not supported by this operation
    #[error("Unsupported field '{field}'")]
    UnsupportedField { field: String },

    /// List parameter of the wrong length
    #[error("Invalid size for parameter '{param}', expected {expected}, got {actual}")]
    InvalidParameterSize {
        param: String,
        expected: usize,
        actual: usize,
    },

    #[error("Email format is invalid")]
    InvalidEmailFormat,

    #[error("Phone number format is invalid")]
    InvalidPhoneFormat,

    /// Phone number carried an inline country code prefix
    #[error("Phone number must not contain a country code, provide it separately")]
    PhoneWithCountryCode,

    #[error("Invalid country code")]
    InvalidCountryCode,

    #[error("Password does not satisfy the password policy")]
    PasswordPolicyViolation,

    /// Date of birth not in the expected canonical format
    #[error("Date '{value}' is not in '{format}' format")]
    InvalidDateFormat { value: String, format: String },

    /// managedBy cannot be changed via update
    #[error("managedBy is not allowed in an update request")]
    ManagedByNotAllowed,

    #[error("firstName cannot be blank")]
    FirstNameRequired,

    #[error("loginId is required")]
    LoginIdRequired,

    #[error("userId is required")]
    UserIdRequired,

    #[error("userName is required")]
    UserNameRequired,

    #[error("fromAccountId is required")]
    FromAccountIdRequired,

    #[error("toAccountId is required")]
    ToAccountIdRequired,

    #[error("roles must be a non-empty list")]
    RolesRequired,

    #[error("profileUserTypes must be a non-empty list")]
    ProfileUserTypesRequired,

    #[error("Invalid root organisation id")]
    InvalidRootOrgId,

    /// Two external identifiers share a (provider, idType) pair
    #[error("Duplicate external id for idType '{id_type}' and provider '{provider}'")]
    DuplicateExternalIds { id_type: String, provider: String },

    /// Malformed self-declaration payload, re-wrapped from an internal error
    #[error("Invalid declaration request: {message}")]
    InvalidDeclaration { message: String },

    /// Taxonomy configuration resolved to empty even after fallback
    #[error("User type configuration is empty for scope '{scope}'")]
    UserTypeConfigEmpty { scope: String },
}

impl ValidationError {
    /// Create a mandatory-parameter error.
    pub fn mandatory_param(param: impl Into<String>) -> Self {
        Self::MandatoryParamMissing {
            param: param.into(),
        }
    }

    /// Create a mandatory-header error.
    pub fn mandatory_header(header: impl Into<String>) -> Self {
        Self::MandatoryHeaderMissing {
            header: header.into(),
        }
    }

    /// Create a data-type error.
    pub fn data_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::DataTypeError {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Create an invalid-parameter-value error.
    pub fn invalid_param_value(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidParameterValue {
            param: param.into(),
            value: value.into(),
        }
    }

    /// Create an invalid-request-parameter error.
    pub fn invalid_request_param(param: impl Into<String>) -> Self {
        Self::InvalidRequestParameter {
            param: param.into(),
        }
    }

    /// Stable machine-readable code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmailOrPhoneOrManagedByRequired => "EMAIL_OR_PHONE_OR_MANAGED_BY_REQUIRED",
            Self::OnlyEmailOrPhoneOrManagedByRequired => {
                "ONLY_EMAIL_OR_PHONE_OR_MANAGED_BY_REQUIRED"
            }
            Self::MandatoryParamMissing { .. } => "MANDATORY_PARAMETER_MISSING",
            Self::MandatoryHeaderMissing { .. } => "MANDATORY_HEADER_PARAMETER_MISSING",
            Self::MandatoryParamEmpty { .. } => "MANDATORY_PARAMETER_EMPTY",
            Self::InvalidValue { .. } => "INVALID_VALUE",
            Self::InvalidParameterValue { .. } => "INVALID_PARAMETER_VALUE",
            Self::InvalidRequestParameter { .. } => "INVALID_REQUEST_PARAMETER",
            Self::DataTypeError { .. } => "DATA_TYPE_ERROR",
            Self::DependentParamsMissing { .. } => "DEPENDENT_PARAMETERS_MISSING",
            Self::UnsupportedField { .. } => "UNSUPPORTED_FIELD",
            Self::InvalidParameterSize { .. } => "INVALID_PARAMETER_SIZE",
            Self::InvalidEmailFormat => "EMAIL_FORMAT_ERROR",
            Self::InvalidPhoneFormat => "PHONE_FORMAT_ERROR",
            Self::PhoneWithCountryCode => "INVALID_PHONE_NUMBER",
            Self::InvalidCountryCode => "INVALID_COUNTRY_CODE",
            Self::PasswordPolicyViolation => "PASSWORD_POLICY_VIOLATION",
            Self::InvalidDateFormat { .. } => "DATE_FORMAT_ERROR",
            Self::ManagedByNotAllowed => "MANAGED_BY_NOT_ALLOWED",
            Self::FirstNameRequired => "FIRST_NAME_REQUIRED",
            Self::LoginIdRequired => "LOGIN_ID_REQUIRED",
            Self::UserIdRequired => "USER_ID_REQUIRED",
            Self::UserNameRequired => "USER_NAME_REQUIRED",
            Self::FromAccountIdRequired => "FROM_ACCOUNT_ID_REQUIRED",
            Self::ToAccountIdRequired => "TO_ACCOUNT_ID_REQUIRED",
            Self::RolesRequired => "ROLES_REQUIRED",
            Self::ProfileUserTypesRequired => "PROFILE_USER_TYPES_REQUIRED",
            Self::InvalidRootOrgId => "INVALID_ROOT_ORGANISATION_ID",
            Self::DuplicateExternalIds { .. } => "DUPLICATE_EXTERNAL_IDS",
            Self::InvalidDeclaration { .. } => "INVALID_DECLARATION",
            Self::UserTypeConfigEmpty { .. } => "USER_TYPE_CONFIG_EMPTY",
        }
    }

    /// Client/server classification of this failure.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UserTypeConfigEmpty { .. } => ErrorClass::Server,
            _ => ErrorClass::Client,
        }
    }

    /// HTTP status the transport layer should map this failure to.
    pub fn http_status(&self) -> u16 {
        match self.class() {
            ErrorClass::Client => 400,
            ErrorClass::Server => 500,
        }
    }
}

/// Result alias for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
