//! The closed set of user-lifecycle operations this engine validates.

use crate::request::document::RequestDocument;

/// Operation tag carried by an inbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserOperation {
    Create,
    CreateV1,
    CreateV3,
    CreateV4,
    Update,
    UpdateV3,
    Lookup,
    Verify,
    AssignRole,
    ForgotPassword,
    MergeAccount,
    Declare,
}

impl UserOperation {
    /// Wire tag for this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "createUser",
            Self::CreateV1 => "createUserV1",
            Self::CreateV3 => "createUserV3",
            Self::CreateV4 => "createUserV4",
            Self::Update => "updateUser",
            Self::UpdateV3 => "updateUserV3",
            Self::Lookup => "userLookup",
            Self::Verify => "verifyUser",
            Self::AssignRole => "assignRoles",
            Self::ForgotPassword => "forgotPassword",
            Self::MergeAccount => "mergeUser",
            Self::Declare => "updateUserDeclarations",
        }
    }

    /// Parse a wire tag.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "createUser" => Some(Self::Create),
            "createUserV1" => Some(Self::CreateV1),
            "createUserV3" => Some(Self::CreateV3),
            "createUserV4" => Some(Self::CreateV4),
            "updateUser" => Some(Self::Update),
            "updateUserV3" => Some(Self::UpdateV3),
            "userLookup" => Some(Self::Lookup),
            "verifyUser" => Some(Self::Verify),
            "assignRoles" => Some(Self::AssignRole),
            "forgotPassword" => Some(Self::ForgotPassword),
            "mergeUser" => Some(Self::MergeAccount),
            "updateUserDeclarations" => Some(Self::Declare),
            _ => None,
        }
    }

    /// Whether this is one of the create-family operations.
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            Self::Create | Self::CreateV1 | Self::CreateV3 | Self::CreateV4
        )
    }
}

impl std::fmt::Display for UserOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound request: operation tag plus document payload.
#[derive(Debug, Clone)]
pub struct UserRequest {
    pub operation: UserOperation,
    pub document: RequestDocument,
}

impl UserRequest {
    pub fn new(operation: UserOperation, document: RequestDocument) -> Self {
        Self {
            operation,
            document,
        }
    }
}
