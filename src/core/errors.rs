use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: &str, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.to_string(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum WhoOwesError {
    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Group {0} not found")]
    GroupNotFound(String),

    /// Caller did not create the group
    #[error("User {0} does not have permission to access this group")]
    NotGroupCreator(String),

    #[error("Member {0} not found in the group")]
    MemberNotFound(String),

    #[error("Payment {0} not found in the group")]
    PaymentNotFound(String),

    #[error("Member name '{0}' is reserved and cannot be used")]
    ReservedMemberName(String),

    /// Names are unique per group, ignoring case
    #[error("A member named '{0}' already exists in the group")]
    DuplicateMemberName(String),

    #[error("The authenticated user cannot be removed from the group")]
    CannotRemoveSelf,

    #[error("Cannot remove member {0} because payments reference them")]
    MemberHasPayments(String),

    #[error("Cannot delete group {0} because it contains payments")]
    GroupHasPayments(String),

    /// Payment references a member that is not in the group
    #[error("Payment must reference an existing group member, got {0}")]
    UnknownPaymentMember(String),

    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}
