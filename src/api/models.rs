use axum::{Json, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::WhoOwesError;

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SignUpResponse {
    pub user_id: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub title: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateGroupResponse {
    pub group_id: String,
    pub title: String,
    pub creator_user_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub name: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AddMemberResponse {
    pub member_id: String,
    pub name: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddPaymentRequest {
    pub member_id: String,
    /// Accepts a JSON number or string
    pub amount: Decimal,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub payment_date: DateTime<Utc>,
    pub description: String,
}

// Error response struct
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for WhoOwesError to implement IntoResponse
pub struct ApiError(pub WhoOwesError);

impl From<WhoOwesError> for ApiError {
    fn from(err: WhoOwesError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            WhoOwesError::InvalidInput(..)
            | WhoOwesError::ReservedMemberName(_)
            | WhoOwesError::UnknownPaymentMember(_)
            | WhoOwesError::GroupHasPayments(_)
            | WhoOwesError::MemberHasPayments(_)
            | WhoOwesError::CannotRemoveSelf => StatusCode::BAD_REQUEST,
            WhoOwesError::InvalidCredentials | WhoOwesError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            WhoOwesError::NotGroupCreator(_) => StatusCode::FORBIDDEN,
            WhoOwesError::GroupNotFound(_) | WhoOwesError::MemberNotFound(_) | WhoOwesError::PaymentNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            WhoOwesError::DuplicateMemberName(_) | WhoOwesError::EmailAlreadyRegistered(_) => StatusCode::CONFLICT,
            WhoOwesError::StorageError(_) | WhoOwesError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}
