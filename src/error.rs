use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every way a request can fail. Each variant carries the exact message
/// the client sees; infrastructure details stay in the server log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request method or missing action.")]
    InvalidRequest,
    #[error("Invalid action.")]
    InvalidAction,
    #[error("Missing required fields.")]
    MissingFields,
    #[error("CSRF token validation failed.")]
    CsrfMismatch,
    #[error("User not logged in.")]
    NotLoggedIn,
    #[error("Invalid email.")]
    InvalidEmail,
    #[error("Email already exists.")]
    EmailTaken,
    #[error("User not found.")]
    UserNotFound,
    #[error("Incorrect password.")]
    IncorrectPassword,
    #[error("{0} not found.")]
    NotFound(&'static str),
    #[error("Quantity must be positive.")]
    InvalidQuantity,
    #[error("Something went wrong.")]
    Database(#[source] sqlx::Error),
    #[error("Something went wrong.")]
    Internal(#[source] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest | Self::InvalidAction | Self::MissingFields => {
                StatusCode::BAD_REQUEST
            }
            Self::CsrfMismatch => StatusCode::FORBIDDEN,
            Self::NotLoggedIn | Self::UserNotFound | Self::IncorrectPassword => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidEmail | Self::InvalidQuantity => StatusCode::BAD_REQUEST,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(e) => error!(error = %e, "database error"),
            ApiError::Internal(e) => error!(error = %e, "internal error"),
            _ => {}
        }
        let body = Json(json!({ "success": false, "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}
