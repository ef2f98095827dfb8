//! Mapping of domain failures onto HTTP responses.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Body or path parameter could not be understood.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// json for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Domain(DomainError::DuplicateEmail) => (StatusCode::BAD_REQUEST, "DUPLICATE_EMAIL"),
            Self::Domain(DomainError::UserNotFound) => (StatusCode::BAD_REQUEST, "USER_NOT_FOUND"),
            Self::Domain(
                DomainError::MissingEmail | DomainError::MissingUserId | DomainError::WeakPassword,
            )
            | Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Domain(DomainError::AuthenticationFailed | DomainError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            }
            Self::Domain(DomainError::Repository(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Don't expose storage details to clients
        let error = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else if status == StatusCode::UNAUTHORIZED {
            "Authentication failed".to_string()
        } else {
            self.to_string()
        };

        (
            status,
            Json(ErrorResponse {
                error,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}
