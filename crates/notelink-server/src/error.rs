//! API error types with JSON responses.
//!
//! Each service error kind maps to one HTTP status. Storage, signing and
//! other internal failures are logged in full and answered with a generic
//! message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use notelink_store::StoreError;

use crate::services::{AuthError, NoteError};
use crate::token::TokenError;

const INTERNAL_MESSAGE: &str = "internal server error";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller input failed validation (400).
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Malformed request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid bearer token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Login failed (401).
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Not found, or not owned by the caller (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Username already registered (409).
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// Rate limit exceeded (429).
    #[error("rate limit exceeded")]
    RateLimited,

    /// Storage failure (500).
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Token signing failure (500).
    #[error("signing error: {0}")]
    Signing(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateUsername(_) => "DUPLICATE_USERNAME",
            Self::RateLimited => "RATE_LIMITED",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Signing(_) => "SIGNING_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateUsername(_) => StatusCode::CONFLICT,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Storage(_) | Self::Signing(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show the client.
    fn public_message(&self) -> String {
        match self {
            Self::Storage(_) | Self::Signing(_) | Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(v) => Self::Validation {
                field: v.field.to_string(),
                message: v.message,
            },
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::DuplicateUsername(name) => Self::DuplicateUsername(name),
            AuthError::Storage(s) => Self::Storage(s),
            AuthError::Signing(t) => Self::Signing(t.to_string()),
            AuthError::Hashing(h) => Self::Internal(h.to_string()),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(e: NoteError) -> Self {
        match e {
            NoteError::NotFound(id) => Self::NotFound(format!("note {}", id)),
            NoteError::Storage(s) => Self::Storage(s),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Signing(msg) => Self::Signing(msg),
            TokenError::Expired => Self::Unauthorized("token expired".to_string()),
            TokenError::InvalidSignature => {
                Self::Unauthorized("token signature is invalid".to_string())
            }
            TokenError::Invalid(_) => Self::Unauthorized("token is malformed".to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.public_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
