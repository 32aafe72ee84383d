//! Caller identity extraction from an `Authorization: Bearer <token>` header.
//!
//! This is the only place tokens are parsed. Handlers that take an
//! [`AuthenticatedUser`] receive an owner identifier that has already been
//! verified, and pass it straight to the note service.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use notelink_core::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let user_id = state.tokens().verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            ApiError::from(e)
        })?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// Pull the token out of the Authorization header.
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| {
            ApiError::Unauthorized("Authorization header contains invalid characters".to_string())
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must be Bearer <token>".to_string())
        })?;

    Ok(token)
}
