//! Process-wide request rate limiting.
//!
//! A single token bucket shared by every request, sized from configuration.
//! Requests over the limit are answered with 429 before reaching a handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Reject the request with 429 if the bucket is empty.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.limiter().check().is_err() {
        tracing::warn!(path = %request.uri().path(), "Rate limit exceeded");
        return ApiError::RateLimited.into_response();
    }

    next.run(request).await
}
