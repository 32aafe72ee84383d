//! Route definitions for the HTTP API.

pub mod auth;
pub mod health;
pub mod notes;
pub mod search;

use axum::{Router, middleware};

use crate::middleware::rate_limit::enforce_rate_limit;
use crate::state::AppState;

/// Build the complete router with all routes.
///
/// API routes sit behind the rate limiter; `/health` does not.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::routes())
        .merge(notes::routes())
        .merge(search::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_rate_limit,
        ));

    Router::new()
        .merge(health::routes())
        .merge(api)
        .with_state(state)
}
