//! Search route.
//!
//! GET /api/search?q=<query> runs the storage layer's full-text search over
//! the caller's notes. An empty or missing query is rejected here; the note
//! service passes whatever it receives to storage unchanged.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use notelink_core::Note;

use crate::error::{ApiError, ApiResult};
use crate::extract::AuthenticatedUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub notes: Vec<Note>,
}

/// GET /api/search
async fn search_notes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Query(params), _): WithRejection<Query<SearchParams>, ApiError>,
) -> ApiResult<Json<SearchResponse>> {
    if params.q.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "query parameter 'q' is required".to_string(),
        ));
    }

    let notes = state.notes().search(user.user_id, &params.q).await?;
    Ok(Json(SearchResponse {
        query: params.q,
        notes,
    }))
}

/// Build search routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_notes))
}
