//! Note routes.
//!
//! - GET /api/notes - List the caller's notes
//! - POST /api/notes - Create a note
//! - GET /api/notes/{id} - Fetch one note
//! - PUT /api/notes/{id} - Replace title and content
//! - DELETE /api/notes/{id} - Delete a note
//! - POST /api/notes/{id}/share - Copy a note to another user
//!
//! Every handler takes an [`AuthenticatedUser`]; the note service scopes
//! each operation to that user.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use notelink_core::{Note, NoteId, UserId};

use crate::error::{ApiError, ApiResult};
use crate::extract::AuthenticatedUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body for creating or updating a note. Both fields must be present;
/// either may be empty.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub title: String,
    pub content: String,
}

/// Response for GET /api/notes.
#[derive(Debug, Serialize)]
pub struct ListNotesResponse {
    pub notes: Vec<Note>,
}

/// Request body for sharing a note.
#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    /// The user to receive a copy.
    pub target_user_id: String,
}

/// Response for a successful share.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// The note that was copied.
    pub source_id: NoteId,
    /// The new note owned by the target user.
    pub id: NoteId,
    pub owner_id: UserId,
    pub shared: bool,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_note_id(raw: &str) -> ApiResult<NoteId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid note id: {}", raw)))
}

fn parse_user_id(raw: &str) -> ApiResult<UserId> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid user id: {}", raw)))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /api/notes
async fn list_notes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ListNotesResponse>> {
    let notes = state.notes().list(user.user_id).await?;
    Ok(Json(ListNotesResponse { notes }))
}

/// POST /api/notes
async fn create_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Json(request), _): WithRejection<Json<NoteRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Note>)> {
    let note = state
        .notes()
        .create(request.title, request.content, user.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// GET /api/notes/{id}
async fn get_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> ApiResult<Json<Note>> {
    let id = parse_note_id(&id)?;
    let note = state.notes().get(id, user.user_id).await?;
    Ok(Json(note))
}

/// PUT /api/notes/{id}
async fn update_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Json(request), _): WithRejection<Json<NoteRequest>, ApiError>,
) -> ApiResult<Json<Note>> {
    let id = parse_note_id(&id)?;
    let note = state
        .notes()
        .update(id, user.user_id, request.title, request.content)
        .await?;
    Ok(Json(note))
}

/// DELETE /api/notes/{id}
async fn delete_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
) -> ApiResult<StatusCode> {
    let id = parse_note_id(&id)?;
    state.notes().delete(id, user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/notes/{id}/share
///
/// The target receives an independent copy; the caller's note is unchanged.
async fn share_note(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(Path(id), _): WithRejection<Path<String>, ApiError>,
    WithRejection(Json(request), _): WithRejection<Json<ShareRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<ShareResponse>)> {
    let id = parse_note_id(&id)?;
    let target = parse_user_id(&request.target_user_id)?;

    let copy = state.notes().share(id, user.user_id, target).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShareResponse {
            source_id: id,
            id: copy.id,
            owner_id: copy.owner_id,
            shared: copy.shared,
        }),
    ))
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route(
            "/api/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .route("/api/notes/{id}/share", post(share_note))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::routes::build_router;
    use crate::routes::test_support::{call, register};
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn test_requires_bearer_token() {
        let (state, _) = test_state();
        let app = build_router(state);

        let (status, body) = call(&app, "GET", "/api/notes", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, _) = call(&app, "GET", "/api/notes", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (alice, token) = register(&app, "alice").await;

        let (status, created) = call(
            &app,
            "POST",
            "/api/notes",
            Some(&token),
            Some(json!({"title": "t1", "content": "c1"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["owner_id"], alice.to_string());
        assert_eq!(created["shared"], false);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) =
            call(&app, "GET", &format!("/api/notes/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = call(
            &app,
            "PUT",
            &format!("/api/notes/{}", id),
            Some(&token),
            Some(json!({"title": "t2", "content": "c2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["title"], "t2");
        assert_ne!(updated["updated_at"], created["updated_at"]);

        let (status, listed) = call(&app, "GET", "/api/notes", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed["notes"].as_array().unwrap().len(), 1);

        let (status, _) =
            call(&app, "DELETE", &format!("/api/notes/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) =
            call(&app, "GET", &format!("/api/notes/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_foreign_note_is_not_found() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (_, alice) = register(&app, "alice").await;
        let (_, bob) = register(&app, "bob").await;

        let (_, created) = call(
            &app,
            "POST",
            "/api/notes",
            Some(&alice),
            Some(json!({"title": "private", "content": "mine"})),
        )
        .await;
        let uri = format!("/api/notes/{}", created["id"].as_str().unwrap());

        let (status, _) = call(&app, "GET", &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(
            &app,
            "PUT",
            &uri,
            Some(&bob),
            Some(json!({"title": "x", "content": "y"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = call(&app, "DELETE", &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, fetched) = call(&app, "GET", &uri, Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "private");
    }

    #[tokio::test]
    async fn test_malformed_ids_are_bad_requests() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (_, token) = register(&app, "alice").await;

        let (status, body) = call(&app, "GET", "/api/notes/not-an-id", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");

        let (_, created) = call(
            &app,
            "POST",
            "/api/notes",
            Some(&token),
            Some(json!({"title": "t", "content": "c"})),
        )
        .await;
        let (status, _) = call(
            &app,
            "POST",
            &format!("/api/notes/{}/share", created["id"].as_str().unwrap()),
            Some(&token),
            Some(json!({"target_user_id": "bob"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_incomplete_bodies_are_bad_requests() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (_, token) = register(&app, "alice").await;
        let (bob_id, _) = register(&app, "bob").await;

        for body in [json!({"content": "c"}), json!({"title": "t"}), json!([1, 2])] {
            let (status, response) =
                call(&app, "POST", "/api/notes", Some(&token), Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["error"]["code"], "BAD_REQUEST");
        }

        // No JSON content type at all.
        let (status, response) = call(&app, "POST", "/api/notes", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], "BAD_REQUEST");

        let (_, created) = call(
            &app,
            "POST",
            "/api/notes",
            Some(&token),
            Some(json!({"title": "t", "content": "c"})),
        )
        .await;
        let uri = format!("/api/notes/{}", created["id"].as_str().unwrap());

        let (status, response) =
            call(&app, "PUT", &uri, Some(&token), Some(json!({"content": "c2"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], "BAD_REQUEST");

        let (status, response) = call(
            &app,
            "POST",
            &format!("{}/share", uri),
            Some(&token),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"]["code"], "BAD_REQUEST");

        let (status, _) = call(
            &app,
            "POST",
            &format!("{}/share", uri),
            Some(&token),
            Some(json!({"target_user_id": bob_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // Nothing partial was written.
        let (_, listed) = call(&app, "GET", "/api/notes", Some(&token), None).await;
        assert_eq!(listed["notes"].as_array().unwrap().len(), 1);
        assert_eq!(listed["notes"][0]["content"], "c");
    }

    /// Signup alice, login, create, share with bob, delete the original;
    /// bob's copy survives unchanged.
    #[tokio::test]
    async fn test_share_scenario() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (_, alice) = register(&app, "alice").await;
        let (bob_id, bob) = register(&app, "bob").await;

        let (_, n1) = call(
            &app,
            "POST",
            "/api/notes",
            Some(&alice),
            Some(json!({"title": "t1", "content": "c1"})),
        )
        .await;
        let n1_id = n1["id"].as_str().unwrap().to_string();

        let (status, shared) = call(
            &app,
            "POST",
            &format!("/api/notes/{}/share", n1_id),
            Some(&alice),
            Some(json!({"target_user_id": bob_id.to_string()})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(shared["source_id"], n1_id.as_str());
        assert_eq!(shared["owner_id"], bob_id.to_string());
        assert_eq!(shared["shared"], true);
        let n2_id = shared["id"].as_str().unwrap().to_string();
        assert_ne!(n2_id, n1_id);

        let (_, n2_before) =
            call(&app, "GET", &format!("/api/notes/{}", n2_id), Some(&bob), None).await;

        let (status, _) =
            call(&app, "DELETE", &format!("/api/notes/{}", n1_id), Some(&alice), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, n2_after) =
            call(&app, "GET", &format!("/api/notes/{}", n2_id), Some(&bob), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(n2_after, n2_before);
        assert_eq!(n2_after["title"], "t1");
        assert_eq!(n2_after["content"], "c1");

        // Alice cannot reach bob's copy.
        let (status, _) =
            call(&app, "GET", &format!("/api/notes/{}", n2_id), Some(&alice), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_sharing_foreign_note_is_not_found() {
        let (state, _) = test_state();
        let app = build_router(state);
        let (alice_id, alice) = register(&app, "alice").await;
        let (_, bob) = register(&app, "bob").await;

        let (_, created) = call(
            &app,
            "POST",
            "/api/notes",
            Some(&alice),
            Some(json!({"title": "t", "content": "c"})),
        )
        .await;

        let (status, _) = call(
            &app,
            "POST",
            &format!("/api/notes/{}/share", created["id"].as_str().unwrap()),
            Some(&bob),
            Some(json!({"target_user_id": alice_id.to_string()})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
