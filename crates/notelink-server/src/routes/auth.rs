//! Authentication routes: signup and login.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use notelink_core::{User, UserId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body for both signup and login.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_in_hours: u64,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Reject an empty field before it reaches the service.
fn require(field: &'static str, value: &str) -> ApiResult<()> {
    if value.is_empty() {
        return Err(ApiError::Validation {
            field: field.to_string(),
            message: format!("{} is required", field),
        });
    }
    Ok(())
}

/// POST /api/auth/signup
async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CredentialsRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    require("username", &request.username)?;
    require("password", &request.password)?;

    let user = state
        .accounts()
        .signup(&request.username, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CredentialsRequest>, ApiError>,
) -> ApiResult<Json<LoginResponse>> {
    require("username", &request.username)?;
    require("password", &request.password)?;

    let session = state
        .accounts()
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: session.token,
        user: session.user.into(),
        expires_in_hours: state.config().jwt_expiry_hours,
    }))
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    use crate::routes::build_router;
    use crate::routes::test_support::call;
    use crate::state::test_support::test_state;

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        call(app, "POST", uri, None, Some(body)).await
    }

    #[test]
    fn test_credentials_request_deserialize() {
        let json = r#"{"username": "alice", "password": "secret1"}"#;
        let request: CredentialsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "secret1");
    }

    #[tokio::test]
    async fn test_signup_and_login() {
        let (state, _) = test_state();
        let app = build_router(state.clone());
        let creds = json!({"username": "alice", "password": "secret1"});

        let (status, body) = post_json(&app, "/api/auth/signup", creds.clone()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["username"], "alice");
        assert!(body.get("password").is_none());
        let user_id: UserId = serde_json::from_value(body["id"].clone()).unwrap();

        let (status, body) = post_json(&app, "/api/auth/login", creds).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["id"], user_id.to_string());
        assert!(body["user"].get("password").is_none());
        assert_eq!(body["expires_in_hours"], 24);

        let token = body["token"].as_str().unwrap();
        assert_eq!(state.tokens().verify(token).unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_signup_validation_errors() {
        let (state, _) = test_state();
        let app = build_router(state);

        let (status, body) = post_json(
            &app,
            "/api/auth/signup",
            json!({"username": "", "password": "secret1"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = post_json(
            &app,
            "/api/auth/signup",
            json!({"username": "alice", "password": "short"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"].as_str().unwrap().contains("password"));
    }

    #[tokio::test]
    async fn test_duplicate_signup_conflicts() {
        let (state, _) = test_state();
        let app = build_router(state);
        let creds = json!({"username": "alice", "password": "secret1"});

        post_json(&app, "/api/auth/signup", creds.clone()).await;
        let (status, body) = post_json(&app, "/api/auth/signup", creds).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "DUPLICATE_USERNAME");
    }

    #[tokio::test]
    async fn test_bad_login_is_uniform() {
        let (state, _) = test_state();
        let app = build_router(state);
        post_json(
            &app,
            "/api/auth/signup",
            json!({"username": "alice", "password": "secret1"}),
        )
        .await;

        let (wrong_status, wrong_body) = post_json(
            &app,
            "/api/auth/login",
            json!({"username": "alice", "password": "secret2"}),
        )
        .await;
        let (unknown_status, unknown_body) = post_json(
            &app,
            "/api/auth/login",
            json!({"username": "nobody", "password": "secret1"}),
        )
        .await;

        assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_status, unknown_status);
        assert_eq!(wrong_body, unknown_body);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (state, _) = test_state();
        let app = build_router(state);

        for uri in ["/api/auth/signup", "/api/auth/login"] {
            let (status, body) = call(&app, "POST", uri, None, Some(json!("alice"))).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "BAD_REQUEST");

            let (status, body) = call(&app, "POST", uri, None, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"]["code"], "BAD_REQUEST");
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic_500() {
        let (state, store) = test_state();
        let app = build_router(state);
        store.set_offline(true);

        let (status, body) = post_json(
            &app,
            "/api/auth/signup",
            json!({"username": "alice", "password": "secret1"}),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
        assert!(!body["error"]["message"].as_str().unwrap().contains("offline"));
    }
}
