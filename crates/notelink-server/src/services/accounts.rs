//! Authentication service: signup and login.

use std::sync::Arc;
use std::time::Duration;

use notelink_core::{User, UserId, ValidationError, validate_credentials};
use notelink_store::{CredentialStore, NewUser, StoreError};
use tokio::sync::OnceCell;

use crate::password::{self, PasswordError};
use crate::services::bounded;
use crate::token::{TokenError, TokenService};

/// Password hashed once and verified against when a login names an unknown
/// user, so both failure paths do the same work.
const DUMMY_PASSWORD: &str = "notelink-dummy-password";

/// Authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Caller input failed validation. Storage was not touched.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Username unknown or password wrong; which one is not revealed.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Username already registered.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// Any other persistence failure.
    #[error("storage error: {0}")]
    Storage(StoreError),

    /// Token signing failed.
    #[error("token signing failed: {0}")]
    Signing(#[from] TokenError),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(#[from] PasswordError),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateUsername(name) => Self::DuplicateUsername(name),
            other => Self::Storage(other),
        }
    }
}

/// Result of a successful login. The token and the user are separate values;
/// the user never carries credential material.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Orchestrates signup and login over a credential store and a token service.
pub struct AccountService {
    credentials: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    storage_timeout: Duration,
    dummy_hash: OnceCell<String>,
}

impl AccountService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: Arc<TokenService>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            credentials,
            tokens,
            storage_timeout,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Register a new user.
    ///
    /// Input is validated before storage is touched. The returned user has no
    /// password material.
    pub async fn signup(&self, username: &str, password: &str) -> Result<User, AuthError> {
        validate_credentials(username, password)?;

        let password_hash = hash_blocking(password.to_owned()).await?;
        let new_user = NewUser {
            id: UserId::new(),
            username: username.to_owned(),
            password_hash,
        };

        let record = bounded(
            self.storage_timeout,
            "insert_user",
            self.credentials.insert_user(&new_user),
        )
        .await?;

        tracing::info!(user_id = %record.id, username = %record.username, "User signed up");
        Ok(record.into_user())
    }

    /// Check credentials and mint a token.
    ///
    /// An unknown username and a wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let record = bounded(
            self.storage_timeout,
            "find_user_by_username",
            self.credentials.find_user_by_username(username),
        )
        .await?;

        let Some(record) = record else {
            // Burn the same verification cost as a real mismatch.
            let dummy = self.dummy_hash().await?;
            let _ = verify_blocking(password.to_owned(), dummy.to_owned()).await;
            tracing::debug!("Login rejected: unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_blocking(password.to_owned(), record.password_hash.clone()).await? {
            tracing::debug!(user_id = %record.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(record.id)?;
        tracing::info!(user_id = %record.id, username = %record.username, "User logged in");

        Ok(Session {
            user: record.into_user(),
            token,
        })
    }

    async fn dummy_hash(&self) -> Result<&String, AuthError> {
        self.dummy_hash
            .get_or_try_init(|| hash_blocking(DUMMY_PASSWORD.to_owned()))
            .await
    }
}

/// Argon2 is deliberately slow; keep it off the async workers.
async fn hash_blocking(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .map_err(AuthError::from)
}

async fn verify_blocking(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::Hash(e.to_string()))?
        .map_err(AuthError::from)
}
