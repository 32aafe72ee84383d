//! Application state shared across handlers.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use notelink_store::{CredentialStore, NoteRepository};

use crate::config::ServerConfig;
use crate::services::{AccountService, NoteService};
use crate::token::TokenService;

/// Application state shared across all handlers.
///
/// Everything in here is constructed once at startup and is read-only
/// afterwards (the rate limiter is internally synchronized).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// Token issuance and verification.
    tokens: Arc<TokenService>,
    /// Signup and login.
    accounts: Arc<AccountService>,
    /// Owner-scoped note access.
    notes: Arc<NoteService>,
    /// Process-wide request rate limiter.
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    /// Create application state over a single store implementing both
    /// storage traits.
    pub fn new<S>(store: Arc<S>, config: ServerConfig) -> Self
    where
        S: CredentialStore + NoteRepository + 'static,
    {
        Self::from_parts(store.clone(), store, config)
    }

    /// Create application state over separate credential and note stores.
    pub fn from_parts(
        credentials: Arc<dyn CredentialStore>,
        notes: Arc<dyn NoteRepository>,
        config: ServerConfig,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt_secret, config.jwt_expiry_hours));
        let accounts = Arc::new(AccountService::new(
            credentials,
            tokens.clone(),
            config.storage_timeout,
        ));
        let notes = Arc::new(NoteService::new(notes, config.storage_timeout));

        let per_second = NonZeroU32::new(config.rate_limit_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(config.rate_limit_burst).unwrap_or(NonZeroU32::MIN);
        let limiter = Arc::new(RateLimiter::direct(
            Quota::per_second(per_second).allow_burst(burst),
        ));

        Self {
            config: Arc::new(config),
            tokens,
            accounts,
            notes,
            limiter,
        }
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get a reference to the token service.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Get a reference to the account service.
    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    /// Get a reference to the note service.
    pub fn notes(&self) -> &NoteService {
        &self.notes
    }

    /// Get a reference to the rate limiter.
    pub fn limiter(&self) -> &DefaultDirectRateLimiter {
        &self.limiter
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
