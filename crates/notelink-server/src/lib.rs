//! notelink-server: HTTP API server for NoteLink
//!
//! This crate provides:
//! - Token issuance and verification (`token`)
//! - Password hashing (`password`)
//! - The authentication and note access services (`services`)
//! - The request gate that turns a bearer token into a caller identity (`extract`)
//! - REST routes, configuration and middleware
//!
//! # Architecture
//!
//! Request gate → {AccountService | NoteService} → storage trait objects.
//! The services never parse tokens and never see HTTP types; every note
//! operation takes an owner identifier that the gate has already verified.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use notelink_server::{AppState, ServerConfig, routes};
//! use notelink_store::MemoryStore;
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::new(Arc::new(MemoryStore::new()), config);
//! let app = routes::build_router(state);
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod password;
pub mod routes;
pub mod services;
pub mod state;
pub mod token;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use services::{AccountService, AuthError, NoteError, NoteService, Session};
pub use state::AppState;
pub use token::{TokenError, TokenService};

// Re-export dependent crates
pub use notelink_core;
pub use notelink_store;
