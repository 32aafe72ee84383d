//! notelink-store: Storage layer for NoteLink
//!
//! This crate provides:
//! - The `CredentialStore` and `NoteRepository` capability traits
//! - A PostgreSQL adapter (`Store`) with embedded migrations
//! - An in-process adapter (`MemoryStore`) for tests and local development
//!
//! # Architecture
//!
//! Callers only ever see the two traits. Every note operation except
//! `insert_note` is filtered by both note identifier and owner identifier,
//! so a note is invisible to anyone but its owner at the storage level.
//!
//! # Usage
//!
//! ```rust,ignore
//! use notelink_store::{NoteRepository, Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//!
//! let notes = store.list_notes(owner_id).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use models::{NewUser, UserRecord};
pub use repository::{CredentialStore, NoteRepository};
pub use store::{Store, StoreConfig};

// Re-export notelink-core for downstream crates
pub use notelink_core;
