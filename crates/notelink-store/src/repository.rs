//! Storage capability traits.
//!
//! These are the only operations the services may perform against storage:
//! identifier- and owner-scoped lookups, inserts, in-place field updates,
//! and a single free-text search predicate. Every method may block on I/O;
//! callers must not hold locks across them.

use async_trait::async_trait;
use notelink_core::{Note, NoteId, UserId};

use crate::error::StoreResult;
use crate::models::{NewUser, UserRecord};

/// Persists username and password-hash pairs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`StoreError::DuplicateUsername`](crate::StoreError::DuplicateUsername)
    /// if the username is already taken.
    async fn insert_user(&self, user: &NewUser) -> StoreResult<UserRecord>;

    /// Look up a user by exact username.
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>>;
}

/// Persists notes keyed by note identifier and queryable by owner.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes owned by `owner`, in a storage-defined stable order.
    async fn list_notes(&self, owner: UserId) -> StoreResult<Vec<Note>>;

    /// The note with `id` if and only if it is owned by `owner`.
    async fn find_note(&self, id: NoteId, owner: UserId) -> StoreResult<Option<Note>>;

    /// Insert a new note. Never overwrites an existing record.
    async fn insert_note(&self, note: &Note) -> StoreResult<()>;

    /// Replace title, content and `updated_at` of the note matching
    /// `(note.id, note.owner_id)`. Returns false if no such note exists.
    async fn update_note(&self, note: &Note) -> StoreResult<bool>;

    /// Remove the note matching `(id, owner)`. Returns false if no such note
    /// exists.
    async fn delete_note(&self, id: NoteId, owner: UserId) -> StoreResult<bool>;

    /// Full-text search within `owner`'s notes. The query is interpreted by
    /// the backend's own text-indexing rules.
    async fn search_notes(&self, owner: UserId, query: &str) -> StoreResult<Vec<Note>>;
}
