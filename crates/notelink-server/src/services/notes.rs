//! Note access service: ownership enforcement and duplicate-on-share.
//!
//! Every operation takes an owner identifier that the caller has already
//! authenticated. A note that exists but belongs to someone else is reported
//! exactly like a note that does not exist.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use notelink_core::{Note, NoteId, UserId};
use notelink_store::{NoteRepository, StoreError};

use crate::services::bounded;

/// Note access failures.
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    /// No note with this identifier is owned by the caller.
    #[error("note not found: {0}")]
    NotFound(NoteId),

    /// Persistence failure, passed through from the storage layer.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Owner-scoped access to notes.
pub struct NoteService {
    repo: Arc<dyn NoteRepository>,
    storage_timeout: Duration,
}

impl NoteService {
    pub fn new(repo: Arc<dyn NoteRepository>, storage_timeout: Duration) -> Self {
        Self {
            repo,
            storage_timeout,
        }
    }

    /// All notes owned by `owner`.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Note>, NoteError> {
        let notes = bounded(self.storage_timeout, "list_notes", self.repo.list_notes(owner)).await?;
        Ok(notes)
    }

    pub async fn get(&self, id: NoteId, owner: UserId) -> Result<Note, NoteError> {
        bounded(self.storage_timeout, "find_note", self.repo.find_note(id, owner))
            .await?
            .ok_or(NoteError::NotFound(id))
    }

    pub async fn create(
        &self,
        title: String,
        content: String,
        owner: UserId,
    ) -> Result<Note, NoteError> {
        let note = Note::new(owner, title, content, Utc::now());
        bounded(self.storage_timeout, "insert_note", self.repo.insert_note(&note)).await?;

        tracing::info!(note_id = %note.id, owner_id = %owner, "Note created");
        Ok(note)
    }

    /// Replace title and content of an owned note.
    ///
    /// The note is fetched under the owner filter first; the write itself is
    /// also owner-filtered, so a concurrent delete surfaces as `NotFound`.
    pub async fn update(
        &self,
        id: NoteId,
        owner: UserId,
        title: String,
        content: String,
    ) -> Result<Note, NoteError> {
        let mut note = self.get(id, owner).await?;

        note.title = title;
        note.content = content;
        note.updated_at = next_timestamp(note.updated_at, Utc::now());

        let matched =
            bounded(self.storage_timeout, "update_note", self.repo.update_note(&note)).await?;
        if !matched {
            return Err(NoteError::NotFound(id));
        }

        tracing::info!(note_id = %id, owner_id = %owner, "Note updated");
        Ok(note)
    }

    /// Hard-delete an owned note.
    pub async fn delete(&self, id: NoteId, owner: UserId) -> Result<(), NoteError> {
        let removed =
            bounded(self.storage_timeout, "delete_note", self.repo.delete_note(id, owner)).await?;
        if !removed {
            return Err(NoteError::NotFound(id));
        }

        tracing::info!(note_id = %id, owner_id = %owner, "Note deleted");
        Ok(())
    }

    /// Copy an owned note to `target`.
    ///
    /// The copy is a new record (fresh id and timestamps, `shared = true`)
    /// inserted independently of the source; later edits to either never
    /// reach the other. The read and the insert are separate storage calls,
    /// so a source deleted in between is still copied as it was read.
    pub async fn share(
        &self,
        id: NoteId,
        owner: UserId,
        target: UserId,
    ) -> Result<Note, NoteError> {
        let source = self.get(id, owner).await?;
        let copy = source.copy_for(target, Utc::now());

        bounded(self.storage_timeout, "insert_note", self.repo.insert_note(&copy)).await?;

        tracing::info!(
            note_id = %id,
            owner_id = %owner,
            target_user_id = %target,
            copy_id = %copy.id,
            "Note shared"
        );
        Ok(copy)
    }

    /// Full-text search within `owner`'s notes. The query string is passed to
    /// storage untouched.
    pub async fn search(&self, owner: UserId, query: &str) -> Result<Vec<Note>, NoteError> {
        let notes = bounded(
            self.storage_timeout,
            "search_notes",
            self.repo.search_notes(owner, query),
        )
        .await?;
        Ok(notes)
    }
}

/// `now`, or one microsecond past `previous` if the clock has not moved past
/// it. Storage keeps microsecond precision.
fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + chrono::Duration::microseconds(1);
    if now >= floor { now } else { floor }
}
