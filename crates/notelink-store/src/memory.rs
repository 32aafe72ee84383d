//! In-process implementation of the storage traits.
//!
//! `MemoryStore` keeps users and notes in `RwLock`-guarded maps. It is the
//! storage engine for tests and local development; the locks never escape a
//! single trait call.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use notelink_core::{Note, NoteId, UserId};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewUser, UserRecord};
use crate::repository::{CredentialStore, NoteRepository};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, UserRecord>>,
    notes: RwLock<HashMap<NoteId, Note>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`]
    /// (or succeed again when `offline` is false).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Total number of notes across all owners.
    pub async fn note_count(&self) -> usize {
        self.notes.read().await.len()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

/// Sort into the same order the PostgreSQL adapter uses.
fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}

/// Every whitespace-separated term must occur in title or content,
/// case-insensitively. A query with no terms matches nothing.
fn matches_query(note: &Note, terms: &[String]) -> bool {
    if terms.is_empty() {
        return false;
    }
    let haystack = format!("{} {}", note.title, note.content).to_lowercase();
    terms.iter().all(|term| haystack.contains(term.as_str()))
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn insert_user(&self, user: &NewUser) -> StoreResult<UserRecord> {
        self.check_online()?;
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::DuplicateUsername(user.username.clone()));
        }
        let record = UserRecord::from(user);
        users.insert(user.username.clone(), record.clone());
        Ok(record)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>> {
        self.check_online()?;
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[async_trait]
impl NoteRepository for MemoryStore {
    async fn list_notes(&self, owner: UserId) -> StoreResult<Vec<Note>> {
        self.check_online()?;
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|n| n.is_owned_by(owner))
            .cloned()
            .collect();
        sort_notes(&mut notes);
        Ok(notes)
    }

    async fn find_note(&self, id: NoteId, owner: UserId) -> StoreResult<Option<Note>> {
        self.check_online()?;
        Ok(self
            .notes
            .read()
            .await
            .get(&id)
            .filter(|n| n.is_owned_by(owner))
            .cloned())
    }

    async fn insert_note(&self, note: &Note) -> StoreResult<()> {
        self.check_online()?;
        let mut notes = self.notes.write().await;
        if notes.contains_key(&note.id) {
            return Err(StoreError::DuplicateNote(*note.id.as_uuid()));
        }
        notes.insert(note.id, note.clone());
        Ok(())
    }

    async fn update_note(&self, note: &Note) -> StoreResult<bool> {
        self.check_online()?;
        let mut notes = self.notes.write().await;
        match notes.get_mut(&note.id) {
            Some(existing) if existing.is_owned_by(note.owner_id) => {
                existing.title = note.title.clone();
                existing.content = note.content.clone();
                existing.updated_at = note.updated_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_note(&self, id: NoteId, owner: UserId) -> StoreResult<bool> {
        self.check_online()?;
        let mut notes = self.notes.write().await;
        if notes.get(&id).is_some_and(|n| n.is_owned_by(owner)) {
            notes.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn search_notes(&self, owner: UserId, query: &str) -> StoreResult<Vec<Note>> {
        self.check_online()?;
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        let mut notes: Vec<Note> = self
            .notes
            .read()
            .await
            .values()
            .filter(|n| n.is_owned_by(owner) && matches_query(n, &terms))
            .cloned()
            .collect();
        sort_notes(&mut notes);
        Ok(notes)
    }
}
