//! Database models for the storage layer.
//!
//! Row types map directly to table columns and are used for sqlx queries.
//! They convert into the domain types from notelink-core at the trait
//! boundary.

use chrono::{DateTime, Utc};
use notelink_core::{Note, NoteId, User, UserId};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub shared: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: NoteId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            title: row.title,
            content: row.content,
            shared: row.shared,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for inserting a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

/// A stored user including the password hash.
///
/// Only the authentication service should ever hold one of these; everything
/// else gets the sanitized [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

impl UserRecord {
    /// Drop the password hash.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
        }
    }
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

impl From<&NewUser> for UserRecord {
    fn from(user: &NewUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_row_conversion() {
        let now = Utc::now();
        let row = NoteRow {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "t".into(),
            content: "c".into(),
            shared: true,
            created_at: now,
            updated_at: now,
        };
        let note = Note::from(row.clone());
        assert_eq!(*note.id.as_uuid(), row.id);
        assert_eq!(*note.owner_id.as_uuid(), row.owner_id);
        assert!(note.shared);
    }

    #[test]
    fn test_user_record_into_user_drops_hash() {
        let record = UserRecord {
            id: UserId::new(),
            username: "alice".into(),
            password_hash: "$argon2id$...".into(),
        };
        let id = record.id;
        let user = record.into_user();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");
    }
}
