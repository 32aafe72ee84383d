//! Core data types for NoteLink.
//!
//! A `User` is created once at signup and is immutable afterwards. A `Note`
//! always has exactly one owner; sharing produces a separate `Note` with a
//! fresh identifier rather than a link back to the original.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a user.
///
/// Wraps a UUID v4. The text form is the hyphenated hex representation, and
/// parsing also accepts the 32-character simple hex form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new random UserId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a UserId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Records
// ============================================================================

/// A registered user as seen by callers.
///
/// The password hash is deliberately absent: it lives only in the storage
/// record and never crosses the authentication service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// A note owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub owner_id: UserId,
    pub title: String,
    pub content: String,
    /// True when this record was produced by sharing another user's note.
    pub shared: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new, unshared note for `owner_id` stamped with `now`.
    #[must_use]
    pub fn new(owner_id: UserId, title: String, content: String, now: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::new(),
            owner_id,
            title,
            content,
            shared: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Builds an independent copy of this note for `target`.
    ///
    /// The copy gets a fresh identifier and fresh timestamps and is marked
    /// shared. Nothing links it back to `self`.
    #[must_use]
    pub fn copy_for(&self, target: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::new(),
            owner_id: target,
            title: self.title.clone(),
            content: self.content.clone(),
            shared: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` owns this note.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }
}
