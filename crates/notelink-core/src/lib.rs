//! notelink-core: Core types for the NoteLink note-taking backend
//!
//! This crate provides:
//! - Identifier newtypes (`UserId`, `NoteId`)
//! - The `User` and `Note` domain records
//! - Input validation shared by the server and its services
//!
//! It has no I/O and no async code; the storage and HTTP layers build on it.

pub mod types;
pub mod validation;

pub use types::{Note, NoteId, User, UserId};
pub use validation::{MIN_PASSWORD_LEN, ValidationError, validate_credentials};
