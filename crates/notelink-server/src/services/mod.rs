//! Application services.
//!
//! `AccountService` handles signup and login; `NoteService` enforces note
//! ownership and implements duplicate-on-share. Both talk to storage only
//! through the trait objects from notelink-store, and both bound every
//! storage call with a deadline.

pub mod accounts;
pub mod notes;

use std::future::Future;
use std::time::Duration;

use notelink_store::{StoreError, StoreResult};

pub use accounts::{AccountService, AuthError, Session};
pub use notes::{NoteError, NoteService};

/// Run a storage call, failing with [`StoreError::Timeout`] if it does not
/// finish within `deadline`. Dropping the future cancels the call.
pub(crate) async fn bounded<T, F>(deadline: Duration, operation: &'static str, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, ?deadline, "Storage call exceeded deadline");
            Err(StoreError::Timeout(format!(
                "{} did not complete within {:?}",
                operation, deadline
            )))
        }
    }
}
