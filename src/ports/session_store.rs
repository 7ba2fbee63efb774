//! Session Store Port - Interface for persisting conversation state.
//!
//! The flow controller only sees this trait, so an in-memory map can be
//! swapped for a persistent or shared store without touching the flow.

use async_trait::async_trait;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::interview::ConversationState;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Port for saving and loading conversation state keyed by session id
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the state for a session
    ///
    /// # Returns
    /// `None` if the session is unknown (never created, deleted or evicted)
    async fn get(&self, session_id: &SessionId) -> Result<Option<ConversationState>, SessionStoreError>;

    /// Insert or replace the state for `state.session_id`
    async fn put(&self, state: &ConversationState) -> Result<(), SessionStoreError>;

    /// Delete a session
    ///
    /// # Returns
    /// `true` if a session was removed
    async fn delete(&self, session_id: &SessionId) -> Result<bool, SessionStoreError>;

    /// Ids of sessions whose last activity is older than `cutoff`
    ///
    /// Nothing is removed; callers delete each one under its session lock.
    async fn idle_since(&self, cutoff: Timestamp) -> Result<Vec<SessionId>, SessionStoreError>;

    /// Number of stored sessions
    async fn len(&self) -> Result<usize, SessionStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_message() {
        let err = SessionStoreError::Backend("disk full".to_string());
        assert_eq!(err.to_string(), "Storage backend error: disk full");
    }
}
