//! In-Memory Session Store Adapter
//!
//! Stores conversation state in a process-local map. Sessions live until
//! they are deleted, evicted, or the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::interview::ConversationState;
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for conversation state
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    states: Arc<RwLock<HashMap<SessionId, ConversationState>>>,
}

impl InMemorySessionStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &SessionId) -> Result<Option<ConversationState>, SessionStoreError> {
        let states = self.states.read().await;
        Ok(states.get(session_id).cloned())
    }

    async fn put(&self, state: &ConversationState) -> Result<(), SessionStoreError> {
        let mut states = self.states.write().await;
        states.insert(state.session_id.clone(), state.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.states.write().await.remove(session_id).is_some())
    }

    async fn idle_since(&self, cutoff: Timestamp) -> Result<Vec<SessionId>, SessionStoreError> {
        let states = self.states.read().await;
        Ok(states
            .values()
            .filter(|s| s.is_idle_since(&cutoff))
            .map(|s| s.session_id.clone())
            .collect())
    }

    async fn len(&self) -> Result<usize, SessionStoreError> {
        Ok(self.states.read().await.len())
    }
}
