//! RestartInterviewHandler - Discards a session and opens a fresh one.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::interview::{FlowError, QuestionCatalog, TurnReply, UnknownSessionPolicy};
use crate::ports::SessionStore;

use super::start_interview::open_session;
use super::{store_error, SessionLocks};

#[derive(Debug, Clone)]
pub struct RestartInterviewCommand {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct RestartInterviewResult {
    pub previous_session_id: SessionId,
    /// Newly issued id; the previous one is no longer valid.
    pub session_id: SessionId,
    pub reply: TurnReply,
}

/// Handler for restarting interviews
///
/// The new session keeps the old session's `user_id`. Under the create
/// policy an unknown id restarts into an anonymous session.
pub struct RestartInterviewHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<QuestionCatalog>,
    locks: Arc<SessionLocks>,
    policy: UnknownSessionPolicy,
}

impl RestartInterviewHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        catalog: Arc<QuestionCatalog>,
        locks: Arc<SessionLocks>,
        policy: UnknownSessionPolicy,
    ) -> Self {
        Self {
            store,
            catalog,
            locks,
            policy,
        }
    }

    pub async fn handle(&self, cmd: RestartInterviewCommand) -> Result<RestartInterviewResult, FlowError> {
        let _guard = self.locks.acquire(&cmd.session_id).await;

        let (user_id, existed) = match self.store.get(&cmd.session_id).await.map_err(store_error)? {
            Some(previous) => (previous.user_id, true),
            None if self.policy.creates() => (None, false),
            None => return Err(FlowError::SessionNotFound(cmd.session_id)),
        };

        // The old session goes only once the new one is stored.
        let opened = open_session(self.store.as_ref(), &self.catalog, user_id).await?;
        if existed {
            self.store.delete(&cmd.session_id).await.map_err(store_error)?;
        }
        tracing::info!(
            previous_session_id = %cmd.session_id,
            session_id = %opened.session_id,
            "Interview restarted"
        );

        Ok(RestartInterviewResult {
            previous_session_id: cmd.session_id,
            session_id: opened.session_id,
            reply: opened.reply,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySessionStore;
    use crate::application::handlers::interview::{StartInterviewCommand, StartInterviewHandler};
    use crate::domain::foundation::Timestamp;
    use crate::domain::interview::ConversationState;
    use crate::ports::SessionStoreError;
    use async_trait::async_trait;

    /// Store that serves reads from memory but refuses every write.
    struct ReadOnlyStore(InMemorySessionStore);

    #[async_trait]
    impl SessionStore for ReadOnlyStore {
        async fn get(&self, id: &SessionId) -> Result<Option<ConversationState>, SessionStoreError> {
            self.0.get(id).await
        }
        async fn put(&self, _: &ConversationState) -> Result<(), SessionStoreError> {
            Err(SessionStoreError::Backend("read only".to_string()))
        }
        async fn delete(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
            self.0.delete(id).await
        }
        async fn idle_since(&self, cutoff: Timestamp) -> Result<Vec<SessionId>, SessionStoreError> {
            self.0.idle_since(cutoff).await
        }
        async fn len(&self) -> Result<usize, SessionStoreError> {
            self.0.len().await
        }
    }

    fn handler(store: Arc<InMemorySessionStore>, policy: UnknownSessionPolicy) -> RestartInterviewHandler {
        RestartInterviewHandler::new(
            store,
            Arc::new(QuestionCatalog::builtin()),
            Arc::new(SessionLocks::new()),
            policy,
        )
    }

    #[tokio::test]
    async fn test_restart_replaces_session_and_keeps_user() {
        let store = Arc::new(InMemorySessionStore::new());
        let original = StartInterviewHandler::new(store.clone(), Arc::new(QuestionCatalog::builtin()))
            .handle(StartInterviewCommand {
                user_id: Some("u-1".to_string()),
            })
            .await
            .unwrap();

        let result = handler(store.clone(), UnknownSessionPolicy::Reject)
            .handle(RestartInterviewCommand {
                session_id: original.session_id.clone(),
            })
            .await
            .unwrap();

        assert_ne!(result.session_id, original.session_id);
        assert_eq!(result.previous_session_id, original.session_id);
        assert_eq!(result.reply.next_question.unwrap().id.as_str(), "q1");
        assert!(store.get(&original.session_id).await.unwrap().is_none());

        let fresh = store.get(&result.session_id).await.unwrap().unwrap();
        assert_eq!(fresh.user_id.as_deref(), Some("u-1"));
        assert!(fresh.answers.is_empty());
    }

    #[tokio::test]
    async fn test_restart_unknown_session_rejected() {
        let store = Arc::new(InMemorySessionStore::new());
        let err = handler(store, UnknownSessionPolicy::Reject)
            .handle(RestartInterviewCommand {
                session_id: SessionId::new("ghost").unwrap(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn test_restart_unknown_session_with_create_policy() {
        let store = Arc::new(InMemorySessionStore::new());
        let result = handler(store.clone(), UnknownSessionPolicy::Create)
            .handle(RestartInterviewCommand {
                session_id: SessionId::new("ghost").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(store.len().await.unwrap(), 1);
        assert!(store.get(&result.session_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_restart_keeps_previous_session() {
        let inner = InMemorySessionStore::new();
        let catalog = QuestionCatalog::builtin();
        let previous = ConversationState::new(SessionId::generate(), &catalog, Timestamp::now());
        inner.put(&previous).await.unwrap();

        let store = Arc::new(ReadOnlyStore(inner.clone()));
        let err = RestartInterviewHandler::new(
            store,
            Arc::new(catalog),
            Arc::new(SessionLocks::new()),
            UnknownSessionPolicy::Reject,
        )
        .handle(RestartInterviewCommand {
            session_id: previous.session_id.clone(),
        })
        .await
        .unwrap_err();

        assert!(matches!(err, FlowError::Internal(_)));
        assert!(inner.get(&previous.session_id).await.unwrap().is_some());
    }
}
