//! AnswerQuestionHandler - Structured answer or skip for a named question.

use std::sync::Arc;

use crate::domain::foundation::{QuestionId, SessionId, Timestamp};
use crate::domain::interview::{
    ensure_addressable, transition, FlowError, QuestionCatalog, QuestionKind, TurnInput,
    TurnReply, UnknownSessionPolicy,
};
use crate::ports::SessionStore;

use super::{resolve_session, store_error, SessionLocks};

/// What the client did with the question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerAction {
    /// Submit a value. Skip tokens are taken literally here.
    Answer {
        value: String,
        declared_kind: Option<QuestionKind>,
    },
    Skip,
}

/// Command addressing a specific question of a session
#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub session_id: SessionId,
    pub question_id: QuestionId,
    pub action: AnswerAction,
}

/// Result of an accepted answer or skip
#[derive(Debug, Clone)]
pub struct AnswerQuestionResult {
    pub session_id: SessionId,
    pub reply: TurnReply,
}

/// Handler for structured answers
pub struct AnswerQuestionHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<QuestionCatalog>,
    locks: Arc<SessionLocks>,
    policy: UnknownSessionPolicy,
}

impl AnswerQuestionHandler {
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

    /// # Errors
    ///
    /// - `SessionNotFound` for an unknown session under the reject policy
    /// - `QuestionNotFound` when the question id is not in the catalog
    /// - `InvalidAnswer` when the question is not the active one or the value
    ///   is not acceptable; the session is not modified
    pub async fn handle(&self, cmd: AnswerQuestionCommand) -> Result<AnswerQuestionResult, FlowError> {
        let _guard = self.locks.acquire(&cmd.session_id).await;
        let now = Timestamp::now();

        let state = resolve_session(
            self.store.as_ref(),
            &self.catalog,
            &cmd.session_id,
            self.policy,
            now,
        )
        .await?;

        let (input, declared_kind) = match cmd.action {
            AnswerAction::Answer {
                value,
                declared_kind,
            } => (TurnInput::Answer(value), declared_kind),
            AnswerAction::Skip => (TurnInput::skip(), None),
        };
        ensure_addressable(&state, &self.catalog, &cmd.question_id, declared_kind)?;

        let result = transition(&state, &self.catalog, input, now)?;
        if result.changed {
            self.store.put(&result.new_state).await.map_err(store_error)?;
        }

        tracing::info!(
            session_id = %cmd.session_id,
            question_id = %cmd.question_id,
            completed = result.reply.completed,
            "Question handled"
        );

        Ok(AnswerQuestionResult {
            session_id: cmd.session_id,
            reply: result.reply,
        })
    }
}
