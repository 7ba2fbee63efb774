//! SubmitMessageHandler - Advances a session by one free-form chat message.
//!
//! Skip tokens are recognized here. Rejected answers come back as a normal
//! reply carrying guidance and the repeated question, with the session left
//! untouched.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::interview::{
    present, transition, FlowError, QuestionCatalog, TurnInput, TurnReply, UnknownSessionPolicy,
};
use crate::ports::SessionStore;

use super::{resolve_session, store_error, SessionLocks};

/// Command carrying one chat message
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub session_id: SessionId,
    pub message: String,
}

/// Result of a chat turn
#[derive(Debug, Clone)]
pub struct SubmitMessageResult {
    pub session_id: SessionId,
    pub reply: TurnReply,
    /// False when the message was rejected and the question re-asked.
    pub accepted: bool,
}

/// Handler for chat turns
pub struct SubmitMessageHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<QuestionCatalog>,
    locks: Arc<SessionLocks>,
    policy: UnknownSessionPolicy,
}

impl SubmitMessageHandler {
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

    pub async fn handle(&self, cmd: SubmitMessageCommand) -> Result<SubmitMessageResult, FlowError> {
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

        match transition(&state, &self.catalog, TurnInput::parse(cmd.message), now) {
            Ok(result) => {
                if result.changed {
                    self.store.put(&result.new_state).await.map_err(store_error)?;
                }
                tracing::debug!(
                    session_id = %cmd.session_id,
                    completed = result.reply.completed,
                    changed = result.changed,
                    "Chat turn processed"
                );
                Ok(SubmitMessageResult {
                    session_id: cmd.session_id,
                    reply: result.reply,
                    accepted: true,
                })
            }
            Err(FlowError::InvalidAnswer {
                question_id,
                reason,
            }) => {
                tracing::debug!(
                    session_id = %cmd.session_id,
                    question_id = %question_id,
                    reason = %reason,
                    "Chat answer rejected"
                );
                let current = present(&state, &self.catalog)?;
                let reply = TurnReply {
                    response_text: format!("{}\n\n{}", reason.guidance(), current.response_text),
                    ..current
                };
                Ok(SubmitMessageResult {
                    session_id: cmd.session_id,
                    reply,
                    accepted: false,
                })
            }
            Err(err) => Err(err),
        }
    }
}
