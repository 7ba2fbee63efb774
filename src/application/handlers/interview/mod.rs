//! Interview flow handlers.
//!
//! Each mutating handler holds the session's lock from load to save, runs the
//! pure transition and persists the new state only when it changed.

mod answer_question;
mod evict_expired_sessions;
mod restart_interview;
mod resume_interview;
mod session_locks;
mod start_interview;
mod submit_message;

pub use answer_question::{
    AnswerAction, AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult,
};
pub use evict_expired_sessions::{EvictExpiredSessionsHandler, EvictionReport};
pub use restart_interview::{
    RestartInterviewCommand, RestartInterviewHandler, RestartInterviewResult,
};
pub use resume_interview::{ResumeInterviewHandler, ResumeInterviewQuery, ResumeInterviewResult};
pub use session_locks::SessionLocks;
pub use start_interview::{StartInterviewCommand, StartInterviewHandler, StartInterviewResult};
pub use submit_message::{SubmitMessageCommand, SubmitMessageHandler, SubmitMessageResult};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::interview::{
    ConversationState, FlowError, QuestionCatalog, UnknownSessionPolicy,
};
use crate::ports::{SessionStore, SessionStoreError};

fn store_error(err: SessionStoreError) -> FlowError {
    tracing::error!(error = %err, "Session store failure");
    FlowError::Internal(err.to_string())
}

/// Load a session for mutation, applying the unknown-session policy.
///
/// A session created under [`UnknownSessionPolicy::Create`] is saved right
/// away so it survives a rejected first turn.
async fn resolve_session(
    store: &dyn SessionStore,
    catalog: &QuestionCatalog,
    session_id: &SessionId,
    policy: UnknownSessionPolicy,
    now: Timestamp,
) -> Result<ConversationState, FlowError> {
    if let Some(state) = store.get(session_id).await.map_err(store_error)? {
        return Ok(state);
    }
    if !policy.creates() {
        tracing::debug!(session_id = %session_id, "Unknown session rejected");
        return Err(FlowError::SessionNotFound(session_id.clone()));
    }

    let state = ConversationState::new(session_id.clone(), catalog, now);
    store.put(&state).await.map_err(store_error)?;
    tracing::info!(session_id = %session_id, "Created session for unknown id");
    Ok(state)
}
