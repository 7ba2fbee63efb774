//! StartInterviewHandler - Opens a new interview session.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::interview::{
    present, ConversationState, FlowError, MessageRole, QuestionCatalog, TurnReply,
};
use crate::ports::SessionStore;

use super::store_error;

/// Command to start an interview
#[derive(Debug, Clone, Default)]
pub struct StartInterviewCommand {
    /// Caller-supplied identifier carried on the session, never interpreted.
    pub user_id: Option<String>,
}

/// Result of starting an interview
#[derive(Debug, Clone)]
pub struct StartInterviewResult {
    pub session_id: SessionId,
    /// Presents the first question.
    pub reply: TurnReply,
}

/// Handler for starting interviews
pub struct StartInterviewHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<QuestionCatalog>,
}

impl StartInterviewHandler {
    pub fn new(store: Arc<dyn SessionStore>, catalog: Arc<QuestionCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn handle(&self, cmd: StartInterviewCommand) -> Result<StartInterviewResult, FlowError> {
        open_session(self.store.as_ref(), &self.catalog, cmd.user_id).await
    }
}

/// Create, log and persist a fresh session positioned on the first question.
pub(super) async fn open_session(
    store: &dyn SessionStore,
    catalog: &QuestionCatalog,
    user_id: Option<String>,
) -> Result<StartInterviewResult, FlowError> {
    let now = Timestamp::now();
    let session_id = SessionId::generate();
    let mut state = ConversationState::new(session_id.clone(), catalog, now).with_user_id(user_id);

    let reply = present(&state, catalog)?;
    state.add_message(MessageRole::Assistant, reply.response_text.clone(), now);
    store.put(&state).await.map_err(store_error)?;

    tracing::info!(
        session_id = %session_id,
        user_id = state.user_id.as_deref().unwrap_or("-"),
        "Interview started"
    );

    Ok(StartInterviewResult { session_id, reply })
}
