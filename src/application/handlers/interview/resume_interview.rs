//! ResumeInterviewHandler - Where a session currently stands.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::interview::{present, FlowError, QuestionCatalog, TurnReply};
use crate::ports::SessionStore;

use super::store_error;

/// Query for a session's position
#[derive(Debug, Clone)]
pub struct ResumeInterviewQuery {
    pub session_id: SessionId,
}

#[derive(Debug, Clone)]
pub struct ResumeInterviewResult {
    pub session_id: SessionId,
    pub reply: TurnReply,
}

/// Read-only handler; never creates sessions.
pub struct ResumeInterviewHandler {
    store: Arc<dyn SessionStore>,
    catalog: Arc<QuestionCatalog>,
}

impl ResumeInterviewHandler {
    pub fn new(store: Arc<dyn SessionStore>, catalog: Arc<QuestionCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn handle(&self, query: ResumeInterviewQuery) -> Result<ResumeInterviewResult, FlowError> {
        let state = self
            .store
            .get(&query.session_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| FlowError::SessionNotFound(query.session_id.clone()))?;

        let reply = present(&state, &self.catalog)?;
        Ok(ResumeInterviewResult {
            session_id: query.session_id,
            reply,
        })
    }
}
