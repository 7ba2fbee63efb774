//! Data Transfer Objects for the chat endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::interview::TurnReply;

use crate::adapters::http::interview::ProgressDto;

/// Request body for POST /chat
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Request body for POST /chat/restart
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRestartRequest {
    pub session_id: String,
}

/// One assistant turn
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub message: String,
    /// Options of the question now being asked; empty for free text or when done.
    pub options: Vec<String>,
    pub progress: ProgressDto,
    pub completed: bool,
    /// False when the message was rejected and the question is asked again.
    pub accepted: bool,
}

impl ChatResponse {
    pub fn new(session_id: String, message: String, reply: &TurnReply) -> Self {
        Self {
            session_id,
            message,
            options: reply
                .next_question
                .as_ref()
                .map(|q| q.option_list().to_vec())
                .unwrap_or_default(),
            progress: reply.progress.into(),
            completed: reply.completed,
            accepted: true,
        }
    }

    pub fn from_reply(session_id: String, reply: &TurnReply) -> Self {
        Self::new(session_id, reply.response_text.clone(), reply)
    }

    pub fn with_accepted(mut self, accepted: bool) -> Self {
        self.accepted = accepted;
        self
    }
}
