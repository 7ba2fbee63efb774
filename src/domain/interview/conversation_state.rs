//! Conversation State Entity
//!
//! Tracks one session's walk through the catalog: where it is, what has
//! been answered, what was skipped, and the message log.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

use crate::domain::foundation::{QuestionId, SessionId, Timestamp};

use super::catalog::QuestionCatalog;

/// Most recent log entries kept per session; older ones are dropped.
pub const MAX_LOG_ENTRIES: usize = 200;

/// Position of a session in the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FlowStatus {
    AwaitingAnswer { question_id: QuestionId },
    Completed { completion_message: String },
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Message in the conversation log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: Timestamp,
}

/// Required-question progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

/// Complete state of one interview session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: SessionId,
    pub user_id: Option<String>,
    pub status: FlowStatus,
    pub answers: HashMap<QuestionId, String>,
    /// Required questions skipped once, revisited in FIFO order.
    pub deferred: VecDeque<QuestionId>,
    /// Optional questions skipped for good.
    pub dismissed: Vec<QuestionId>,
    pub message_log: Vec<Message>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ConversationState {
    /// Create a new state awaiting the catalog's first question
    pub fn new(session_id: SessionId, catalog: &QuestionCatalog, now: Timestamp) -> Self {
        Self {
            session_id,
            user_id: None,
            status: FlowStatus::AwaitingAnswer {
                question_id: catalog.first().id.clone(),
            },
            answers: HashMap::new(),
            deferred: VecDeque::new(),
            dismissed: Vec::new(),
            message_log: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Active question, or `None` once completed.
    pub fn current_question_id(&self) -> Option<&QuestionId> {
        match &self.status {
            FlowStatus::AwaitingAnswer { question_id } => Some(question_id),
            FlowStatus::Completed { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, FlowStatus::Completed { .. })
    }

    pub fn completion_message(&self) -> Option<&str> {
        match &self.status {
            FlowStatus::Completed { completion_message } => Some(completion_message),
            FlowStatus::AwaitingAnswer { .. } => None,
        }
    }

    /// Whether the question has been answered, deferred or dismissed.
    pub fn has_touched(&self, question_id: &QuestionId) -> bool {
        self.answers.contains_key(question_id)
            || self.deferred.contains(question_id)
            || self.dismissed.contains(question_id)
    }

    pub fn add_message(&mut self, role: MessageRole, content: impl Into<String>, now: Timestamp) {
        if self.message_log.len() >= MAX_LOG_ENTRIES {
            let excess = self.message_log.len() + 1 - MAX_LOG_ENTRIES;
            self.message_log.drain(..excess);
        }
        self.message_log.push(Message {
            role,
            content: content.into(),
            timestamp: now,
        });
        self.updated_at = now;
    }

    pub fn progress(&self, catalog: &QuestionCatalog) -> Progress {
        let questions = catalog.all();
        let current = questions
            .iter()
            .filter(|q| q.required && self.answers.contains_key(&q.id))
            .count();
        Progress {
            current,
            total: catalog.required_count(),
        }
    }

    /// Last activity older than `cutoff`.
    pub fn is_idle_since(&self, cutoff: &Timestamp) -> bool {
        self.updated_at.is_before(cutoff)
    }
}
