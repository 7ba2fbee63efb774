//! Data Transfer Objects for the structured interview endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::interview::{Progress, Question, QuestionKind, TurnReply};

pub const ALREADY_COMPLETED_MESSAGE: &str = "このインタビューは既に完了しています";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters for POST /interview/start
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartInterviewParams {
    pub user_id: Option<String>,
}

/// Request body for POST /interview/answer
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub session_id: String,
    pub question_id: String,
    #[serde(default)]
    pub answer_type: Option<String>,
    pub answer: String,
}

impl AnswerRequest {
    /// Declared answer type, if any.
    ///
    /// Returns the raw value when it names no known question type.
    pub fn declared_kind(&self) -> Result<Option<QuestionKind>, &str> {
        match self.answer_type.as_deref() {
            None => Ok(None),
            Some("choice") => Ok(Some(QuestionKind::Choice)),
            Some("text") => Ok(Some(QuestionKind::Text)),
            Some(other) => Err(other),
        }
    }
}

/// Request body for POST /interview/skip
#[derive(Debug, Clone, Deserialize)]
pub struct SkipRequest {
    pub session_id: String,
    pub question_id: String,
}

/// Request body for POST /interview/restart
#[derive(Debug, Clone, Deserialize)]
pub struct RestartRequest {
    pub session_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A question as shown to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDto {
    pub question_id: String,
    pub question_type: QuestionKind,
    pub question_text: String,
    /// `None` for free-text questions.
    pub options: Option<Vec<String>>,
}

impl From<&Question> for QuestionDto {
    fn from(question: &Question) -> Self {
        Self {
            question_id: question.id.to_string(),
            question_type: question.kind(),
            question_text: question.prompt.clone(),
            options: question.options.clone(),
        }
    }
}

/// Catalog entry for GET /interview/questions
#[derive(Debug, Clone, Serialize)]
pub struct CatalogQuestionDto {
    #[serde(flatten)]
    pub question: QuestionDto,
    pub required: bool,
}

impl From<&Question> for CatalogQuestionDto {
    fn from(question: &Question) -> Self {
        Self {
            question: question.into(),
            required: question.required,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<CatalogQuestionDto>,
}

/// Response for start and restart
#[derive(Debug, Clone, Serialize)]
pub struct StartInterviewResponse {
    pub session_id: String,
    pub question: Option<QuestionDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressDto {
    pub current: usize,
    pub total: usize,
}

impl From<Progress> for ProgressDto {
    fn from(progress: Progress) -> Self {
        Self {
            current: progress.current,
            total: progress.total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    Ok,
    Completed,
}

/// Response for answer and skip
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub status: AnswerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<QuestionDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_message: Option<String>,
    pub progress: ProgressDto,
}

impl From<TurnReply> for AnswerResponse {
    fn from(reply: TurnReply) -> Self {
        Self {
            status: if reply.completed {
                AnswerStatus::Completed
            } else {
                AnswerStatus::Ok
            },
            reaction: reply.reaction,
            next_question: reply.next_question.as_ref().map(QuestionDto::from),
            completion_message: reply.completion_message,
            progress: reply.progress.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResumeProgressDto {
    pub answered_questions: usize,
    pub total_questions: usize,
}

/// Response for GET /interview/resume/:session_id
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResumeResponse {
    InProgress {
        session_id: String,
        completed: bool,
        question: QuestionDto,
        progress: ResumeProgressDto,
    },
    Completed {
        session_id: String,
        completed: bool,
        message: String,
    },
}

impl ResumeResponse {
    pub fn from_reply(session_id: String, reply: TurnReply) -> Self {
        match reply.next_question {
            Some(question) if !reply.completed => ResumeResponse::InProgress {
                session_id,
                completed: false,
                question: QuestionDto::from(&question),
                progress: ResumeProgressDto {
                    answered_questions: reply.progress.current,
                    total_questions: reply.progress.total,
                },
            },
            _ => ResumeResponse::Completed {
                session_id,
                completed: true,
                message: ALREADY_COMPLETED_MESSAGE.to_string(),
            },
        }
    }
}
