//! Error types for the interview domain

use std::fmt;

use crate::domain::foundation::{QuestionId, SessionId};

/// Why an answer was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidAnswerReason {
    /// Value is not among the question's options.
    NotAnOption,
    /// Free-text answer was empty.
    Blank,
    /// The answer addressed a question other than the active one.
    NotActiveQuestion,
    /// Declared answer type does not match the question.
    TypeMismatch,
}

impl InvalidAnswerReason {
    /// User-facing hint shown before the question is asked again.
    pub fn guidance(&self) -> &'static str {
        match self {
            InvalidAnswerReason::NotAnOption => "選択肢の中から回答を選んでください。",
            InvalidAnswerReason::Blank => "回答を入力してください。",
            InvalidAnswerReason::NotActiveQuestion | InvalidAnswerReason::TypeMismatch => {
                "現在の質問に回答してください。"
            }
        }
    }
}

impl fmt::Display for InvalidAnswerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvalidAnswerReason::NotAnOption => "answer is not one of the allowed options",
            InvalidAnswerReason::Blank => "answer must not be empty",
            InvalidAnswerReason::NotActiveQuestion => "question is not the active question",
            InvalidAnswerReason::TypeMismatch => "answer type does not match the question",
        };
        write!(f, "{}", s)
    }
}

/// Flow controller errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FlowError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("Invalid answer for {question_id}: {reason}")]
    InvalidAnswer {
        question_id: QuestionId,
        reason: InvalidAnswerReason,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlowError {
    pub fn invalid_answer(question_id: QuestionId, reason: InvalidAnswerReason) -> Self {
        FlowError::InvalidAnswer {
            question_id,
            reason,
        }
    }
}

/// Catalog construction errors
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum CatalogError {
    #[error("Catalog contains no questions")]
    Empty,

    #[error("Duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error("Question {0} has an empty prompt")]
    EmptyPrompt(QuestionId),

    #[error("Choice question {0} has no usable options")]
    NoOptions(QuestionId),

    #[error("Question {question_id} lists option {option:?} more than once")]
    DuplicateOption {
        question_id: QuestionId,
        option: String,
    },

    #[error("Question {question_id} has a reaction for unknown option {option:?}")]
    UnknownReactionOption {
        question_id: QuestionId,
        option: String,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Failed to read catalog file: {0}")]
    Io(String),
}
