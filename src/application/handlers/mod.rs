//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod interview;

pub use interview::{
    // Commands
    AnswerAction, AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult,
    RestartInterviewCommand, RestartInterviewHandler, RestartInterviewResult,
    StartInterviewCommand, StartInterviewHandler, StartInterviewResult,
    SubmitMessageCommand, SubmitMessageHandler, SubmitMessageResult,
    // Queries
    ResumeInterviewHandler, ResumeInterviewQuery, ResumeInterviewResult,
    // Maintenance
    EvictExpiredSessionsHandler, EvictionReport, SessionLocks,
};
