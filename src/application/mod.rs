//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers serialize per session and persist; query handlers only read.

pub mod handlers;

pub use handlers::{
    AnswerAction, AnswerQuestionCommand, AnswerQuestionHandler, AnswerQuestionResult,
    EvictExpiredSessionsHandler, EvictionReport, RestartInterviewCommand,
    RestartInterviewHandler, RestartInterviewResult, ResumeInterviewHandler,
    ResumeInterviewQuery, ResumeInterviewResult, SessionLocks, StartInterviewCommand,
    StartInterviewHandler, StartInterviewResult, SubmitMessageCommand, SubmitMessageHandler,
    SubmitMessageResult,
};
