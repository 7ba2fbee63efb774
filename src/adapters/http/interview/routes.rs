//! HTTP routes for the structured interview endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    answer_question, list_questions, restart_interview, resume_interview, skip_question,
    start_interview, InterviewHandlers,
};

/// Creates the interview router, mounted under `/interview`.
pub fn interview_routes(handlers: InterviewHandlers) -> Router {
    Router::new()
        .route("/start", post(start_interview))
        .route("/answer", post(answer_question))
        .route("/skip", post(skip_question))
        .route("/restart", post(restart_interview))
        .route("/questions", get(list_questions))
        .route("/resume/:session_id", get(resume_interview))
        .with_state(handlers)
}
