//! HTTP handlers for the structured interview endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{
    check_message_len, flow_error_response, invalid_session_id, ErrorResponse,
};
use crate::application::handlers::interview::{
    AnswerAction, AnswerQuestionCommand, AnswerQuestionHandler, RestartInterviewCommand,
    RestartInterviewHandler, ResumeInterviewHandler, ResumeInterviewQuery, StartInterviewCommand,
    StartInterviewHandler,
};
use crate::domain::foundation::{QuestionId, SessionId};
use crate::domain::interview::{FlowError, QuestionCatalog};

use super::dto::{
    AnswerRequest, AnswerResponse, CatalogQuestionDto, QuestionDto, QuestionListResponse,
    RestartRequest, ResumeResponse, SkipRequest, StartInterviewParams, StartInterviewResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct InterviewHandlers {
    start_handler: Arc<StartInterviewHandler>,
    answer_handler: Arc<AnswerQuestionHandler>,
    restart_handler: Arc<RestartInterviewHandler>,
    resume_handler: Arc<ResumeInterviewHandler>,
    catalog: Arc<QuestionCatalog>,
    verbose_errors: bool,
}

impl InterviewHandlers {
    pub fn new(
        start_handler: Arc<StartInterviewHandler>,
        answer_handler: Arc<AnswerQuestionHandler>,
        restart_handler: Arc<RestartInterviewHandler>,
        resume_handler: Arc<ResumeInterviewHandler>,
        catalog: Arc<QuestionCatalog>,
        verbose_errors: bool,
    ) -> Self {
        Self {
            start_handler,
            answer_handler,
            restart_handler,
            resume_handler,
            catalog,
            verbose_errors,
        }
    }

    fn error(&self, error: FlowError) -> Response {
        flow_error_response(error, &self.catalog, self.verbose_errors)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /interview/start - Open a session and return the first question
pub async fn start_interview(
    State(handlers): State<InterviewHandlers>,
    Query(params): Query<StartInterviewParams>,
) -> Response {
    let cmd = StartInterviewCommand {
        user_id: params.user_id,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response = StartInterviewResponse {
                session_id: result.session_id.to_string(),
                question: result.reply.next_question.as_ref().map(QuestionDto::from),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handlers.error(e),
    }
}

/// POST /interview/answer - Answer the active question
pub async fn answer_question(
    State(handlers): State<InterviewHandlers>,
    Json(req): Json<AnswerRequest>,
) -> Response {
    if let Err(response) = check_message_len(&req.answer) {
        return response;
    }
    let declared_kind = match req.declared_kind() {
        Ok(kind) => kind,
        Err(other) => {
            return ErrorResponse::bad_request(format!("Unsupported answer type: {}", other))
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };

    let action = AnswerAction::Answer {
        value: req.answer,
        declared_kind,
    };
    submit(&handlers, &req.session_id, &req.question_id, action).await
}

/// POST /interview/skip - Skip the active question
pub async fn skip_question(
    State(handlers): State<InterviewHandlers>,
    Json(req): Json<SkipRequest>,
) -> Response {
    submit(&handlers, &req.session_id, &req.question_id, AnswerAction::Skip).await
}

async fn submit(
    handlers: &InterviewHandlers,
    session_id: &str,
    question_id: &str,
    action: AnswerAction,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id();
    };
    let Ok(question_id) = question_id.parse::<QuestionId>() else {
        return ErrorResponse::bad_request("Invalid question ID")
            .into_response_with(StatusCode::BAD_REQUEST);
    };

    let cmd = AnswerQuestionCommand {
        session_id,
        question_id,
        action,
    };

    match handlers.answer_handler.handle(cmd).await {
        Ok(result) => {
            let response = AnswerResponse::from(result.reply);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handlers.error(e),
    }
}

/// POST /interview/restart - Discard a session and start over
pub async fn restart_interview(
    State(handlers): State<InterviewHandlers>,
    Json(req): Json<RestartRequest>,
) -> Response {
    let Ok(session_id) = req.session_id.parse::<SessionId>() else {
        return invalid_session_id();
    };

    match handlers
        .restart_handler
        .handle(RestartInterviewCommand { session_id })
        .await
    {
        Ok(result) => {
            let response = StartInterviewResponse {
                session_id: result.session_id.to_string(),
                question: result.reply.next_question.as_ref().map(QuestionDto::from),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handlers.error(e),
    }
}

/// GET /interview/questions - The catalog in order
pub async fn list_questions(State(handlers): State<InterviewHandlers>) -> Response {
    let response = QuestionListResponse {
        questions: handlers
            .catalog
            .all()
            .iter()
            .map(CatalogQuestionDto::from)
            .collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /interview/resume/:session_id - Current position of a session
pub async fn resume_interview(
    State(handlers): State<InterviewHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Ok(session_id) = session_id.parse::<SessionId>() else {
        return invalid_session_id();
    };

    match handlers
        .resume_handler
        .handle(ResumeInterviewQuery { session_id })
        .await
    {
        Ok(result) => {
            let response = ResumeResponse::from_reply(result.session_id.to_string(), result.reply);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handlers.error(e),
    }
}
