//! HTTP handlers for the chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{check_message_len, flow_error_response, invalid_session_id};
use crate::adapters::http::interview::StartInterviewParams;
use crate::application::handlers::interview::{
    RestartInterviewCommand, RestartInterviewHandler, StartInterviewCommand,
    StartInterviewHandler, SubmitMessageCommand, SubmitMessageHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::interview::{FlowError, QuestionCatalog, TurnReply, GREETING};

use super::dto::{ChatRequest, ChatResponse, ChatRestartRequest};

const CHAT_PAGE: &str = include_str!("page.html");

#[derive(Clone)]
pub struct ChatHandlers {
    start_handler: Arc<StartInterviewHandler>,
    submit_handler: Arc<SubmitMessageHandler>,
    restart_handler: Arc<RestartInterviewHandler>,
    catalog: Arc<QuestionCatalog>,
    verbose_errors: bool,
}

impl ChatHandlers {
    pub fn new(
        start_handler: Arc<StartInterviewHandler>,
        submit_handler: Arc<SubmitMessageHandler>,
        restart_handler: Arc<RestartInterviewHandler>,
        catalog: Arc<QuestionCatalog>,
        verbose_errors: bool,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            restart_handler,
            catalog,
            verbose_errors,
        }
    }

    fn error(&self, error: FlowError) -> Response {
        flow_error_response(error, &self.catalog, self.verbose_errors)
    }
}

fn greeting(session_id: &SessionId, reply: &TurnReply) -> Response {
    let message = format!("{}\n\n{}", GREETING, reply.response_text);
    let response = ChatResponse::new(session_id.to_string(), message, reply);
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /chat/start - Open a session and greet
pub async fn start_chat(
    State(handlers): State<ChatHandlers>,
    Query(params): Query<StartInterviewParams>,
) -> Response {
    let cmd = StartInterviewCommand {
        user_id: params.user_id,
    };
    match handlers.start_handler.handle(cmd).await {
        Ok(result) => greeting(&result.session_id, &result.reply),
        Err(e) => handlers.error(e),
    }
}

/// POST /chat - One user message
///
/// Rejected answers still return 200 with a re-prompt.
pub async fn send_message(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let Ok(session_id) = req.session_id.parse::<SessionId>() else {
        return invalid_session_id();
    };
    if let Err(response) = check_message_len(&req.message) {
        return response;
    }

    let cmd = SubmitMessageCommand {
        session_id,
        message: req.message,
    };
    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response = ChatResponse::from_reply(result.session_id.to_string(), &result.reply)
                .with_accepted(result.accepted);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handlers.error(e),
    }
}

/// POST /chat/restart - Start over with a new session id
pub async fn restart_chat(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<ChatRestartRequest>,
) -> Response {
    let Ok(session_id) = req.session_id.parse::<SessionId>() else {
        return invalid_session_id();
    };

    match handlers
        .restart_handler
        .handle(RestartInterviewCommand { session_id })
        .await
    {
        Ok(result) => greeting(&result.session_id, &result.reply),
        Err(e) => handlers.error(e),
    }
}

/// GET /chat/ui - Embedded chat page
pub async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}
