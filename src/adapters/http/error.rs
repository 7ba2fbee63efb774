//! Error payloads shared by the HTTP surfaces.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::interview::{FlowError, Question, QuestionCatalog};

use super::interview::dto::QuestionDto;

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Question to present again after a rejected answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            question: None,
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn session_not_found(session_id: &str) -> Self {
        Self::new("SESSION_NOT_FOUND", format!("Session not found: {}", session_id))
    }

    pub fn question_not_found(question_id: &str) -> Self {
        Self::new("QUESTION_NOT_FOUND", format!("Question not found: {}", question_id))
    }

    pub fn invalid_answer(message: impl Into<String>, question: Option<&Question>) -> Self {
        Self {
            question: question.map(QuestionDto::from),
            ..Self::new("INVALID_ANSWER", message)
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Invalid session id in a path or body.
pub fn invalid_session_id() -> Response {
    ErrorResponse::bad_request("Invalid session ID").into_response_with(StatusCode::BAD_REQUEST)
}

/// Longest answer or chat message accepted, in characters.
pub const MAX_MESSAGE_LEN: usize = 2_000;

/// Rejects messages over [`MAX_MESSAGE_LEN`] with 400.
pub fn check_message_len(message: &str) -> Result<(), Response> {
    if message.chars().count() > MAX_MESSAGE_LEN {
        return Err(ErrorResponse::bad_request(format!(
            "Message exceeds {} characters",
            MAX_MESSAGE_LEN
        ))
        .into_response_with(StatusCode::BAD_REQUEST));
    }
    Ok(())
}

/// Map a flow error to its HTTP response.
///
/// Internal details are only exposed when `verbose` is set.
pub fn flow_error_response(error: FlowError, catalog: &QuestionCatalog, verbose: bool) -> Response {
    match error {
        FlowError::SessionNotFound(id) => ErrorResponse::session_not_found(id.as_str())
            .into_response_with(StatusCode::NOT_FOUND),
        FlowError::QuestionNotFound(id) => ErrorResponse::question_not_found(id.as_str())
            .into_response_with(StatusCode::NOT_FOUND),
        FlowError::InvalidAnswer {
            question_id,
            reason,
        } => ErrorResponse::invalid_answer(
            format!("Invalid answer: {}", reason),
            catalog.get(&question_id),
        )
        .into_response_with(StatusCode::BAD_REQUEST),
        FlowError::Internal(msg) => {
            tracing::error!(error = %msg, "Request failed with internal error");
            let body = ErrorResponse::internal("Internal server error");
            let body = if verbose {
                body.with_details(serde_json::json!({ "error": msg }))
            } else {
                body
            };
            body.into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{QuestionId, SessionId};
    use crate::domain::interview::InvalidAnswerReason;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::builtin()
    }

    #[test]
    fn session_not_found_maps_to_404() {
        let error = FlowError::SessionNotFound(SessionId::new("abc").unwrap());
        let response = flow_error_response(error, &catalog(), false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn question_not_found_maps_to_404() {
        let error = FlowError::QuestionNotFound(QuestionId::new("q9").unwrap());
        let response = flow_error_response(error, &catalog(), false);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_answer_maps_to_400() {
        let error = FlowError::invalid_answer(
            QuestionId::new("q1").unwrap(),
            InvalidAnswerReason::NotAnOption,
        );
        let response = flow_error_response(error, &catalog(), false);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = flow_error_response(FlowError::Internal("boom".into()), &catalog(), false);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn message_length_is_bounded() {
        assert!(check_message_len(&"あ".repeat(MAX_MESSAGE_LEN)).is_ok());

        let response = check_message_len(&"あ".repeat(MAX_MESSAGE_LEN + 1)).unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_answer_body_carries_question() {
        let q1 = QuestionId::new("q1").unwrap();
        let body = ErrorResponse::invalid_answer("nope", catalog().get(&q1));
        assert_eq!(body.code, "INVALID_ANSWER");
        assert_eq!(body.question.unwrap().question_id, "q1");
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ErrorResponse::bad_request("x").code, "BAD_REQUEST");
        assert_eq!(ErrorResponse::session_not_found("s").code, "SESSION_NOT_FOUND");
        assert_eq!(ErrorResponse::question_not_found("q").code, "QUESTION_NOT_FOUND");
        assert_eq!(ErrorResponse::internal("x").code, "INTERNAL_ERROR");
    }

    #[test]
    fn details_are_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::bad_request("x")).unwrap();
        assert!(json.get("details").is_none());
        assert!(json.get("question").is_none());
    }
}
