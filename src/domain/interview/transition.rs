//! Pure state transition function
//!
//! `(state, input) -> (new state, reply)` for the interview flow. Given the
//! same inputs it always produces the same outputs; the caller supplies the
//! clock and persists the result.

use crate::domain::foundation::{QuestionId, Timestamp};

use super::catalog::QuestionCatalog;
use super::conversation_state::{ConversationState, FlowStatus, MessageRole, Progress};
use super::errors::{FlowError, InvalidAnswerReason};
use super::question::{Question, QuestionKind};

/// Messages that defer the active question instead of answering it.
pub const SKIP_TOKENS: [&str; 2] = ["スキップ", "skip"];

pub const DEFAULT_REACTION: &str = "ご回答ありがとうございます。";
pub const COMPLETION_MESSAGE: &str =
    "すべての質問に回答いただき、ありがとうございました。結果を分析中です。";
pub const SKIP_ACKNOWLEDGEMENT: &str = "この質問はスキップします。";
pub const RETURN_TO_DEFERRED: &str = "スキップした質問に戻ります。";
pub const GREETING: &str =
    "こんにちは！いくつか質問にお答えください。「スキップ」と入力すると質問をスキップできます。";

/// True when `raw` is one of [`SKIP_TOKENS`], ignoring whitespace and ASCII case.
pub fn is_skip_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    SKIP_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(trimmed))
}

/// One user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnInput {
    Answer(String),
    Skip { raw: String },
}

impl TurnInput {
    /// Interprets a free-form chat message.
    ///
    /// Skip tokens are kept trimmed; surrounding whitespace is not logged.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if is_skip_token(&raw) {
            TurnInput::Skip {
                raw: raw.trim().to_string(),
            }
        } else {
            TurnInput::Answer(raw)
        }
    }

    /// Skip issued without message text (structured API).
    pub fn skip() -> Self {
        TurnInput::Skip {
            raw: SKIP_TOKENS[0].to_string(),
        }
    }
}

/// What the caller shows after a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    /// Full assistant message (reaction, then next prompt or completion).
    pub response_text: String,
    pub reaction: Option<String>,
    pub next_question: Option<Question>,
    pub progress: Progress,
    pub completed: bool,
    pub completion_message: Option<String>,
}

/// Result of a state transition
#[derive(Debug, Clone)]
pub struct TransitionResult {
    pub new_state: ConversationState,
    pub reply: TurnReply,
    /// False when the state was returned untouched and need not be saved.
    pub changed: bool,
}

/// Pure transition function
pub fn transition(
    state: &ConversationState,
    catalog: &QuestionCatalog,
    input: TurnInput,
    now: Timestamp,
) -> Result<TransitionResult, FlowError> {
    let question_id = match &state.status {
        FlowStatus::Completed { .. } => {
            return Ok(TransitionResult {
                new_state: state.clone(),
                reply: completed_reply(state, catalog),
                changed: false,
            });
        }
        FlowStatus::AwaitingAnswer { question_id } => question_id,
    };
    let question = catalog
        .get(question_id)
        .ok_or_else(|| FlowError::QuestionNotFound(question_id.clone()))?;

    let mut next = state.clone();
    let (lead, reaction, raw) = match input {
        TurnInput::Skip { raw } => {
            if question.required {
                next.deferred.push_back(question.id.clone());
            } else {
                next.dismissed.push(question.id.clone());
            }
            (SKIP_ACKNOWLEDGEMENT.to_string(), None, raw)
        }
        TurnInput::Answer(raw) => {
            let value = validate_answer(question, &raw)?;
            let reaction = question
                .reaction_for(&value)
                .unwrap_or(DEFAULT_REACTION)
                .to_string();
            next.answers.insert(question.id.clone(), value);
            (reaction.clone(), Some(reaction), raw)
        }
    };
    next.add_message(MessageRole::User, raw, now);

    let (response_text, next_question) = match select_next(&next, catalog, &question.id) {
        Some(Selection { question_id, from_deferred }) => {
            if from_deferred {
                next.deferred.pop_front();
            }
            let upcoming = catalog
                .get(&question_id)
                .ok_or_else(|| FlowError::QuestionNotFound(question_id.clone()))?;
            let text = if from_deferred {
                format!("{}\n\n{}\n{}", lead, RETURN_TO_DEFERRED, upcoming.render_prompt())
            } else {
                format!("{}\n\n{}", lead, upcoming.render_prompt())
            };
            next.status = FlowStatus::AwaitingAnswer { question_id };
            (text, Some(upcoming.clone()))
        }
        None => {
            next.status = FlowStatus::Completed {
                completion_message: COMPLETION_MESSAGE.to_string(),
            };
            (format!("{}\n\n{}", lead, COMPLETION_MESSAGE), None)
        }
    };
    next.add_message(MessageRole::Assistant, response_text.clone(), now);

    let completed = next.is_completed();
    let reply = TurnReply {
        response_text,
        reaction,
        next_question,
        progress: next.progress(catalog),
        completed,
        completion_message: next.completion_message().map(str::to_string),
    };

    Ok(TransitionResult {
        new_state: next,
        reply,
        changed: true,
    })
}

/// Reply describing the session's current position without advancing it.
pub fn present(state: &ConversationState, catalog: &QuestionCatalog) -> Result<TurnReply, FlowError> {
    match &state.status {
        FlowStatus::Completed { .. } => Ok(completed_reply(state, catalog)),
        FlowStatus::AwaitingAnswer { question_id } => {
            let question = catalog
                .get(question_id)
                .ok_or_else(|| FlowError::QuestionNotFound(question_id.clone()))?;
            Ok(TurnReply {
                response_text: question.render_prompt(),
                reaction: None,
                next_question: Some(question.clone()),
                progress: state.progress(catalog),
                completed: false,
                completion_message: None,
            })
        }
    }
}

/// Checks that a structured answer addresses the active question.
///
/// Completed sessions pass so that the transition can return the
/// completion reply unchanged.
pub fn ensure_addressable(
    state: &ConversationState,
    catalog: &QuestionCatalog,
    question_id: &QuestionId,
    declared_kind: Option<QuestionKind>,
) -> Result<(), FlowError> {
    let question = catalog
        .get(question_id)
        .ok_or_else(|| FlowError::QuestionNotFound(question_id.clone()))?;
    let Some(current) = state.current_question_id() else {
        return Ok(());
    };
    if current != question_id {
        return Err(FlowError::invalid_answer(
            current.clone(),
            InvalidAnswerReason::NotActiveQuestion,
        ));
    }
    if let Some(kind) = declared_kind {
        if kind != question.kind() {
            return Err(FlowError::invalid_answer(
                current.clone(),
                InvalidAnswerReason::TypeMismatch,
            ));
        }
    }
    Ok(())
}

fn validate_answer(question: &Question, raw: &str) -> Result<String, FlowError> {
    match question.kind() {
        QuestionKind::Choice => question
            .matching_option(raw)
            .map(str::to_string)
            .ok_or_else(|| {
                FlowError::invalid_answer(question.id.clone(), InvalidAnswerReason::NotAnOption)
            }),
        QuestionKind::Text => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(FlowError::invalid_answer(
                    question.id.clone(),
                    InvalidAnswerReason::Blank,
                ))
            } else {
                Ok(trimmed.to_string())
            }
        }
    }
}

struct Selection {
    question_id: QuestionId,
    from_deferred: bool,
}

/// Next untouched question after `from` in catalog order, else the oldest deferred one.
fn select_next(
    state: &ConversationState,
    catalog: &QuestionCatalog,
    from: &QuestionId,
) -> Option<Selection> {
    let mut cursor = catalog.next_id(from);
    while let Some(id) = cursor {
        if !state.has_touched(id) {
            return Some(Selection {
                question_id: id.clone(),
                from_deferred: false,
            });
        }
        cursor = catalog.next_id(id);
    }
    state.deferred.front().map(|id| Selection {
        question_id: id.clone(),
        from_deferred: true,
    })
}

fn completed_reply(state: &ConversationState, catalog: &QuestionCatalog) -> TurnReply {
    let message = state
        .completion_message()
        .unwrap_or(COMPLETION_MESSAGE)
        .to_string();
    TurnReply {
        response_text: message.clone(),
        reaction: None,
        next_question: None,
        progress: state.progress(catalog),
        completed: true,
        completion_message: Some(message),
    }
}
