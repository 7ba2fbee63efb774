//! Interview Domain Module
//!
//! The fixed-question flow: a read-only [`QuestionCatalog`], the per-session
//! [`ConversationState`], and a pure [`transition`] function that advances a
//! session by one user turn.
//!
//! # Example
//!
//! ```ignore
//! use interview_flow::domain::interview::{transition, ConversationState, QuestionCatalog, TurnInput};
//!
//! let catalog = QuestionCatalog::builtin();
//! let state = ConversationState::new(SessionId::generate(), &catalog, Timestamp::now());
//! let result = transition(&state, &catalog, TurnInput::parse("会社員"), Timestamp::now())?;
//! assert_eq!(result.new_state.current_question_id().unwrap().as_str(), "q2");
//! ```

pub mod catalog;
pub mod conversation_state;
pub mod errors;
pub mod question;
pub mod session_policy;
pub mod transition;

#[cfg(test)]
mod proptests;

pub use catalog::QuestionCatalog;
pub use conversation_state::{ConversationState, FlowStatus, Message, MessageRole, Progress};
pub use errors::{CatalogError, FlowError, InvalidAnswerReason};
pub use question::{Question, QuestionKind};
pub use session_policy::UnknownSessionPolicy;
pub use transition::{
    ensure_addressable, is_skip_token, present, transition, TransitionResult, TurnInput,
    TurnReply, COMPLETION_MESSAGE, DEFAULT_REACTION, GREETING, SKIP_TOKENS,
};
