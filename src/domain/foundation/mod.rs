//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the interview domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{QuestionId, SessionId, MAX_SESSION_ID_LEN};
pub use timestamp::Timestamp;
