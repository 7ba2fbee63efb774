//! HTTP adapter for the free-form chat surface.
//!
//! Messages are interpreted like typed chat input: "スキップ"/"skip" defers
//! the active question, anything else is an answer.

pub mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ChatResponse, ChatRestartRequest};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
