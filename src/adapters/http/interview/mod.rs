//! HTTP adapter for the structured interview API.
//!
//! # Endpoints
//!
//! - `POST /interview/start` - Open a session
//! - `POST /interview/answer` - Answer the active question
//! - `POST /interview/skip` - Skip the active question
//! - `POST /interview/restart` - Start over with a new session id
//! - `GET /interview/questions` - List the catalog
//! - `GET /interview/resume/:session_id` - Current position

pub mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::InterviewHandlers;
pub use routes::interview_routes;
