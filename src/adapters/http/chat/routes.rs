//! HTTP routes for the chat endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{chat_page, restart_chat, send_message, start_chat, ChatHandlers};

/// Creates the chat router, mounted under `/chat`.
///
/// The HTML page is only served when `with_ui` is set.
pub fn chat_routes(handlers: ChatHandlers, with_ui: bool) -> Router {
    let router = Router::new()
        .route("/", post(send_message))
        .route("/start", post(start_chat))
        .route("/restart", post(restart_chat));

    let router = if with_ui {
        router.route("/ui", get(chat_page))
    } else {
        router
    };

    router.with_state(handlers)
}
