//! HTTP adapters - REST API implementations.
//!
//! Two surfaces share one flow: the structured `/interview` API and the
//! free-form `/chat` API. [`app_router`] composes them with the root endpoint.

pub mod chat;
pub mod error;
pub mod health;
pub mod interview;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::application::handlers::interview::{
    AnswerQuestionHandler, RestartInterviewHandler, ResumeInterviewHandler, SessionLocks,
    StartInterviewHandler, SubmitMessageHandler,
};
use crate::domain::interview::{QuestionCatalog, UnknownSessionPolicy};
use crate::ports::SessionStore;

pub use chat::{chat_routes, ChatHandlers};
pub use error::ErrorResponse;
pub use interview::{interview_routes, InterviewHandlers};

/// Shared dependencies for every HTTP surface
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub catalog: Arc<QuestionCatalog>,
    pub locks: Arc<SessionLocks>,
    pub policy: UnknownSessionPolicy,
    pub verbose_errors: bool,
    pub enable_chat_ui: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, catalog: Arc<QuestionCatalog>) -> Self {
        Self {
            store,
            catalog,
            locks: Arc::new(SessionLocks::new()),
            policy: UnknownSessionPolicy::default(),
            verbose_errors: false,
            enable_chat_ui: true,
        }
    }

    pub fn with_locks(mut self, locks: Arc<SessionLocks>) -> Self {
        self.locks = locks;
        self
    }

    pub fn with_policy(mut self, policy: UnknownSessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    pub fn with_chat_ui(mut self, enabled: bool) -> Self {
        self.enable_chat_ui = enabled;
        self
    }
}

/// Build the full application router (without middleware layers).
pub fn app_router(state: AppState) -> Router {
    let start = Arc::new(StartInterviewHandler::new(
        state.store.clone(),
        state.catalog.clone(),
    ));
    let restart = Arc::new(RestartInterviewHandler::new(
        state.store.clone(),
        state.catalog.clone(),
        state.locks.clone(),
        state.policy,
    ));

    let interview = InterviewHandlers::new(
        start.clone(),
        Arc::new(AnswerQuestionHandler::new(
            state.store.clone(),
            state.catalog.clone(),
            state.locks.clone(),
            state.policy,
        )),
        restart.clone(),
        Arc::new(ResumeInterviewHandler::new(
            state.store.clone(),
            state.catalog.clone(),
        )),
        state.catalog.clone(),
        state.verbose_errors,
    );

    let chat = ChatHandlers::new(
        start,
        Arc::new(SubmitMessageHandler::new(
            state.store.clone(),
            state.catalog.clone(),
            state.locks.clone(),
            state.policy,
        )),
        restart,
        state.catalog.clone(),
        state.verbose_errors,
    );

    Router::new()
        .route("/", get(health::root))
        .nest("/interview", interview_routes(interview))
        .nest("/chat", chat_routes(chat, state.enable_chat_ui))
}
