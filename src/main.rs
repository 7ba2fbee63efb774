//! Interview Flow server
//!
//! Loads configuration and the question catalog, then serves the interview
//! and chat APIs until Ctrl-C.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use http::{header, HeaderValue, Method};
use tokio::sync::watch;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interview_flow::adapters::{app_router, load_catalog, AppState, InMemorySessionStore};
use interview_flow::application::{EvictExpiredSessionsHandler, SessionLocks};
use interview_flow::config::{AppConfig, CorsPolicy, LogFormat, ServerConfig};
use interview_flow::ports::SessionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let catalog = Arc::new(load_catalog(config.catalog.path.as_deref()).await?);
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let locks = Arc::new(SessionLocks::new());

    // Session expiry
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let evictor = EvictExpiredSessionsHandler::new(
        store.clone(),
        locks.clone(),
        i64::try_from(config.session.expiry_hours)?,
    );
    let eviction_interval = config.session.eviction_interval();
    let eviction_task = tokio::spawn(async move {
        evictor.run(eviction_interval, shutdown_rx).await;
    });

    let state = AppState::new(store, catalog.clone())
        .with_locks(locks)
        .with_policy(config.session.unknown_session)
        .with_verbose_errors(config.features.verbose_errors)
        .with_chat_ui(config.features.enable_chat_ui);
    let app = with_middleware(app_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        questions = catalog.len(),
        unknown_session = ?config.session.unknown_session,
        "Interview flow server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    eviction_task.await?;
    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.log_format() == LogFormat::Json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(policy: CorsPolicy) -> CorsLayer {
    let origins: Vec<HeaderValue> = match policy {
        CorsPolicy::AnyOrigin => Vec::new(),
        CorsPolicy::Origins(origins) => origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(%origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect(),
    };

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    }
}

fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    router
        .layer(DefaultBodyLimit::max(server.max_body_bytes))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors_layer(server.cors_policy()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
