//! Root liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// GET /
pub async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        message: "インタビューAPIが稼働中です",
    })
}
