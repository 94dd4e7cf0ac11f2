use axum::response::IntoResponse;
use serde_json::json;

use super::PrettyJson;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    PrettyJson(json!({
        "status": "ok",
        "service": "recipe-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
