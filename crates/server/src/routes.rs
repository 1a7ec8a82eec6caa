use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::tools::ToolRegistry;

/// Shared application state.
pub struct AppState {
    pub registry: ToolRegistry,
    pub metrics_handle: PrometheusHandle,
}

/// POST /tools/call request body.
#[derive(Deserialize)]
pub struct ToolCallRequest {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// POST /tools/call — dispatch a named tool invocation. Handler failures
/// are tool results with `is_error`, not transport errors.
pub async fn call_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToolCallRequest>,
) -> Json<Value> {
    let result = state.registry.execute(&request.name, request.arguments).await;

    Json(json!({
        "tool": request.name,
        "is_error": result.is_error,
        "result": result.content,
    }))
}

/// GET /tools — list registered tool names.
pub async fn list_handler(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.registry.tool_names())
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy" })),
    )
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
