//! JSON API over the engine's query and command interfaces. Serves
//! data only; dashboard rendering is out of scope.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use tracing::info;

use vision_engine::{ManualCommand, VisionEngine};

pub async fn serve(engine: Arc<VisionEngine>, bind_addr: &str) -> Result<(), String> {
    let app = Router::new()
        .route("/api/health", get(api_health))
        .route("/api/devices", get(api_devices))
        .route("/api/devices/:name/report", get(api_device_report))
        .route("/api/charts", get(api_charts))
        .route("/api/alert", get(api_alert))
        .route("/api/notifications", get(api_notifications))
        .route("/api/control/:action", post(api_control))
        .with_state(engine);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| format!("Failed to bind API to {bind_addr}: {e}"))?;

    info!(addr = %bind_addr, "API started");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("API server error: {e}"))
}

async fn api_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn api_devices(State(engine): State<Arc<VisionEngine>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "names": engine.device_names(),
        "devices": engine.devices(),
    }))
}

async fn api_device_report(
    State(engine): State<Arc<VisionEngine>>,
    Path(name): Path<String>,
) -> Response {
    match engine.device_report(&name, Utc::now()) {
        Ok(report) => (StatusCode::OK, report).into_response(),
        Err(e) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    }
}

async fn api_charts(State(engine): State<Arc<VisionEngine>>) -> Json<serde_json::Value> {
    Json(serde_json::json!(engine.chart_series()))
}

/// Read-once transient popup; `null` when nothing is pending.
async fn api_alert(State(engine): State<Arc<VisionEngine>>) -> Json<serde_json::Value> {
    Json(serde_json::json!(engine.poll_transient_alert()))
}

async fn api_notifications(State(engine): State<Arc<VisionEngine>>) -> Json<serde_json::Value> {
    Json(serde_json::json!(engine.notifications()))
}

async fn api_control(
    State(engine): State<Arc<VisionEngine>>,
    Path(action): Path<String>,
) -> Response {
    match ManualCommand::parse(&action) {
        Some(command) => {
            let ack = engine.execute(command);
            info!(action = %action, "Manual control executed");
            (StatusCode::OK, ack).into_response()
        }
        None => (StatusCode::BAD_REQUEST, format!("Unknown action: {action}")).into_response(),
    }
}
