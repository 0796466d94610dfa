use axum::Json;
use serde_json::{Value, json};

pub const SERVICE_NAME: &str = "interview-relay";

/// Liveness probe; never touches the provider.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "service": SERVICE_NAME,
    }))
}
