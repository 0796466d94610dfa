use axum::Json;

use crate::core::tools::{ToolDefinition, tool_definitions};

/// List the tools advertised to the realtime provider.
pub async fn list_tools() -> Json<Vec<ToolDefinition>> {
    Json(tool_definitions())
}
