//! Tool call events and results.
//!
//! Inbound, the provider reports a completed function call as
//! `response.function_call_arguments.done` with the arguments as a JSON
//! string. Outbound, the result goes back as a `conversation.item.create`
//! carrying a `function_call_output` item.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool invocation requested by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallEvent {
    pub tool_name: String,
    #[serde(default)]
    pub arguments: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_id: Option<String>,
}

impl ToolCallEvent {
    pub fn new(tool_name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
            call_id: None,
        }
    }

    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    /// Parse the provider's JSON-encoded argument string.
    ///
    /// Empty input is treated as an empty argument map.
    pub fn parse_arguments(arguments: &str) -> Result<Map<String, Value>, String> {
        if arguments.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(arguments) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(format!(
                "Tool arguments must be a JSON object, got {}",
                json_kind(&other)
            )),
            Err(e) => Err(format!("Tool arguments are not valid JSON: {e}")),
        }
    }
}

/// Server event type reporting a completed function call.
pub const FUNCTION_CALL_ARGUMENTS_DONE: &str = "response.function_call_arguments.done";

/// A `response.function_call_arguments.done` server event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionCallArgumentsDone {
    pub call_id: String,
    pub name: String,
    /// JSON-encoded arguments, as streamed by the provider
    #[serde(default)]
    pub arguments: String,
}

impl FunctionCallArgumentsDone {
    /// Extract the function call from a raw server event.
    ///
    /// Returns `None` for any other event type or a call without `call_id`
    /// and `name`.
    pub fn from_server_event(event: &Value) -> Option<Self> {
        if event.get("type").and_then(Value::as_str) != Some(FUNCTION_CALL_ARGUMENTS_DONE) {
            return None;
        }
        serde_json::from_value(event.clone()).ok()
    }
}

/// Outcome of a tool call. Always populated, even on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub message: String,
}

impl ToolResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// A tool result addressed to a specific provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCallOutput {
    pub call_id: String,
    pub result: ToolResult,
}

impl FunctionCallOutput {
    /// `conversation.item.create` event that hands the result back to the
    /// conversation.
    pub fn to_client_event(&self) -> Value {
        let output = serde_json::to_string(&self.result).unwrap_or_default();

        serde_json::json!({
            "type": "conversation.item.create",
            "item": {
                "type": "function_call_output",
                "call_id": self.call_id,
                "output": output,
            }
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
