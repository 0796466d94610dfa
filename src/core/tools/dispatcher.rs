//! Tool Dispatcher
//!
//! Maps tool names from the catalog to local handler functions and runs
//! them when the provider reports a tool call.
//!
//! # Guarantees
//!
//! - Registration is checked against the catalog: an unknown name is a
//!   configuration error, reported at startup.
//! - [`ToolDispatcher::dispatch`] always returns a [`ToolResult`]. Unknown
//!   tools, missing handlers and panicking handlers all become
//!   `success = false`.
//! - Calls are serialized: one handler finishes before the next starts.
//!   Handlers must not call back into the dispatcher.
//!
//! # Usage
//!
//! ```ignore
//! let dispatcher = ToolDispatcher::with_handlers(Arc::new(handlers));
//! let result = dispatcher.dispatch(&event);
//! ```

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::catalog::ToolName;
use super::events::{FunctionCallArgumentsDone, FunctionCallOutput, ToolCallEvent, ToolResult};
use super::isolation::call_handler_safely;

/// Handler function type for a single tool.
pub type ToolHandlerFn = Arc<dyn Fn(&Map<String, Value>) -> ToolResult + Send + Sync>;

/// Configuration errors raised while wiring handlers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The handler name has no catalog entry
    #[error("Tool '{0}' is not in the tool catalog")]
    UnknownTool(String),

    /// Catalog entries without a registered handler
    #[error("No handler registered for tool(s): {}", .0.join(", "))]
    MissingHandlers(Vec<String>),
}

/// One method per catalog tool.
///
/// Implementing this trait is the compile-time checked way to wire the
/// dispatcher: a new [`ToolName`] variant without a method here does not
/// build.
pub trait ToolHandlers: Send + Sync + 'static {
    fn save_interview_feedback(&self, args: &Map<String, Value>) -> ToolResult;
}

/// Runs tool calls against registered handlers.
pub struct ToolDispatcher {
    handlers: HashMap<ToolName, ToolHandlerFn>,
    turn: Mutex<()>,
}

impl Default for ToolDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(ToolName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ToolDispatcher")
            .field("handlers", &names)
            .finish()
    }
}

impl ToolDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            turn: Mutex::new(()),
        }
    }

    /// Create a dispatcher with a handler for every catalog tool.
    pub fn with_handlers<H: ToolHandlers>(handlers: Arc<H>) -> Self {
        let mut dispatcher = Self::new();
        for tool in ToolName::ALL {
            let h = Arc::clone(&handlers);
            let handler: ToolHandlerFn = match tool {
                ToolName::SaveInterviewFeedback => {
                    Arc::new(move |args: &Map<String, Value>| h.save_interview_feedback(args))
                }
            };
            dispatcher.handlers.insert(*tool, handler);
        }
        dispatcher
    }

    /// Register a handler by wire name.
    ///
    /// Fails when `name` is not in the catalog.
    pub fn register<F>(&mut self, name: &str, handler: F) -> Result<(), DispatchError>
    where
        F: Fn(&Map<String, Value>) -> ToolResult + Send + Sync + 'static,
    {
        let tool = ToolName::parse(name).ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;
        self.register_tool(tool, handler);
        Ok(())
    }

    /// Register a handler for a catalog tool, replacing any previous one.
    pub fn register_tool<F>(&mut self, tool: ToolName, handler: F)
    where
        F: Fn(&Map<String, Value>) -> ToolResult + Send + Sync + 'static,
    {
        if self.handlers.insert(tool, Arc::new(handler)).is_some() {
            debug!(tool = %tool, "Replaced tool handler");
        }
    }

    /// Check that every catalog tool has a handler.
    pub fn ensure_complete(&self) -> Result<(), DispatchError> {
        let missing: Vec<String> = ToolName::ALL
            .iter()
            .filter(|tool| !self.handlers.contains_key(tool))
            .map(|tool| tool.as_str().to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::MissingHandlers(missing))
        }
    }

    /// Run one tool call and return its result.
    pub fn dispatch(&self, event: &ToolCallEvent) -> ToolResult {
        let Some(tool) = ToolName::parse(&event.tool_name) else {
            warn!(tool = %event.tool_name, "Rejected call to unknown tool");
            return ToolResult::failure(format!("Unknown tool: {}", event.tool_name));
        };

        let Some(handler) = self.handlers.get(&tool).cloned() else {
            warn!(tool = %tool, "Tool call without a registered handler");
            return ToolResult::failure(format!("No handler registered for tool: {tool}"));
        };

        let _turn = self.turn.lock();
        let result = call_handler_safely(tool.as_str(), || handler(&event.arguments));

        info!(
            tool = %tool,
            call_id = event.call_id.as_deref().unwrap_or("-"),
            success = result.success,
            "Tool call completed"
        );
        result
    }

    /// Run a provider function call whose arguments are a JSON string.
    ///
    /// Malformed arguments become a failed result for the same call.
    pub fn dispatch_function_call(
        &self,
        call_id: &str,
        name: &str,
        arguments: &str,
    ) -> FunctionCallOutput {
        let result = match ToolCallEvent::parse_arguments(arguments) {
            Ok(args) => self.dispatch(&ToolCallEvent::new(name, args).with_call_id(call_id)),
            Err(message) => {
                warn!(tool = %name, call_id = %call_id, "Tool call with malformed arguments");
                ToolResult::failure(message)
            }
        };

        FunctionCallOutput {
            call_id: call_id.to_string(),
            result,
        }
    }

    /// Handle a raw provider server event.
    ///
    /// Returns `None` for events that are not completed function calls.
    pub fn dispatch_server_event(&self, event: &Value) -> Option<FunctionCallOutput> {
        let call = FunctionCallArgumentsDone::from_server_event(event)?;
        Some(self.dispatch_function_call(&call.call_id, &call.name, &call.arguments))
    }
}
