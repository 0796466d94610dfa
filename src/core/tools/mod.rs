//! AI-invocable tools.
//!
//! - `catalog` - the static tool catalog advertised to the provider
//! - `dispatcher` - maps tool calls to local handlers
//! - `events` - tool call events, results and their wire forms
//! - `isolation` - panic containment for handlers

pub mod catalog;
pub mod dispatcher;
pub mod events;
pub mod isolation;

pub use catalog::{ParameterSpec, ParameterType, ToolDefinition, ToolName, tool_definitions};
pub use dispatcher::{DispatchError, ToolDispatcher, ToolHandlerFn, ToolHandlers};
pub use events::{
    FUNCTION_CALL_ARGUMENTS_DONE, FunctionCallArgumentsDone, FunctionCallOutput, ToolCallEvent,
    ToolResult,
};
