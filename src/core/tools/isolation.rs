//! Handler Isolation and Panic Safety
//!
//! Tool handlers run inside a live conversation turn, which cannot unwind.
//! Panics in handler code are caught here and converted to a failed
//! [`ToolResult`].
//!
//! `catch_unwind` only catches panics, not aborts, so the crate must not be
//! built with `panic = "abort"`.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use super::events::ToolResult;

/// Run a handler, turning a panic into a failed result.
pub fn call_handler_safely<F>(tool_name: &str, handler: F) -> ToolResult
where
    F: FnOnce() -> ToolResult,
{
    match catch_unwind(AssertUnwindSafe(handler)) {
        Ok(result) => result,
        Err(panic_info) => {
            let msg = extract_panic_message(&panic_info);
            tracing::error!(tool = %tool_name, message = %msg, "Tool handler panicked");
            ToolResult::failure(format!("Tool '{tool_name}' failed: {msg}"))
        }
    }
}

/// Extract a readable message from a panic payload.
fn extract_panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
