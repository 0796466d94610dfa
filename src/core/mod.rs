pub mod feedback;
pub mod session;
pub mod tools;

// Re-export commonly used types for convenience
pub use session::{
    EphemeralCredential, InterviewType, RealtimeConfig, RealtimeModel, RealtimeVoice,
    SessionClient, SessionConfig, SessionCredentials, SessionError, SessionSettings,
};

pub use tools::{
    DispatchError, FunctionCallOutput, ToolCallEvent, ToolDefinition, ToolDispatcher,
    ToolHandlers, ToolName, ToolResult, tool_definitions,
};

pub use feedback::{
    FeedbackRecord, FeedbackStore, FileStorage, InterviewToolHandlers, LocalStorage,
    MemoryStorage, Notifier, TracingNotifier,
};
