//! Interview feedback persistence.
//!
//! Feedback is written by the `saveInterviewFeedback` tool and read by the
//! feedback history view. Records live in client-local storage as one JSON
//! array under [`FEEDBACK_STORAGE_KEY`].

pub mod handler;
pub mod record;
pub mod storage;
pub mod store;

pub use handler::{InterviewToolHandlers, Notifier, TracingNotifier, parse_feedback_args};
pub use record::{FeedbackInput, FeedbackRecord};
pub use storage::{FileStorage, LocalStorage, MemoryStorage, StorageError};
pub use store::{FEEDBACK_STORAGE_KEY, FeedbackError, FeedbackStore};
