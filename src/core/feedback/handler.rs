//! `saveInterviewFeedback` tool handler.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::record::FeedbackInput;
use super::store::FeedbackStore;
use crate::core::tools::{ToolHandlers, ToolResult};

/// User-visible notifications raised by tool handlers.
pub trait Notifier: Send + Sync {
    fn success(&self, title: &str, description: &str);
}

/// Notifier that writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, title: &str, description: &str) {
        info!(title = %title, "{description}");
    }
}

pub const FEEDBACK_SAVED_TITLE: &str = "Interview feedback saved!";
pub const FEEDBACK_SAVED_DESCRIPTION: &str =
    "The feedback has been saved and can be viewed later.";

/// Handlers for every catalog tool, backed by the feedback store.
pub struct InterviewToolHandlers {
    store: FeedbackStore,
    notifier: Arc<dyn Notifier>,
}

impl InterviewToolHandlers {
    pub fn new(store: FeedbackStore, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    pub fn store(&self) -> &FeedbackStore {
        &self.store
    }
}

impl ToolHandlers for InterviewToolHandlers {
    fn save_interview_feedback(&self, args: &Map<String, Value>) -> ToolResult {
        let input = match parse_feedback_args(args) {
            Ok(input) => input,
            Err(message) => {
                warn!("Rejected feedback with invalid arguments");
                return ToolResult::failure(message);
            }
        };

        let summary = format!(
            "I've saved your interview feedback. Here's a summary: Overall rating: {}. \
             Key strengths: {}. Areas to improve: {}. Recommendations: {}",
            input.overall_rating, input.strengths, input.weaknesses, input.recommendations
        );

        match self.store.append(input) {
            Ok(_) => {
                self.notifier
                    .success(FEEDBACK_SAVED_TITLE, FEEDBACK_SAVED_DESCRIPTION);
                ToolResult::success(summary)
            }
            Err(e) => ToolResult::failure(format!("Error saving feedback: {e}")),
        }
    }
}

/// Extract the four required string fields.
///
/// Every missing or non-string field is named in the error.
pub fn parse_feedback_args(args: &Map<String, Value>) -> Result<FeedbackInput, String> {
    let mut problems = Vec::new();
    let mut field = |name: &str| match args.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            problems.push(format!("'{name}' must be a string"));
            String::new()
        }
        None => {
            problems.push(format!("'{name}' is required"));
            String::new()
        }
    };

    let input = FeedbackInput {
        strengths: field("strengths"),
        weaknesses: field("weaknesses"),
        overall_rating: field("overallRating"),
        recommendations: field("recommendations"),
    };

    if problems.is_empty() {
        Ok(input)
    } else {
        Err(format!("Error saving feedback: {}", problems.join(", ")))
    }
}
