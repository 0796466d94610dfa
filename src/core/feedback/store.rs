//! Append-only feedback history on top of [`LocalStorage`].

use std::sync::Arc;

use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime, UtcOffset};
use tracing::{debug, warn};

use super::record::{FeedbackInput, FeedbackRecord};
use super::storage::{LocalStorage, StorageError};

/// Storage key holding the JSON-encoded feedback sequence.
pub const FEEDBACK_STORAGE_KEY: &str = "interviewFeedback";

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Failed to encode feedback: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to format timestamp: {0}")]
    Timestamp(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Ordered, append-only sequence of [`FeedbackRecord`]s.
///
/// Each append is a read-modify-write of the whole sequence; a single
/// writer is assumed.
#[derive(Clone)]
pub struct FeedbackStore {
    storage: Arc<dyn LocalStorage>,
    key: String,
}

impl std::fmt::Debug for FeedbackStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl FeedbackStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self::with_key(storage, FEEDBACK_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn LocalStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Read the stored sequence.
    ///
    /// Absent, unreadable or malformed content reads as an empty sequence.
    pub fn load(&self) -> Vec<FeedbackRecord> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read feedback history");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<FeedbackRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Ignoring malformed feedback history");
                Vec::new()
            }
        }
    }

    /// Replace the stored sequence.
    pub fn save(&self, records: &[FeedbackRecord]) -> Result<(), FeedbackError> {
        let encoded = serde_json::to_string(records)?;
        self.storage.set_item(&self.key, &encoded)?;
        Ok(())
    }

    /// Append one record stamped with the current time.
    pub fn append(&self, input: FeedbackInput) -> Result<FeedbackRecord, FeedbackError> {
        self.append_at(input, OffsetDateTime::now_utc())
    }

    /// Append one record as of `now`.
    ///
    /// Timestamps are strictly increasing: when `now` is not past the last
    /// record, the new record is stamped one millisecond after it.
    pub fn append_at(
        &self,
        input: FeedbackInput,
        now: OffsetDateTime,
    ) -> Result<FeedbackRecord, FeedbackError> {
        let mut records = self.load();
        let stamp = next_timestamp(records.last(), now)
            .format(&Rfc3339)
            .map_err(|e| FeedbackError::Timestamp(e.to_string()))?;

        let record = FeedbackRecord::new(input, stamp);
        records.push(record.clone());
        self.save(&records)?;

        debug!(key = %self.key, total = records.len(), "Feedback record appended");
        Ok(record)
    }
}

fn next_timestamp(last: Option<&FeedbackRecord>, now: OffsetDateTime) -> OffsetDateTime {
    let now = truncate_to_millis(now.to_offset(UtcOffset::UTC));
    match last.and_then(FeedbackRecord::recorded_at) {
        Some(prev) if now <= prev => {
            truncate_to_millis(prev.to_offset(UtcOffset::UTC)) + Duration::milliseconds(1)
        }
        _ => now,
    }
}

fn truncate_to_millis(at: OffsetDateTime) -> OffsetDateTime {
    at.replace_nanosecond(u32::from(at.millisecond()) * 1_000_000)
        .unwrap_or(at)
}
