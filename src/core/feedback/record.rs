use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Feedback the AI recorded for one interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// RFC 3339 / ISO-8601 UTC timestamp
    pub timestamp: String,
    pub strengths: String,
    pub weaknesses: String,
    /// Free-form rating such as "Excellent", "Good", "Average" or "Poor"
    pub overall_rating: String,
    pub recommendations: String,
}

/// The four text fields of a record, as supplied by the AI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackInput {
    pub strengths: String,
    pub weaknesses: String,
    pub overall_rating: String,
    pub recommendations: String,
}

impl FeedbackRecord {
    pub fn new(input: FeedbackInput, timestamp: String) -> Self {
        Self {
            timestamp,
            strengths: input.strengths,
            weaknesses: input.weaknesses,
            overall_rating: input.overall_rating,
            recommendations: input.recommendations,
        }
    }

    /// Parsed timestamp, if it is valid RFC 3339.
    pub fn recorded_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.timestamp, &Rfc3339).ok()
    }

    /// Plain-text block for copying a record out of the history view.
    pub fn to_export_text(&self) -> String {
        format!(
            "Interview Feedback\n\
             -----------------\n\
             Date: {}\n\
             Overall Rating: {}\n\
             \n\
             Strengths:\n{}\n\
             \n\
             Areas for Improvement:\n{}\n\
             \n\
             Recommendations:\n{}\n",
            self.display_date(),
            self.overall_rating,
            self.strengths,
            self.weaknesses,
            self.recommendations
        )
    }

    fn display_date(&self) -> String {
        match self.recorded_at() {
            Some(at) => format!(
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
                at.year(),
                u8::from(at.month()),
                at.day(),
                at.hour(),
                at.minute(),
                at.second()
            ),
            None => self.timestamp.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: &str) -> FeedbackRecord {
        FeedbackRecord::new(
            FeedbackInput {
                strengths: "clear communication".to_string(),
                weaknesses: "depth on algorithms".to_string(),
                overall_rating: "Good".to_string(),
                recommendations: "practice system design".to_string(),
            },
            timestamp.to_string(),
        )
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(record("2024-05-01T10:00:00.000Z")).unwrap();
        assert_eq!(value["overallRating"], "Good");
        assert!(value.get("overall_rating").is_none());
        assert_eq!(value["timestamp"], "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_export_text() {
        let text = record("2024-05-01T10:02:03.000Z").to_export_text();
        assert!(text.starts_with("Interview Feedback\n"));
        assert!(text.contains("Date: 2024-05-01 10:02:03 UTC"));
        assert!(text.contains("Overall Rating: Good"));
        assert!(text.contains("Areas for Improvement:\ndepth on algorithms"));
        assert!(text.contains("Recommendations:\npractice system design"));
    }

    #[test]
    fn test_export_keeps_unparseable_timestamp() {
        let text = record("yesterday").to_export_text();
        assert!(text.contains("Date: yesterday"));
    }
}
