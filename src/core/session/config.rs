//! Realtime session configuration types.
//!
//! This module contains the values that shape one upstream session:
//! - Model selection
//! - Voice selection
//! - Interview type and position (request-scoped)

use serde::{Deserialize, Serialize};

/// Default upstream API base for realtime session creation.
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Path of the session-creation endpoint, relative to the API base.
pub const REALTIME_SESSIONS_PATH: &str = "realtime/sessions";

/// Default job position when neither the request nor the config names one.
pub const DEFAULT_POSITION: &str = "Software Developer";

/// Default upstream request timeout in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 15;

// =============================================================================
// Models
// =============================================================================

/// Supported OpenAI Realtime models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RealtimeModel {
    /// GPT-4o Realtime Preview model
    #[serde(rename = "gpt-4o-realtime-preview")]
    Gpt4oRealtimePreview,
    /// GPT-4o Realtime Preview 2024-12-17
    #[default]
    #[serde(rename = "gpt-4o-realtime-preview-2024-12-17")]
    Gpt4oRealtimePreview20241217,
    /// GPT-4o Mini Realtime Preview
    #[serde(rename = "gpt-4o-mini-realtime-preview")]
    Gpt4oMiniRealtimePreview,
    /// GPT-4o Mini Realtime Preview 2024-12-17
    #[serde(rename = "gpt-4o-mini-realtime-preview-2024-12-17")]
    Gpt4oMiniRealtimePreview20241217,
}

impl RealtimeModel {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gpt4oRealtimePreview => "gpt-4o-realtime-preview",
            Self::Gpt4oRealtimePreview20241217 => "gpt-4o-realtime-preview-2024-12-17",
            Self::Gpt4oMiniRealtimePreview => "gpt-4o-mini-realtime-preview",
            Self::Gpt4oMiniRealtimePreview20241217 => "gpt-4o-mini-realtime-preview-2024-12-17",
        }
    }

    /// Parse from string, with fallback to default.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "gpt-4o-realtime-preview" => Self::Gpt4oRealtimePreview,
            "gpt-4o-realtime-preview-2024-12-17" => Self::Gpt4oRealtimePreview20241217,
            "gpt-4o-mini-realtime-preview" => Self::Gpt4oMiniRealtimePreview,
            "gpt-4o-mini-realtime-preview-2024-12-17" => Self::Gpt4oMiniRealtimePreview20241217,
            _ => Self::default(),
        }
    }
}

impl std::fmt::Display for RealtimeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Voices
// =============================================================================

/// Voices accepted by the realtime session endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RealtimeVoice {
    /// Alloy voice (default)
    #[default]
    Alloy,
    Ash,
    Ballad,
    Coral,
    Echo,
    Sage,
    Shimmer,
    Verse,
}

impl RealtimeVoice {
    /// Convert to the API parameter value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Ash => "ash",
            Self::Ballad => "ballad",
            Self::Coral => "coral",
            Self::Echo => "echo",
            Self::Sage => "sage",
            Self::Shimmer => "shimmer",
            Self::Verse => "verse",
        }
    }

    /// Parse a voice name. Returns `None` for unsupported voices.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "alloy" => Some(Self::Alloy),
            "ash" => Some(Self::Ash),
            "ballad" => Some(Self::Ballad),
            "coral" => Some(Self::Coral),
            "echo" => Some(Self::Echo),
            "sage" => Some(Self::Sage),
            "shimmer" => Some(Self::Shimmer),
            "verse" => Some(Self::Verse),
            _ => None,
        }
    }
}

impl std::fmt::Display for RealtimeVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Upstream settings
// =============================================================================

/// Process-wide settings for talking to the session-creation endpoint.
///
/// Immutable after startup; per-interview values live in [`SessionSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealtimeConfig {
    /// API base, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub model: RealtimeModel,
    /// Voice used when the request does not pick a supported one
    pub default_voice: RealtimeVoice,
    pub modalities: Vec<String>,
    pub tool_choice: String,
    pub timeout_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            base_url: OPENAI_API_BASE_URL.to_string(),
            model: RealtimeModel::default(),
            default_voice: RealtimeVoice::default(),
            modalities: vec!["audio".to_string(), "text".to_string()],
            tool_choice: "auto".to_string(),
            timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
        }
    }
}

impl RealtimeConfig {
    /// Full URL of the session-creation endpoint.
    pub fn sessions_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            REALTIME_SESSIONS_PATH
        )
    }
}

// =============================================================================
// Interview settings
// =============================================================================

/// Kind of interview the AI should conduct.
///
/// The well-known kinds match the choices offered by the UI. Any other
/// non-empty value is carried verbatim as [`InterviewType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InterviewType {
    #[default]
    Technical,
    Behavioral,
    SystemDesign,
    General,
    Hr,
    Custom(String),
}

impl InterviewType {
    /// Value embedded in the session instructions.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Technical => "technical",
            Self::Behavioral => "behavioral",
            Self::SystemDesign => "system-design",
            Self::General => "general",
            Self::Hr => "hr",
            Self::Custom(value) => value,
        }
    }

    /// Parse a non-blank interview type. Unknown values are kept untouched,
    /// surrounding whitespace included.
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().is_empty() {
            return None;
        }
        Some(match s {
            "technical" => Self::Technical,
            "behavioral" => Self::Behavioral,
            "system-design" => Self::SystemDesign,
            "general" => Self::General,
            "hr" => Self::Hr,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl std::fmt::Display for InterviewType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interview configuration for a single session request.
///
/// Built per request and passed by value into the session client; it is
/// never stored anywhere that outlives the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub interview_type: InterviewType,
    pub position: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            interview_type: InterviewType::default(),
            position: DEFAULT_POSITION.to_string(),
        }
    }
}

/// Everything the session client needs to create one upstream session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub interview: SessionConfig,
    pub voice: RealtimeVoice,
    /// Whether the tool catalog is advertised to the provider.
    pub tools_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_from_str_or_default() {
        assert_eq!(
            RealtimeModel::from_str_or_default("gpt-4o-mini-realtime-preview"),
            RealtimeModel::Gpt4oMiniRealtimePreview
        );
        assert_eq!(
            RealtimeModel::from_str_or_default("unknown"),
            RealtimeModel::Gpt4oRealtimePreview20241217
        );
    }

    #[test]
    fn test_voice_parse_case_insensitive() {
        assert_eq!(RealtimeVoice::parse("ASH"), Some(RealtimeVoice::Ash));
        assert_eq!(RealtimeVoice::parse("robot"), None);
    }

    #[test]
    fn test_sessions_url_handles_trailing_slash() {
        let mut config = RealtimeConfig::default();
        assert_eq!(
            config.sessions_url(),
            "https://api.openai.com/v1/realtime/sessions"
        );
        config.base_url = "http://127.0.0.1:9000/v1/".to_string();
        assert_eq!(
            config.sessions_url(),
            "http://127.0.0.1:9000/v1/realtime/sessions"
        );
    }

    #[test]
    fn test_interview_type_known_and_custom() {
        assert_eq!(InterviewType::parse("hr"), Some(InterviewType::Hr));
        assert_eq!(
            InterviewType::parse("system-design"),
            Some(InterviewType::SystemDesign)
        );
        assert_eq!(
            InterviewType::parse("pair programming"),
            Some(InterviewType::Custom("pair programming".to_string()))
        );
        assert_eq!(InterviewType::parse("   "), None);
        assert_eq!(
            InterviewType::parse(" hr "),
            Some(InterviewType::Custom(" hr ".to_string()))
        );
    }

    #[test]
    fn test_custom_interview_type_round_trips_verbatim() {
        let custom = InterviewType::parse("Staff+ leadership").unwrap();
        assert_eq!(custom.as_str(), "Staff+ leadership");
    }
}
