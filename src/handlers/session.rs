//! Realtime session credential endpoint.
//!
//! `POST /session-token` (aliases `POST /api/session` and `POST /`) exchanges the
//! server-held provider key for an ephemeral client credential.

use std::sync::Arc;

use axum::{Json, extract::State};
use bytes::Bytes;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::{MalformedBodyPolicy, ServerConfig};
use crate::core::session::{InterviewType, RealtimeVoice, SessionConfig, SessionSettings};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// A session request body that cannot be read at all.
#[derive(Debug, Error)]
pub enum SessionRequestError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Optional body of a session request. Every field may be absent.
///
/// Fields are read one by one, so a wrong-typed field is dropped on its own
/// without discarding its neighbours.
#[derive(Debug, Default, Clone)]
pub struct SessionTokenRequest {
    pub interview_type: Option<String>,
    pub position: Option<String>,
    pub voice: Option<String>,
    pub feedback_enabled: Option<bool>,
}

impl SessionTokenRequest {
    /// Parse a raw body. Empty bodies and JSON `null` are the empty request.
    pub fn from_body(body: &[u8]) -> Result<Self, SessionRequestError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(body)? {
            Value::Null => Ok(Self::default()),
            Value::Object(fields) => Ok(Self::from_fields(&fields)),
            other => Err(SessionRequestError::NotAnObject(json_kind(&other))),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            interview_type: string_field(fields, "interviewType"),
            position: string_field(fields, "position"),
            voice: string_field(fields, "voice"),
            feedback_enabled: match fields.get("feedbackEnabled") {
                None | Some(Value::Null) => None,
                Some(Value::Bool(enabled)) => Some(*enabled),
                Some(other) => {
                    warn!(
                        field = "feedbackEnabled",
                        kind = json_kind(other),
                        "Ignoring session request field of the wrong type"
                    );
                    None
                }
            },
        }
    }

    /// Resolve against the configured defaults. Blank strings count as absent.
    pub fn into_settings(self, config: &ServerConfig) -> SessionSettings {
        let defaults = &config.interview_defaults;

        let interview_type = self
            .interview_type
            .as_deref()
            .and_then(InterviewType::parse)
            .unwrap_or_else(|| defaults.interview_type.clone());

        let position = self
            .position
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| defaults.position.clone());

        let voice = match self.voice.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => RealtimeVoice::parse(raw).unwrap_or_else(|| {
                warn!(requested = %raw, "Unsupported voice, using configured default");
                config.realtime.default_voice
            }),
            _ => config.realtime.default_voice,
        };

        SessionSettings {
            interview: SessionConfig {
                interview_type,
                position,
            },
            voice,
            tools_enabled: self.feedback_enabled.unwrap_or(true),
        }
    }
}

fn string_field(fields: &Map<String, Value>, name: &'static str) -> Option<String> {
    match fields.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            warn!(
                field = name,
                kind = json_kind(other),
                "Ignoring session request field of the wrong type"
            );
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Create one realtime session and return its client credential
///
/// The provider key is checked before the body is looked at, so a
/// misconfigured server never contacts the provider.
pub async fn create_session_token(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let request_id = Uuid::new_v4();

    let api_key = state
        .config
        .require_api_key()
        .map_err(|e| AppError::Configuration(e.to_string()))?;

    let request = match SessionTokenRequest::from_body(&body) {
        Ok(request) => request,
        Err(e) => match state.config.malformed_body_policy {
            MalformedBodyPolicy::Fallback => {
                warn!(%request_id, error = %e, "Malformed session request body, using defaults");
                SessionTokenRequest::default()
            }
            MalformedBodyPolicy::Reject => return Err(AppError::BadRequest(e.to_string())),
        },
    };

    let settings = request.into_settings(&state.config);

    info!(
        %request_id,
        interview_type = %settings.interview.interview_type,
        position = %settings.interview.position,
        voice = %settings.voice,
        tools = settings.tools_enabled,
        "Creating realtime session"
    );

    let credentials = state
        .session_client
        .create_session(api_key, &settings)
        .await
        .inspect_err(|e| warn!(%request_id, error = %e, "Realtime session creation failed"))?;

    info!(%request_id, "Realtime session created");

    Ok(Json(credentials.into_response_body()))
}
