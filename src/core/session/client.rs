//! Upstream session-creation client.
//!
//! Makes exactly one request per call: no retries, one timeout. The
//! server-held API key is only ever placed in the `Authorization` header;
//! every error message that may echo upstream text is redacted first.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::{RealtimeConfig, SessionSettings};
use super::messages::{SessionCreateRequest, SessionCredentials};

/// Maximum number of upstream body characters kept in error messages.
pub const MAX_UPSTREAM_ERROR_CHARS: usize = 512;

/// Largest successful upstream body accepted.
pub const MAX_UPSTREAM_BODY_BYTES: usize = 256 * 1024;

const REDACTED: &str = "[REDACTED]";

/// Errors that can occur while creating a realtime session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The provider API key is not configured
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// The provider answered with a non-success status
    #[error("API request failed with status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The provider could not be reached
    #[error("Failed to reach realtime provider: {0}")]
    Transport(String),

    /// The provider did not answer in time
    #[error("Realtime provider did not respond within {0} seconds")]
    Timeout(u64),

    /// The provider answered with something other than the expected JSON
    #[error("Malformed response from realtime provider: {0}")]
    MalformedResponse(String),

    /// The HTTP client could not be built
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Client for the provider's session-creation endpoint.
///
/// Holds only immutable state, so one instance is shared by all requests.
#[derive(Debug, Clone)]
pub struct SessionClient {
    http_client: reqwest::Client,
    config: RealtimeConfig,
}

impl SessionClient {
    pub fn new(config: RealtimeConfig) -> SessionResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SessionError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }

    /// Build the upstream request body for the given settings.
    pub fn build_request(&self, settings: &SessionSettings) -> SessionCreateRequest {
        SessionCreateRequest::build(
            self.config.model,
            &self.config.modalities,
            &self.config.tool_choice,
            settings,
        )
    }

    /// Create one realtime session and return the client credentials.
    pub async fn create_session(
        &self,
        api_key: &str,
        settings: &SessionSettings,
    ) -> SessionResult<SessionCredentials> {
        let body = self.build_request(settings);
        let url = self.config.sessions_url();

        debug!(
            url = %url,
            model = %body.model,
            voice = %body.voice,
            tools = body.tools.len(),
            "Requesting realtime session"
        );

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e, api_key))?;

        let status = response.status();

        if !status.is_success() {
            // Enough bytes for the kept characters plus a secret straddling the cut.
            let limit = MAX_UPSTREAM_ERROR_CHARS * 4 + api_key.len();
            let (bytes, _) = read_body_capped(response, limit)
                .await
                .map_err(|e| self.transport_error(e, api_key))?;
            let text = String::from_utf8_lossy(&bytes);
            let body = truncate_chars(&redact(&text, api_key), MAX_UPSTREAM_ERROR_CHARS);
            warn!(status = status.as_u16(), "Realtime session request rejected");
            return Err(SessionError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let (bytes, truncated) = read_body_capped(response, MAX_UPSTREAM_BODY_BYTES)
            .await
            .map_err(|e| self.transport_error(e, api_key))?;
        if truncated {
            return Err(SessionError::MalformedResponse(format!(
                "body exceeds {MAX_UPSTREAM_BODY_BYTES} bytes"
            )));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| SessionError::MalformedResponse(format!("invalid JSON: {e}")))?;

        SessionCredentials::from_provider(value).ok_or_else(|| {
            SessionError::MalformedResponse("response carries no client token".to_string())
        })
    }

    fn transport_error(&self, error: reqwest::Error, api_key: &str) -> SessionError {
        if error.is_timeout() {
            SessionError::Timeout(self.config.timeout_seconds)
        } else {
            SessionError::Transport(redact(&error.to_string(), api_key))
        }
    }
}

/// Read at most `limit` bytes of a response body, chunk by chunk.
///
/// The flag is `true` when the body had more to give.
async fn read_body_capped(
    mut response: reqwest::Response,
    limit: usize,
) -> reqwest::Result<(Vec<u8>, bool)> {
    let mut buf = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let room = limit - buf.len();
        if chunk.len() > room {
            buf.extend_from_slice(&chunk[..room]);
            return Ok((buf, true));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok((buf, false))
}

/// Replace every occurrence of `secret` in `text`.
pub fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, REDACTED)
}

/// Keep at most `max` characters, marking the cut.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_replaces_all_occurrences() {
        let out = redact("key sk-123 and again sk-123", "sk-123");
        assert_eq!(out, "key [REDACTED] and again [REDACTED]");
        assert_eq!(redact("unchanged", ""), "unchanged");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc...");
        // multi-byte characters are never split
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }

    #[test]
    fn test_error_messages_carry_status() {
        let err = SessionError::UpstreamStatus {
            status: 401,
            body: "bad key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 401: bad key"
        );
        assert_eq!(
            SessionError::MissingApiKey.to_string(),
            "OPENAI_API_KEY is not set"
        );
    }

    fn response_with_body(body: Vec<u8>) -> reqwest::Response {
        reqwest::Response::from(http::Response::new(body))
    }

    #[tokio::test]
    async fn test_read_body_capped_stops_at_limit() {
        let response = response_with_body(vec![b'a'; 10_000]);
        let (bytes, truncated) = read_body_capped(response, 1024).await.unwrap();
        assert_eq!(bytes.len(), 1024);
        assert!(truncated);
    }

    #[tokio::test]
    async fn test_read_body_capped_keeps_small_bodies() {
        let response = response_with_body(b"{\"client_token\":\"t\"}".to_vec());
        let (bytes, truncated) = read_body_capped(response, 1024).await.unwrap();
        assert_eq!(bytes, b"{\"client_token\":\"t\"}");
        assert!(!truncated);

        let exact = response_with_body(vec![b'b'; 64]);
        let (bytes, truncated) = read_body_capped(exact, 64).await.unwrap();
        assert_eq!(bytes.len(), 64);
        assert!(!truncated);
    }

    #[test]
    fn test_client_builds_with_defaults() {
        let client = SessionClient::new(RealtimeConfig::default()).unwrap();
        assert_eq!(client.config().timeout_seconds, 15);
    }
}
