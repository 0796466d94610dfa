//! Wire types for the realtime session-creation endpoint.
//!
//! The relay sends a [`SessionCreateRequest`] upstream and turns the
//! provider's JSON reply into the client-facing shape:
//!
//! ```json
//! { "clientCredential": { "value": "<token>" }, "...": "provider fields" }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::config::{RealtimeModel, SessionSettings};
use super::instructions::build_instructions;
use crate::core::tools::{ToolDefinition, tool_definitions};

/// Response field that carries the normalized credential.
pub const CLIENT_CREDENTIAL_FIELD: &str = "clientCredential";

/// Session-creation request body sent to the provider.
#[derive(Debug, Clone, Serialize)]
pub struct SessionCreateRequest {
    pub model: String,
    pub voice: String,
    pub modalities: Vec<String>,
    pub instructions: String,
    pub tool_choice: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

impl SessionCreateRequest {
    /// Assemble the upstream body for one session.
    pub fn build(
        model: RealtimeModel,
        modalities: &[String],
        tool_choice: &str,
        settings: &SessionSettings,
    ) -> Self {
        let tools = if settings.tools_enabled {
            tool_definitions()
        } else {
            Vec::new()
        };

        Self {
            model: model.as_str().to_string(),
            voice: settings.voice.as_str().to_string(),
            modalities: modalities.to_vec(),
            instructions: build_instructions(&settings.interview),
            tool_choice: tool_choice.to_string(),
            tools,
        }
    }
}

/// Short-lived token that authorizes one realtime session.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralCredential {
    pub value: String,
}

impl std::fmt::Debug for EphemeralCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralCredential")
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Successful session creation, as returned to the browser.
#[derive(Debug, Clone)]
pub struct SessionCredentials {
    pub credential: EphemeralCredential,
    /// All provider fields, passed through unchanged.
    pub provider_fields: Map<String, Value>,
}

impl SessionCredentials {
    /// Extract the credential from a provider reply.
    ///
    /// The token is read from `client_token`, falling back to
    /// `client_secret.value`. Returns `None` when the reply is not an object
    /// or carries no token.
    pub fn from_provider(value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };

        let token = fields
            .get("client_token")
            .and_then(Value::as_str)
            .or_else(|| {
                fields
                    .get("client_secret")
                    .and_then(|secret| secret.get("value"))
                    .and_then(Value::as_str)
            })?
            .to_string();

        Some(Self {
            credential: EphemeralCredential { value: token },
            provider_fields: fields,
        })
    }

    /// Client-facing JSON body. The normalized credential wins over any
    /// provider field with the same name.
    pub fn into_response_body(self) -> Value {
        let mut body = self.provider_fields;
        body.insert(
            CLIENT_CREDENTIAL_FIELD.to_string(),
            serde_json::json!({ "value": self.credential.value }),
        );
        Value::Object(body)
    }
}
