use serde::Deserialize;
use std::path::PathBuf;

/// Root YAML configuration structure
///
/// Every section and every field is optional; absent values fall back to
/// environment variables and then to defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub providers: Option<ProvidersYaml>,
    pub realtime: Option<RealtimeYaml>,
    pub interview: Option<InterviewYaml>,
    pub feedback: Option<FeedbackYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls: Option<TlsYaml>,
}

/// TLS configuration from YAML
///
/// # Example YAML structure
/// ```yaml
/// server:
///   tls:
///     enabled: true
///     cert_path: "/etc/letsencrypt/live/example.com/fullchain.pem"
///     key_path: "/etc/letsencrypt/live/example.com/privkey.pem"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TlsYaml {
    pub enabled: Option<bool>,
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

/// Provider credentials from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    pub openai_api_key: Option<String>,
}

/// Realtime session endpoint configuration from YAML
///
/// # Example YAML structure
/// ```yaml
/// realtime:
///   base_url: "https://api.openai.com/v1"
///   model: "gpt-4o-realtime-preview-2024-12-17"
///   voice: "alloy"
///   tool_choice: "auto"
///   timeout_seconds: 15
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RealtimeYaml {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub voice: Option<String>,
    pub tool_choice: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Interview defaults from YAML
///
/// `malformed_body` is either `fallback` or `reject`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct InterviewYaml {
    pub default_type: Option<String>,
    pub default_position: Option<String>,
    pub malformed_body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FeedbackYaml {
    pub storage_path: Option<String>,
}

/// Security configuration from YAML
///
/// # Example YAML structure
/// ```yaml
/// security:
///   cors_allowed_origins: "https://example.com,https://app.example.com"
///   rate_limit_requests_per_second: 60
///   rate_limit_burst_size: 10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    /// CORS allowed origins (comma-separated list or "*" for all)
    pub cors_allowed_origins: Option<String>,
    /// Maximum requests per second per IP address
    pub rate_limit_requests_per_second: Option<u32>,
    /// Maximum burst size for rate limiting
    pub rate_limit_burst_size: Option<u32>,
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the YAML is malformed.
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
