//! Merging YAML and environment configurations.
//!
//! Priority per field: YAML > environment > default.

use std::path::PathBuf;

use tracing::warn;

use super::env::EnvConfig;
use super::yaml::YamlConfig;
use super::{
    DEFAULT_FEEDBACK_STORAGE_PATH, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RATE_LIMIT_BURST_SIZE,
    DEFAULT_RATE_LIMIT_RPS, MalformedBodyPolicy, ServerConfig, TlsConfig,
};
use crate::core::session::{
    InterviewType, RealtimeConfig, RealtimeModel, RealtimeVoice, SessionConfig,
};

pub fn merge_config(yaml: Option<YamlConfig>) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let env = EnvConfig::load()?;
    let yaml = yaml.unwrap_or_default();

    let server = yaml.server.unwrap_or_default();
    let providers = yaml.providers.unwrap_or_default();
    let realtime = yaml.realtime.unwrap_or_default();
    let interview = yaml.interview.unwrap_or_default();
    let feedback = yaml.feedback.unwrap_or_default();
    let security = yaml.security.unwrap_or_default();

    let tls_yaml = server.tls.unwrap_or_default();
    let tls_enabled = tls_yaml.enabled.or(env.tls_enabled).unwrap_or(false);
    let tls = if tls_enabled {
        let cert_path = tls_yaml
            .cert_path
            .or(env.tls_cert_path)
            .ok_or("TLS is enabled but TLS_CERT_PATH is not set")?;
        let key_path = tls_yaml
            .key_path
            .or(env.tls_key_path)
            .ok_or("TLS is enabled but TLS_KEY_PATH is not set")?;
        Some(TlsConfig {
            cert_path: PathBuf::from(cert_path),
            key_path: PathBuf::from(key_path),
        })
    } else {
        None
    };

    let defaults = RealtimeConfig::default();

    let model = match realtime.model.or(env.realtime_model) {
        Some(raw) => {
            let model = RealtimeModel::from_str_or_default(&raw);
            if model.as_str() != raw.trim().to_lowercase() {
                warn!(requested = %raw, using = %model, "Unknown realtime model, using default");
            }
            model
        }
        None => defaults.model,
    };

    let default_voice = match realtime.voice.or(env.realtime_voice) {
        Some(raw) => RealtimeVoice::parse(&raw)
            .ok_or_else(|| format!("Unsupported realtime voice: '{raw}'"))?,
        None => defaults.default_voice,
    };

    let realtime_config = RealtimeConfig {
        base_url: realtime
            .base_url
            .or(env.realtime_base_url)
            .unwrap_or(defaults.base_url),
        model,
        default_voice,
        modalities: defaults.modalities,
        tool_choice: realtime
            .tool_choice
            .or(env.realtime_tool_choice)
            .unwrap_or(defaults.tool_choice),
        timeout_seconds: realtime
            .timeout_seconds
            .or(env.upstream_timeout_seconds)
            .unwrap_or(defaults.timeout_seconds),
    };

    let session_defaults = SessionConfig::default();
    let interview_defaults = SessionConfig {
        interview_type: interview
            .default_type
            .or(env.default_interview_type)
            .and_then(|raw| InterviewType::parse(raw.trim()))
            .unwrap_or(session_defaults.interview_type),
        position: interview
            .default_position
            .or(env.default_position)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or(session_defaults.position),
    };

    let malformed_body_policy = match interview.malformed_body.or(env.malformed_body_policy) {
        Some(raw) => MalformedBodyPolicy::parse(&raw)
            .ok_or_else(|| format!("Invalid malformed body policy: '{raw}' (expected fallback or reject)"))?,
        None => MalformedBodyPolicy::default(),
    };

    Ok(ServerConfig {
        host: server
            .host
            .or(env.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: server.port.or(env.port).unwrap_or(DEFAULT_PORT),
        tls,
        openai_api_key: providers
            .openai_api_key
            .filter(|k| !k.trim().is_empty())
            .or(env.openai_api_key),
        realtime: realtime_config,
        interview_defaults,
        malformed_body_policy,
        feedback_storage_path: PathBuf::from(
            feedback
                .storage_path
                .or(env.feedback_storage_path)
                .unwrap_or_else(|| DEFAULT_FEEDBACK_STORAGE_PATH.to_string()),
        ),
        cors_allowed_origins: security.cors_allowed_origins.or(env.cors_allowed_origins),
        rate_limit_requests_per_second: security
            .rate_limit_requests_per_second
            .or(env.rate_limit_requests_per_second)
            .unwrap_or(DEFAULT_RATE_LIMIT_RPS),
        rate_limit_burst_size: security
            .rate_limit_burst_size
            .or(env.rate_limit_burst_size)
            .unwrap_or(DEFAULT_RATE_LIMIT_BURST_SIZE),
    })
}
