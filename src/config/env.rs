//! Environment variable loading.
//!
//! Values are read raw here; defaults and YAML overrides are applied in
//! `merge`. Blank variables count as unset.

use std::str::FromStr;

/// Raw configuration values read from the process environment
#[derive(Debug, Default)]
pub struct EnvConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub tls_enabled: Option<bool>,
    pub tls_cert_path: Option<String>,
    pub tls_key_path: Option<String>,
    pub openai_api_key: Option<String>,
    pub realtime_base_url: Option<String>,
    pub realtime_model: Option<String>,
    pub realtime_voice: Option<String>,
    pub realtime_tool_choice: Option<String>,
    pub upstream_timeout_seconds: Option<u64>,
    pub default_interview_type: Option<String>,
    pub default_position: Option<String>,
    pub malformed_body_policy: Option<String>,
    pub feedback_storage_path: Option<String>,
    pub cors_allowed_origins: Option<String>,
    pub rate_limit_requests_per_second: Option<u32>,
    pub rate_limit_burst_size: Option<u32>,
}

impl EnvConfig {
    /// Read every supported variable.
    ///
    /// # Errors
    /// Returns an error naming the variable when a numeric or boolean value
    /// does not parse.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            host: env_string("HOST"),
            port: env_parse("PORT")?,
            tls_enabled: env_bool("TLS_ENABLED")?,
            tls_cert_path: env_string("TLS_CERT_PATH"),
            tls_key_path: env_string("TLS_KEY_PATH"),
            openai_api_key: env_string("OPENAI_API_KEY"),
            realtime_base_url: env_string("OPENAI_REALTIME_BASE_URL"),
            realtime_model: env_string("OPENAI_REALTIME_MODEL"),
            realtime_voice: env_string("OPENAI_REALTIME_VOICE"),
            realtime_tool_choice: env_string("OPENAI_REALTIME_TOOL_CHOICE"),
            upstream_timeout_seconds: env_parse("UPSTREAM_TIMEOUT_SECONDS")?,
            default_interview_type: env_string("DEFAULT_INTERVIEW_TYPE"),
            default_position: env_string("DEFAULT_POSITION"),
            malformed_body_policy: env_string("MALFORMED_BODY_POLICY"),
            feedback_storage_path: env_string("FEEDBACK_STORAGE_PATH"),
            cors_allowed_origins: env_string("CORS_ALLOWED_ORIGINS"),
            rate_limit_requests_per_second: env_parse("RATE_LIMIT_REQUESTS_PER_SECOND")?,
            rate_limit_burst_size: env_parse("RATE_LIMIT_BURST_SIZE")?,
        })
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(name: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(name) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {name}: '{raw}' ({e})").into()),
        None => Ok(None),
    }
}

fn env_bool(name: &str) -> Result<Option<bool>, Box<dyn std::error::Error>> {
    match env_string(name) {
        Some(raw) => parse_bool(&raw)
            .map(Some)
            .ok_or_else(|| format!("Invalid value for {name}: '{raw}' (expected true or false)").into()),
        None => Ok(None),
    }
}

/// Accepts `true/false`, `1/0` and `yes/no`, case-insensitively.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
