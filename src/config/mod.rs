//! Configuration module for the interview relay
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use interview_relay::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

mod env;
mod merge;
mod validation;
mod yaml;

use crate::core::session::{RealtimeConfig, SessionConfig, SessionError};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_FEEDBACK_STORAGE_PATH: &str = "./.interview-relay";
pub const DEFAULT_RATE_LIMIT_RPS: u32 = 60;
pub const DEFAULT_RATE_LIMIT_BURST_SIZE: u32 = 10;

/// TLS configuration for HTTPS
#[derive(Debug, Clone)]
pub struct TlsConfig {
    /// Path to the TLS certificate file (PEM format)
    pub cert_path: PathBuf,
    /// Path to the TLS private key file (PEM format)
    pub key_path: PathBuf,
}

/// What the relay does with a session request body it cannot parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedBodyPolicy {
    /// Treat the body as empty and use the configured defaults
    #[default]
    Fallback,
    /// Answer 400 without contacting the provider
    Reject,
}

impl MalformedBodyPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" => Some(Self::Fallback),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fallback => "fallback",
            Self::Reject => "reject",
        }
    }
}

/// Server configuration
///
/// Built once at startup and shared read-only through `AppState`.
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// TLS configuration (optional)
    pub tls: Option<TlsConfig>,

    /// Server-held provider secret; never sent to clients or logged
    pub openai_api_key: Option<String>,

    pub realtime: RealtimeConfig,
    /// Interview type and position used when a request omits them
    pub interview_defaults: SessionConfig,
    pub malformed_body_policy: MalformedBodyPolicy,

    /// Directory backing the local feedback store used by the CLI
    pub feedback_storage_path: PathBuf,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all).
    /// When unset, cross-origin requests are denied.
    pub cors_allowed_origins: Option<String>,
    pub rate_limit_requests_per_second: u32,
    pub rate_limit_burst_size: u32,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("tls", &self.tls)
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("realtime", &self.realtime)
            .field("interview_defaults", &self.interview_defaults)
            .field("malformed_body_policy", &self.malformed_body_policy)
            .field("feedback_storage_path", &self.feedback_storage_path)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field(
                "rate_limit_requests_per_second",
                &self.rate_limit_requests_per_second,
            )
            .field("rate_limit_burst_size", &self.rate_limit_burst_size)
            .finish()
    }
}

/// Zeroize the provider secret when the config is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.openai_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and defaults
    ///
    /// The `.env` file is loaded into the environment in `main.rs` before
    /// this runs, so actual environment variables win over `.env` values.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_port(self.port)?;
        validation::validate_realtime(&self.realtime)?;
        validation::validate_rate_limits(
            self.rate_limit_requests_per_second,
            self.rate_limit_burst_size,
        )?;
        Ok(())
    }

    /// Get the server address as a string in the format "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_tls_enabled(&self) -> bool {
        self.tls.is_some()
    }

    /// The provider secret, or [`SessionError::MissingApiKey`] when it is
    /// unset or blank.
    pub fn require_api_key(&self) -> Result<&str, SessionError> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(SessionError::MissingApiKey)
    }
}
