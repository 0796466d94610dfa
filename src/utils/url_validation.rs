//! Upstream URL validation
//!
//! The realtime provider base URL carries the server secret in every
//! request, so it must use HTTPS. Plain HTTP is accepted only for loopback
//! hosts, which is how local stubs are wired in.

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Errors that can occur during URL validation
#[derive(Debug, Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),

    #[error("URL scheme must be HTTPS, got: {0}")]
    HttpsRequired(String),

    #[error("URL must have a host")]
    MissingHost,

    #[error("URL must not carry credentials")]
    CredentialsNotAllowed,
}

/// Returns true when the URL host is `localhost` or a loopback address.
pub fn is_loopback_host(parsed: &Url) -> bool {
    match parsed.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

/// Validates the base URL of the realtime provider
///
/// # Returns
/// * `Ok(())` if the URL is usable as an upstream base
/// * `Err(UrlValidationError)` otherwise
///
/// # Example
/// ```rust,ignore
/// use interview_relay::utils::url_validation::validate_upstream_url;
///
/// assert!(validate_upstream_url("https://api.openai.com/v1").is_ok());
/// assert!(validate_upstream_url("http://127.0.0.1:9000/v1").is_ok());
/// assert!(validate_upstream_url("http://api.openai.com/v1").is_err());
/// ```
pub fn validate_upstream_url(url: &str) -> Result<(), UrlValidationError> {
    let parsed = Url::parse(url)?;

    if parsed.host().is_none() {
        return Err(UrlValidationError::MissingHost);
    }

    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(UrlValidationError::CredentialsNotAllowed);
    }

    match parsed.scheme() {
        "https" => Ok(()),
        "http" if is_loopback_host(&parsed) => {
            warn!(url = %parsed, "Using plain HTTP upstream on a loopback host");
            Ok(())
        }
        other => Err(UrlValidationError::HttpsRequired(other.to_string())),
    }
}
