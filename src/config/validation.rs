//! Configuration validation logic.

use crate::core::session::RealtimeConfig;
use crate::utils::validate_upstream_url;

/// Validate the realtime endpoint settings
///
/// The base URL must be HTTPS (HTTP only on loopback) and the timeout must
/// be at least one second.
pub fn validate_realtime(realtime: &RealtimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_upstream_url(&realtime.base_url)
        .map_err(|e| format!("Invalid OPENAI_REALTIME_BASE_URL '{}': {e}", realtime.base_url))?;

    if realtime.timeout_seconds == 0 {
        return Err("UPSTREAM_TIMEOUT_SECONDS must be greater than zero".into());
    }

    if realtime.tool_choice.trim().is_empty() {
        return Err("OPENAI_REALTIME_TOOL_CHOICE must not be empty".into());
    }

    Ok(())
}

pub fn validate_port(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    if port == 0 {
        return Err("PORT must be non-zero".into());
    }
    Ok(())
}

pub fn validate_rate_limits(
    requests_per_second: u32,
    burst_size: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    if requests_per_second == 0 {
        return Err("RATE_LIMIT_REQUESTS_PER_SECOND must be greater than zero".into());
    }
    if burst_size == 0 {
        return Err("RATE_LIMIT_BURST_SIZE must be greater than zero".into());
    }
    Ok(())
}
