//! HTTP request handlers
//!
//! - `api` - Health check endpoint
//! - `session` - Ephemeral realtime credential relay
//! - `tools` - Tool catalog listing

pub mod api;
pub mod session;
pub mod tools;

pub use session::create_session_token;
