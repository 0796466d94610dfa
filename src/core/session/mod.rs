//! Realtime session credential relay.
//!
//! Exchanges the server-held provider key for an ephemeral client credential.
//!
//! # Flow
//!
//! 1. The HTTP handler builds request-scoped [`SessionSettings`]
//! 2. [`SessionClient::create_session`] sends one [`SessionCreateRequest`] upstream
//! 3. The reply is normalized into [`SessionCredentials`]

pub mod client;
pub mod config;
pub mod instructions;
pub mod messages;

pub use client::{SessionClient, SessionError, SessionResult};
pub use config::{
    InterviewType, RealtimeConfig, RealtimeModel, RealtimeVoice, SessionConfig, SessionSettings,
};
pub use instructions::build_instructions;
pub use messages::{EphemeralCredential, SessionCreateRequest, SessionCredentials};
