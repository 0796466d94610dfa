use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::session::{SessionClient, SessionError};

/// Shared application state.
///
/// Everything here is read-only after startup, so handlers share it
/// through an `Arc` without locking.
#[derive(Debug)]
pub struct AppState {
    pub config: ServerConfig,
    pub session_client: SessionClient,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Arc<Self>, SessionError> {
        let session_client = SessionClient::new(config.realtime.clone())?;

        Ok(Arc::new(Self {
            config,
            session_client,
        }))
    }
}
