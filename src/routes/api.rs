use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, session, tools};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router
///
/// `POST /` and `/api/session` are kept as aliases of `/session-token` for
/// older clients; `GET /` stays the health check.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(api::health_check).post(session::create_session_token),
        )
        .route("/tools", get(tools::list_tools))
        .route("/session-token", post(session::create_session_token))
        .route("/api/session", post(session::create_session_token))
        .layer(TraceLayer::new_for_http())
}
