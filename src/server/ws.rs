//! WebSocket endpoints for the live-agent channel
//!
//! The transport layer stops here: once a socket is upgraded it is handed
//! to a session endpoint in [`crate::support`] and this module is out of
//! the picture.

use crate::server::AppState;
use crate::support::{run_agent_session, run_customer_session};
use axum::{
    extract::{Path, State, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;

/// WebSocket routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/agent/ws/agent", get(agent_ws))
        .route("/api/agent/ws/customer/:customer_id", get(customer_ws))
}

/// Upgrade an agent connection
async fn agent_ws(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> impl IntoResponse {
    let router = state.router.clone();
    let config = state.config.support.clone();
    ws.on_upgrade(move |socket| run_agent_session(socket, router, config))
}

/// Upgrade a customer connection; the identity is caller-chosen and
/// embedded in the path
async fn customer_ws(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let router = state.router.clone();
    let config = state.config.support.clone();
    ws.on_upgrade(move |socket| run_customer_session(socket, customer_id, router, config))
}
