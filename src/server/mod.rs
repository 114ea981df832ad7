//! HTTP and WebSocket server wiring
//!
//! Assembles the axum application: HTTP API, live-agent WebSocket
//! endpoints, and the CORS/compression/trace middleware stack.

mod handler;
mod ws;

use crate::chat::ChatService;
use crate::config::{ServerConfig, TripscapeConfig};
use crate::error::Result;
use crate::support::SupportRouter;
use axum::http::HeaderValue;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// Constructed once per process and handed by reference to every session
/// task and HTTP handler; tests build fresh instances for isolation.
pub struct AppState {
    /// Loaded configuration
    pub config: TripscapeConfig,
    /// Live-agent routing core
    pub router: Arc<SupportRouter>,
    /// Chat pipeline; `None` until collaborators are wired in
    pub chat: Option<Arc<ChatService>>,
}

impl AppState {
    /// Create state with a fresh routing core and no chat pipeline
    pub fn new(config: TripscapeConfig) -> Self {
        Self {
            config,
            router: Arc::new(SupportRouter::new()),
            chat: None,
        }
    }

    /// Attach a chat pipeline
    pub fn with_chat(mut self, chat: Arc<ChatService>) -> Self {
        self.chat = Some(chat);
        self
    }
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the axum application
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.server);
    Router::new()
        .merge(handler::routes())
        .merge(ws::routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Bind and serve until interrupted
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.server.host, state.config.server.port
    );
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Tripscape backend listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TripscapeConfig;

    #[test]
    fn test_app_state_defaults() {
        let state = AppState::new(TripscapeConfig::default());
        assert!(state.chat.is_none());
        assert_eq!(state.config.server.port, 8000);
    }

    #[tokio::test]
    async fn test_build_app() {
        let state = Arc::new(AppState::new(TripscapeConfig::default()));
        // Building the full middleware stack must not panic
        let _app = build_app(state);
    }
}
