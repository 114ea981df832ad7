//! HTTP API handler

use crate::chat::{ChatReply, ChatRequest};
use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

/// HTTP routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/agent/stats", get(agent_stats))
        .route("/api/chat", post(chat))
        .route("/api/chat/health", get(chat_health))
}

/// Root welcome response
#[derive(Debug, Serialize)]
struct RootResponse {
    message: String,
    version: String,
    environment: String,
}

async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(RootResponse {
        message: format!("Welcome to {}", state.config.app_name),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
    })
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    message: String,
    environment: String,
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Server is running".to_string(),
        environment: state.config.environment.clone(),
    })
}

/// Live-agent statistics response
#[derive(Debug, Serialize)]
struct StatsResponse {
    active_agents: usize,
    active_customers: usize,
    queue_size: usize,
    agents: Vec<String>,
    customers: Vec<String>,
}

/// Diagnostic snapshot of the live-agent subsystem
async fn agent_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let registry = state.router.registry();
    Json(StatsResponse {
        active_agents: registry.agent_count().await,
        active_customers: registry.customer_count().await,
        queue_size: state.router.queue().len().await,
        agents: registry.agent_ids().await,
        customers: registry.customer_ids().await,
    })
}

/// Process a chat message through the collaborator pipeline
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    if request.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"detail": "Message cannot be empty"})),
        )
            .into_response();
    }

    let Some(service) = &state.chat else {
        tracing::warn!("chat pipeline not configured, returning degraded reply");
        return Json(ChatReply::apology()).into_response();
    };

    match service.process(&request).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "chat pipeline failed");
            Json(ChatReply::apology()).into_response()
        }
    }
}

/// Chat pipeline health response
#[derive(Debug, Serialize)]
struct ChatHealthResponse {
    status: String,
    service: String,
    enabled: bool,
}

/// Health check for the chat pipeline
async fn chat_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ChatHealthResponse {
        status: "OK".to_string(),
        service: "chatbot".to_string(),
        enabled: state.chat.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{
        ChatService, ConversationMessage, FormFields, PackageMatcher, ReplyGenerator,
        TravelPackage,
    };
    use crate::config::TripscapeConfig;
    use crate::error::Result;
    use async_trait::async_trait;

    fn make_state() -> Arc<AppState> {
        Arc::new(AppState::new(TripscapeConfig::default()))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    struct CannedGenerator;

    #[async_trait]
    impl ReplyGenerator for CannedGenerator {
        async fn generate_reply(
            &self,
            _message: &str,
            _history: &[ConversationMessage],
            _context: &str,
            _packages: &[TravelPackage],
        ) -> Result<String> {
            Ok("Bali is lovely in July!".to_string())
        }
    }

    struct NoopMatcher;

    impl PackageMatcher for NoopMatcher {
        fn match_packages(&self, _message: &str) -> Vec<TravelPackage> {
            vec![]
        }

        fn extract_form_fields(&self, _message: &str) -> Option<FormFields> {
            None
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check(State(make_state())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "OK");
        assert_eq!(json["environment"], "development");
    }

    #[tokio::test]
    async fn test_root_reports_app_name() {
        let response = root(State(make_state())).await.into_response();
        let json = body_json(response).await;
        assert_eq!(json["message"], "Welcome to Tripscape");
    }

    #[tokio::test]
    async fn test_stats_on_idle_server() {
        let response = agent_stats(State(make_state())).await.into_response();
        let json = body_json(response).await;
        assert_eq!(json["active_agents"], 0);
        assert_eq!(json["active_customers"], 0);
        assert_eq!(json["queue_size"], 0);
        assert_eq!(json["agents"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_stats_reflects_connections() {
        let state = make_state();
        state
            .router
            .connect_customer("c1", crate::support::PeerChannel::bounded(4).0)
            .await
            .unwrap();

        let response = agent_stats(State(state)).await.into_response();
        let json = body_json(response).await;
        assert_eq!(json["active_customers"], 1);
        assert_eq!(json["queue_size"], 1);
        assert_eq!(json["customers"], serde_json::json!(["c1"]));
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let request = ChatRequest {
            message: "   ".to_string(),
            conversation_history: vec![],
        };
        let response = chat(State(make_state()), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_without_pipeline_degrades() {
        let request = ChatRequest {
            message: "beach trip".to_string(),
            conversation_history: vec![],
        };
        let response = chat(State(make_state()), Json(request)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("technical difficulties"));
    }

    #[tokio::test]
    async fn test_chat_with_pipeline_replies() {
        let service = ChatService::new(Arc::new(CannedGenerator), Arc::new(NoopMatcher));
        let state = Arc::new(
            AppState::new(TripscapeConfig::default()).with_chat(Arc::new(service)),
        );

        let request = ChatRequest {
            message: "tell me about Bali".to_string(),
            conversation_history: vec![],
        };
        let response = chat(State(state), Json(request)).await.into_response();
        let json = body_json(response).await;
        assert_eq!(json["message"], "Bali is lovely in July!");
    }

    #[tokio::test]
    async fn test_chat_health_reports_enabled_state() {
        let response = chat_health(State(make_state())).await.into_response();
        let json = body_json(response).await;
        assert_eq!(json["service"], "chatbot");
        assert_eq!(json["enabled"], false);
    }
}
