//! Chat pipeline orchestration
//!
//! The pipeline itself is fixed (retrieve context, match packages, generate
//! a reply, extract form fields) while every step lives behind a trait so
//! that the hosted model, the knowledge store, and the catalog matcher are
//! injectable collaborators.

use crate::chat::types::{ChatReply, ChatRequest, ConversationMessage, FormFields, TravelPackage};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces the assistant reply text from a composed prompt context
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generate a reply for the user's latest message
    async fn generate_reply(
        &self,
        message: &str,
        history: &[ConversationMessage],
        context: &str,
        packages: &[TravelPackage],
    ) -> Result<String>;
}

/// Retrieves contextual documents from a knowledge store
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Fetch context text relevant to the query; empty string when nothing
    /// relevant exists
    async fn retrieve_context(&self, query: &str) -> Result<String>;
}

/// Matches catalog packages and extracts booking-form fields from free text
pub trait PackageMatcher: Send + Sync {
    /// Packages relevant to the message, best matches first
    fn match_packages(&self, message: &str) -> Vec<TravelPackage>;

    /// Booking-form fields mentioned in the message, if any
    fn extract_form_fields(&self, message: &str) -> Option<FormFields>;
}

/// Orchestrates one chat turn across the collaborators
pub struct ChatService {
    generator: Arc<dyn ReplyGenerator>,
    retriever: Option<Arc<dyn ContextRetriever>>,
    matcher: Arc<dyn PackageMatcher>,
}

impl ChatService {
    /// Create a service with a generator and matcher; context retrieval is
    /// optional
    pub fn new(generator: Arc<dyn ReplyGenerator>, matcher: Arc<dyn PackageMatcher>) -> Self {
        Self {
            generator,
            retriever: None,
            matcher,
        }
    }

    /// Attach a knowledge-store retriever
    pub fn with_retriever(mut self, retriever: Arc<dyn ContextRetriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    /// Process one chat message into a structured reply
    pub async fn process(&self, request: &ChatRequest) -> Result<ChatReply> {
        let context = match &self.retriever {
            Some(retriever) => match retriever.retrieve_context(&request.message).await {
                Ok(context) => context,
                Err(e) => {
                    // Retrieval failure degrades to an uncontextualized reply
                    tracing::warn!(error = %e, "context retrieval failed");
                    String::new()
                }
            },
            None => String::new(),
        };

        let packages = self.matcher.match_packages(&request.message);
        let message = self
            .generator
            .generate_reply(
                &request.message,
                &request.conversation_history,
                &context,
                &packages,
            )
            .await?;
        let form_data = self.matcher.extract_form_fields(&request.message);

        Ok(ChatReply {
            message,
            packages: if packages.is_empty() {
                None
            } else {
                Some(packages)
            },
            form_data,
        })
    }
}
