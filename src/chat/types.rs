//! Chat wire types
//!
//! Field names follow the public API contract used by the web frontend
//! (camelCase keys where the frontend expects them).

use serde::{Deserialize, Serialize};

/// One turn of conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// "user" or "assistant"
    pub role: String,
    /// Message text
    pub content: String,
}

/// Inbound chat request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// The user's latest message
    pub message: String,

    /// Prior turns, oldest first
    #[serde(rename = "conversationHistory", default)]
    pub conversation_history: Vec<ConversationMessage>,
}

/// A travel package offered in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelPackage {
    /// Catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Destination summary
    pub destination: String,
    /// Price in whole currency units
    pub price: u32,
    /// Human-readable date range
    pub dates: String,
    /// Package kind ("tour" or "hotel")
    #[serde(rename = "type")]
    pub kind: String,
    /// Marketing description
    pub description: String,
}

/// Booking-form fields extracted from a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    /// Destination, if mentioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,

    /// Travel date or month, if mentioned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Party size; defaults to one traveler
    pub travelers: u32,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            dest: None,
            date: None,
            travelers: 1,
        }
    }
}

/// Structured chat reply
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    /// Assistant reply text
    pub message: String,

    /// Matched packages, omitted when none matched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<TravelPackage>>,

    /// Extracted booking-form fields, omitted when nothing was extracted
    #[serde(rename = "formData", skip_serializing_if = "Option::is_none")]
    pub form_data: Option<FormFields>,
}

impl ChatReply {
    /// Friendly degraded reply used when the pipeline cannot answer
    pub fn apology() -> Self {
        Self {
            message: "I apologize, but I'm experiencing technical difficulties. Please try \
                      again or contact our support team for assistance."
                .to_string(),
            packages: None,
            form_data: None,
        }
    }
}
