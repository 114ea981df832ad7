//! Wire protocol for the live-agent support channel
//!
//! Every frame is a JSON object with a `type` discriminator. Inbound
//! vocabularies carry a catch-all `Unknown` variant so that unrecognized
//! message types are a forward-compatible no-op rather than an error.

use serde::{Deserialize, Serialize};

/// Messages an agent may send to the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentRequest {
    /// Request the current queue snapshot
    GetQueue,

    /// Send a direct message to a specific customer
    MessageToCustomer {
        /// Target customer identity
        customer_id: String,
        /// Message body
        content: String,
    },

    /// Any unrecognized message type; ignored
    #[serde(other)]
    Unknown,
}

/// Messages a customer may send to the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CustomerRequest {
    /// A chat message, broadcast to every connected agent
    Message {
        /// Message body
        content: String,
    },

    /// Any unrecognized message type; ignored
    #[serde(other)]
    Unknown,
}

/// Events delivered to connected agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Welcome payload sent immediately after accept
    Connected {
        /// Identity assigned to this agent
        agent_id: String,
        /// Number of customers currently waiting
        queue_size: usize,
    },

    /// A customer joined the queue
    NewCustomer {
        /// The customer that connected
        customer_id: String,
        /// Queue size including the new customer
        queue_size: usize,
    },

    /// A customer disconnected and left the queue
    CustomerDisconnected {
        /// The customer that disconnected
        customer_id: String,
        /// Queue size after removal
        queue_size: usize,
    },

    /// Reply to a `get_queue` request
    QueueUpdate {
        /// Waiting customers, front = longest-waiting
        queue: Vec<String>,
        /// Number of waiting customers
        queue_size: usize,
    },

    /// A customer message fanned out to the agent pool
    CustomerMessage {
        /// Originating customer identity
        from: String,
        /// Message body
        content: String,
    },
}

/// Events delivered to connected customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CustomerEvent {
    /// Welcome payload sent immediately after accept
    Connected {
        /// The customer's own identity
        customer_id: String,
        /// Static greeting text
        message: String,
    },

    /// A direct message from an agent
    AgentMessage {
        /// Originating agent identity
        from: String,
        /// Message body
        content: String,
    },
}
