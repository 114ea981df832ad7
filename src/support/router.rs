//! Message routing between agents and customers
//!
//! The router is the only component that mutates the connection registry
//! and the customer queue together, which keeps the two consistent. All
//! sends happen on channel clones taken from a snapshot, never while a
//! structural lock is held.

use crate::error::Result;
use crate::support::channel::PeerChannel;
use crate::support::protocol::{AgentEvent, AgentRequest, CustomerEvent, CustomerRequest};
use crate::support::queue::CustomerQueue;
use crate::support::registry::ConnectionRegistry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Routes messages and coordinates connect/disconnect lifecycle
#[derive(Debug)]
pub struct SupportRouter {
    registry: Arc<ConnectionRegistry>,
    queue: Arc<CustomerQueue>,
    /// Monotonic agent-id counter, never reset by disconnects so that a
    /// fresh id can never collide with a live one under churn.
    next_agent_id: AtomicU64,
}

impl SupportRouter {
    /// Create a router with a fresh registry and queue
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
            queue: Arc::new(CustomerQueue::new()),
            next_agent_id: AtomicU64::new(0),
        }
    }

    /// Get the connection registry
    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Get the customer queue
    pub fn queue(&self) -> &Arc<CustomerQueue> {
        &self.queue
    }

    /// Register a new agent and assign it a fresh identity.
    ///
    /// Agents are not announced to customers.
    pub async fn connect_agent(&self, channel: PeerChannel<AgentEvent>) -> Result<String> {
        let n = self.next_agent_id.fetch_add(1, Ordering::Relaxed) + 1;
        let agent_id = format!("agent_{}", n);
        self.registry.register_agent(&agent_id, channel).await?;

        let total_agents = self.registry.agent_count().await;
        tracing::info!(agent_id, total_agents, "agent connected");
        Ok(agent_id)
    }

    /// Register a customer, enqueue it, and notify all agents.
    ///
    /// Fails with `DuplicateIdentity` while a session for the same id is
    /// still live; no partial state is left behind on failure.
    pub async fn connect_customer(
        &self,
        customer_id: &str,
        channel: PeerChannel<CustomerEvent>,
    ) -> Result<()> {
        self.registry.register_customer(customer_id, channel).await?;
        if let Err(e) = self.queue.enqueue(customer_id).await {
            self.registry.unregister_customer(customer_id).await;
            return Err(e);
        }

        let queue_size = self.queue.len().await;
        tracing::info!(customer_id, queue_size, "customer connected");

        self.broadcast_to_agents(AgentEvent::NewCustomer {
            customer_id: customer_id.to_string(),
            queue_size,
        })
        .await;
        Ok(())
    }

    /// Unregister an agent. Idempotent; no broadcast.
    pub async fn disconnect_agent(&self, agent_id: &str) {
        if self.registry.unregister_agent(agent_id).await {
            let total_agents = self.registry.agent_count().await;
            tracing::info!(agent_id, total_agents, "agent disconnected");
        }
    }

    /// Unregister and dequeue a customer, then notify all agents.
    ///
    /// Runs on every close trigger, including read/send failure, so the
    /// registry never drifts from the true connection set. Idempotent: a
    /// repeat call changes nothing and sends no second notice.
    pub async fn disconnect_customer(&self, customer_id: &str) {
        let removed = self.registry.unregister_customer(customer_id).await;
        self.queue.remove(customer_id).await;
        if !removed {
            return;
        }

        let queue_size = self.queue.len().await;
        tracing::info!(customer_id, queue_size, "customer disconnected");

        self.broadcast_to_agents(AgentEvent::CustomerDisconnected {
            customer_id: customer_id.to_string(),
            queue_size,
        })
        .await;
    }

    /// Deliver an event to one agent.
    ///
    /// An absent target is a silent drop; a failed send is logged and the
    /// event dropped. Never escalates.
    pub async fn send_to_agent(&self, agent_id: &str, event: AgentEvent) {
        let Some(channel) = self.registry.lookup_agent(agent_id).await else {
            tracing::debug!(agent_id, "dropping event for unknown agent");
            return;
        };
        if let Err(e) = channel.send(event) {
            tracing::warn!(agent_id, error = %e, "failed to send to agent");
        }
    }

    /// Deliver an event to one customer. Same drop semantics as
    /// [`send_to_agent`](Self::send_to_agent).
    pub async fn send_to_customer(&self, customer_id: &str, event: CustomerEvent) {
        let Some(channel) = self.registry.lookup_customer(customer_id).await else {
            tracing::debug!(customer_id, "dropping event for unknown customer");
            return;
        };
        if let Err(e) = channel.send(event) {
            tracing::warn!(customer_id, error = %e, "failed to send to customer");
        }
    }

    /// Best-effort fan-out to every connected agent.
    ///
    /// Sends are attempted independently on a snapshot of the agent set; a
    /// failure for one agent is logged and must not abort delivery to the
    /// rest. No registry lock is held while sending.
    pub async fn broadcast_to_agents(&self, event: AgentEvent) {
        let agents = self.registry.agent_channels().await;
        for (agent_id, channel) in agents {
            if let Err(e) = channel.send(event.clone()) {
                tracing::warn!(agent_id, error = %e, "broadcast to agent failed");
            }
        }
    }

    /// Dispatch one inbound agent message
    pub async fn handle_agent_message(&self, agent_id: &str, request: AgentRequest) {
        match request {
            AgentRequest::GetQueue => {
                let queue = self.queue.snapshot().await;
                let queue_size = queue.len();
                self.send_to_agent(agent_id, AgentEvent::QueueUpdate { queue, queue_size })
                    .await;
            }
            AgentRequest::MessageToCustomer {
                customer_id,
                content,
            } => {
                self.send_to_customer(
                    &customer_id,
                    CustomerEvent::AgentMessage {
                        from: agent_id.to_string(),
                        content,
                    },
                )
                .await;
            }
            AgentRequest::Unknown => {
                tracing::debug!(agent_id, "ignoring unrecognized agent message");
            }
        }
    }

    /// Dispatch one inbound customer message
    pub async fn handle_customer_message(&self, customer_id: &str, request: CustomerRequest) {
        match request {
            CustomerRequest::Message { content } => {
                self.broadcast_to_agents(AgentEvent::CustomerMessage {
                    from: customer_id.to_string(),
                    content,
                })
                .await;
            }
            CustomerRequest::Unknown => {
                tracing::debug!(customer_id, "ignoring unrecognized customer message");
            }
        }
    }
}

impl Default for SupportRouter {
    fn default() -> Self {
        Self::new()
    }
}
