//! Connection registry
//!
//! Authoritative mapping of live agent and customer identities to their
//! peer channels. An entry implies the channel was send-reachable at insert
//! time; external closure is only discovered on a failed send or an
//! explicit disconnect.

use crate::error::{Error, Result};
use crate::support::channel::PeerChannel;
use crate::support::protocol::{AgentEvent, CustomerEvent};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Registry of currently-connected agents and customers
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    agents: RwLock<HashMap<String, PeerChannel<AgentEvent>>>,
    customers: RwLock<HashMap<String, PeerChannel<CustomerEvent>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent channel.
    ///
    /// Fails with [`Error::DuplicateIdentity`] if the id is already live;
    /// the registry is left unchanged in that case.
    pub async fn register_agent(&self, id: &str, channel: PeerChannel<AgentEvent>) -> Result<()> {
        let mut agents = self.agents.write().await;
        match agents.entry(id.to_string()) {
            Entry::Occupied(_) => Err(Error::DuplicateIdentity(id.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(channel);
                Ok(())
            }
        }
    }

    /// Register a customer channel.
    ///
    /// Repeat connects with the same externally-chosen id while a prior
    /// session is still live are rejected, not overwritten.
    pub async fn register_customer(
        &self,
        id: &str,
        channel: PeerChannel<CustomerEvent>,
    ) -> Result<()> {
        let mut customers = self.customers.write().await;
        match customers.entry(id.to_string()) {
            Entry::Occupied(_) => Err(Error::DuplicateIdentity(id.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(channel);
                Ok(())
            }
        }
    }

    /// Remove an agent entry. Returns whether an entry was present.
    pub async fn unregister_agent(&self, id: &str) -> bool {
        self.agents.write().await.remove(id).is_some()
    }

    /// Remove a customer entry. Returns whether an entry was present.
    pub async fn unregister_customer(&self, id: &str) -> bool {
        self.customers.write().await.remove(id).is_some()
    }

    /// Look up an agent's channel
    pub async fn lookup_agent(&self, id: &str) -> Option<PeerChannel<AgentEvent>> {
        self.agents.read().await.get(id).cloned()
    }

    /// Look up a customer's channel
    pub async fn lookup_customer(&self, id: &str) -> Option<PeerChannel<CustomerEvent>> {
        self.customers.read().await.get(id).cloned()
    }

    /// Number of connected agents
    pub async fn agent_count(&self) -> usize {
        self.agents.read().await.len()
    }

    /// Number of connected customers
    pub async fn customer_count(&self) -> usize {
        self.customers.read().await.len()
    }

    /// Snapshot of connected agent identities
    pub async fn agent_ids(&self) -> Vec<String> {
        self.agents.read().await.keys().cloned().collect()
    }

    /// Snapshot of connected customer identities
    pub async fn customer_ids(&self) -> Vec<String> {
        self.customers.read().await.keys().cloned().collect()
    }

    /// Snapshot of connected agents with their channels.
    ///
    /// Taken under the read lock and returned by value so that callers can
    /// send without holding any lock.
    pub async fn agent_channels(&self) -> Vec<(String, PeerChannel<AgentEvent>)> {
        self.agents
            .read()
            .await
            .iter()
            .map(|(id, channel)| (id.clone(), channel.clone()))
            .collect()
    }
}
