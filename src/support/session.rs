//! Session endpoints
//!
//! One task per connected WebSocket drives a small state machine:
//! `Connecting -> Open -> Closed`. On entry to `Open` the peer is
//! registered with the router and welcomed; the task then reads frames in
//! arrival order until the peer closes, the read fails, or a frame cannot
//! be parsed. Leaving `Open` invokes the router's disconnect exactly once.

use crate::config::SupportConfig;
use crate::support::channel::PeerChannel;
use crate::support::protocol::{AgentEvent, AgentRequest, CustomerEvent, CustomerRequest};
use crate::support::router::SupportRouter;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Endpoint lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Channel handshake in progress
    Connecting,
    /// Registered and serving the receive loop
    Open,
    /// Disconnected; no further operations are valid
    Closed,
}

/// Why the receive loop ended
#[derive(Debug)]
enum CloseTrigger {
    PeerClosed,
    ReceiveFailed,
    MalformedFrame,
}

/// One step of the receive loop
enum Inbound {
    Frame(String),
    Closed(CloseTrigger),
}

/// Forward events from the peer's mpsc receiver onto the socket sink.
///
/// Ends when the socket rejects a send or every channel clone is dropped;
/// from then on router sends to this peer fail and are dropped there.
fn spawn_writer<T>(
    mut ws_tx: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<T>,
) -> JoinHandle<()>
where
    T: Serialize + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize outbound event");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    })
}

/// Read frames until a text frame or a close trigger arrives. Ping/pong
/// frames are skipped transparently.
async fn next_inbound(ws_rx: &mut SplitStream<WebSocket>, peer: &str) -> Inbound {
    loop {
        let frame = match ws_rx.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(e)) => {
                tracing::warn!(peer, error = %e, "receive failed");
                return Inbound::Closed(CloseTrigger::ReceiveFailed);
            }
            None => return Inbound::Closed(CloseTrigger::PeerClosed),
        };
        match frame {
            Message::Text(text) => return Inbound::Frame(text),
            Message::Close(_) => return Inbound::Closed(CloseTrigger::PeerClosed),
            Message::Binary(_) => {
                tracing::warn!(peer, "unexpected binary frame");
                return Inbound::Closed(CloseTrigger::MalformedFrame);
            }
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
}

/// Run an agent session from accept to disconnect
pub async fn run_agent_session(
    socket: WebSocket,
    router: Arc<SupportRouter>,
    config: SupportConfig,
) {
    let mut state = SessionState::Connecting;
    tracing::debug!(state = ?state, "agent channel accepted");
    let (ws_tx, mut ws_rx) = socket.split();
    let (channel, rx) = PeerChannel::bounded(config.channel_buffer);

    let agent_id = match router.connect_agent(channel).await {
        Ok(id) => id,
        Err(e) => {
            // Unreachable with monotonic id assignment, but guarded
            tracing::error!(error = %e, "refusing agent connection");
            return;
        }
    };
    let writer = spawn_writer(ws_tx, rx);
    state = SessionState::Open;

    let queue_size = router.queue().len().await;
    router
        .send_to_agent(
            &agent_id,
            AgentEvent::Connected {
                agent_id: agent_id.clone(),
                queue_size,
            },
        )
        .await;

    while state == SessionState::Open {
        match next_inbound(&mut ws_rx, &agent_id).await {
            Inbound::Frame(text) => match serde_json::from_str::<AgentRequest>(&text) {
                Ok(request) => router.handle_agent_message(&agent_id, request).await,
                Err(e) => {
                    tracing::warn!(agent_id, error = %e, "malformed agent frame, closing");
                    state = SessionState::Closed;
                }
            },
            Inbound::Closed(trigger) => {
                tracing::info!(agent_id, trigger = ?trigger, "agent session closing");
                state = SessionState::Closed;
            }
        }
    }

    router.disconnect_agent(&agent_id).await;
    writer.abort();
}

/// Run a customer session from accept to disconnect.
///
/// A duplicate identity refuses the channel outright: the socket is closed
/// without registering and without a disconnect call.
pub async fn run_customer_session(
    socket: WebSocket,
    customer_id: String,
    router: Arc<SupportRouter>,
    config: SupportConfig,
) {
    let mut state = SessionState::Connecting;
    tracing::debug!(customer_id, state = ?state, "customer channel accepted");
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (channel, rx) = PeerChannel::bounded(config.channel_buffer);

    if let Err(e) = router.connect_customer(&customer_id, channel).await {
        tracing::warn!(customer_id, error = %e, "refusing customer connection");
        let _ = ws_tx.close().await;
        return;
    }
    let writer = spawn_writer(ws_tx, rx);
    state = SessionState::Open;

    router
        .send_to_customer(
            &customer_id,
            CustomerEvent::Connected {
                customer_id: customer_id.clone(),
                message: config.greeting.clone(),
            },
        )
        .await;

    while state == SessionState::Open {
        match next_inbound(&mut ws_rx, &customer_id).await {
            Inbound::Frame(text) => match serde_json::from_str::<CustomerRequest>(&text) {
                Ok(request) => router.handle_customer_message(&customer_id, request).await,
                Err(e) => {
                    tracing::warn!(customer_id, error = %e, "malformed customer frame, closing");
                    state = SessionState::Closed;
                }
            },
            Inbound::Closed(trigger) => {
                tracing::info!(customer_id, trigger = ?trigger, "customer session closing");
                state = SessionState::Closed;
            }
        }
    }

    router.disconnect_customer(&customer_id).await;
    writer.abort();
}

#[cfg(test)]
mod tests {
    // Session endpoints need real WebSocket connections; the receive loop,
    // welcome payloads, and disconnect semantics are covered end to end in
    // tests/live_support.rs.

    use super::SessionState;

    #[test]
    fn test_session_states_are_distinct() {
        assert_ne!(SessionState::Connecting, SessionState::Open);
        assert_ne!(SessionState::Open, SessionState::Closed);
    }
}
