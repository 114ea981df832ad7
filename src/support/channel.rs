//! Peer channel handles
//!
//! The routing core never touches a socket directly. Each connected peer is
//! represented by a [`PeerChannel`] pointing at the peer's writer task; the
//! socket itself is owned by the session endpoint. Send failure means the
//! writer task is gone or hopelessly backed up, which the router treats as
//! the peer being unreachable.

use crate::error::{Error, Result};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Outbound handle to one connected peer.
///
/// Cheap to clone; all clones feed the same writer task. The type parameter
/// fixes the event vocabulary the peer can receive.
#[derive(Debug)]
pub struct PeerChannel<T> {
    tx: mpsc::Sender<T>,
}

impl<T> Clone for PeerChannel<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Send> PeerChannel<T> {
    /// Wrap an existing sender
    pub fn new(tx: mpsc::Sender<T>) -> Self {
        Self { tx }
    }

    /// Create a channel pair with a bounded buffer
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Hand one event to the peer's writer task.
    ///
    /// Never blocks: a full buffer means the peer has stopped draining its
    /// socket, and waiting on it would let one slow peer stall routing for
    /// everyone else. Fails with [`Error::ChannelSend`] when the buffer is
    /// full or the writer task has dropped its receiver.
    pub fn send(&self, event: T) -> Result<()> {
        self.tx.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => Error::ChannelSend("peer channel full".to_string()),
            TrySendError::Closed(_) => Error::ChannelSend("peer channel closed".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_send_delivers_event() {
        let (channel, mut rx) = PeerChannel::bounded(4);
        channel.send("hello").unwrap();
        assert_eq!(rx.recv().await, Some("hello"));
    }

    #[test]
    fn test_send_to_dropped_receiver_fails() {
        let (channel, rx) = PeerChannel::<&str>::bounded(4);
        drop(rx);
        let result = channel.send("hello");
        assert!(matches!(result, Err(Error::ChannelSend(_))));
    }

    #[test]
    fn test_send_to_full_buffer_fails_without_blocking() {
        let (channel, _rx) = PeerChannel::bounded(1);
        channel.send("first").unwrap();
        let result = channel.send("second");
        assert!(matches!(result, Err(Error::ChannelSend(_))));
    }

    #[tokio::test]
    async fn test_clones_feed_the_same_receiver() {
        let (channel, mut rx) = PeerChannel::bounded(4);
        let other = channel.clone();
        channel.send(1u32).unwrap();
        other.send(2u32).unwrap();
        assert_eq!(rx.recv().await, Some(1));
        assert_eq!(rx.recv().await, Some(2));
    }
}
