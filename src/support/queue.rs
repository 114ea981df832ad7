//! Customer waiting queue
//!
//! FIFO by connect time. Entries are added when a customer registers and
//! removed only when that customer disconnects; claiming a customer for
//! service is a protocol-level concern layered above this queue.

use crate::error::{Error, Result};
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Ordered waiting list of customer identities
#[derive(Debug, Default)]
pub struct CustomerQueue {
    waiting: RwLock<VecDeque<String>>,
}

impl CustomerQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a customer to the end of the queue.
    ///
    /// Fails with [`Error::DuplicateIdentity`] if the customer is already
    /// queued; the queue is left unchanged in that case.
    pub async fn enqueue(&self, id: &str) -> Result<()> {
        let mut waiting = self.waiting.write().await;
        if waiting.iter().any(|queued| queued == id) {
            return Err(Error::DuplicateIdentity(id.to_string()));
        }
        waiting.push_back(id.to_string());
        Ok(())
    }

    /// Remove a customer by identity regardless of position.
    ///
    /// Idempotent; returns whether an entry was removed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut waiting = self.waiting.write().await;
        let before = waiting.len();
        waiting.retain(|queued| queued != id);
        waiting.len() != before
    }

    /// Point-in-time ordered copy, front = longest-waiting
    pub async fn snapshot(&self) -> Vec<String> {
        self.waiting.read().await.iter().cloned().collect()
    }

    /// Number of waiting customers
    pub async fn len(&self) -> usize {
        self.waiting.read().await.len()
    }

    /// Whether the queue is empty
    pub async fn is_empty(&self) -> bool {
        self.waiting.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = CustomerQueue::new();
        for id in ["c1", "c2", "c3"] {
            assert_ok!(queue.enqueue(id).await);
        }

        assert_eq!(
            queue.snapshot().await,
            vec!["c1".to_string(), "c2".to_string(), "c3".to_string()]
        );
        assert_eq!(queue.len().await, 3);
    }

    #[tokio::test]
    async fn test_duplicate_enqueue_rejected() {
        let queue = CustomerQueue::new();
        assert_ok!(queue.enqueue("c1").await);

        let result = queue.enqueue("c1").await;
        assert!(matches!(result, Err(Error::DuplicateIdentity(id)) if id == "c1"));
        assert_eq!(queue.snapshot().await, vec!["c1".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_from_middle_preserves_order() {
        let queue = CustomerQueue::new();
        for id in ["c1", "c2", "c3"] {
            assert_ok!(queue.enqueue(id).await);
        }

        assert!(queue.remove("c2").await);
        assert_eq!(
            queue.snapshot().await,
            vec!["c1".to_string(), "c3".to_string()]
        );
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let queue = CustomerQueue::new();
        assert_ok!(queue.enqueue("c1").await);

        assert!(queue.remove("c1").await);
        assert!(!queue.remove("c1").await);
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn test_reenqueue_after_remove_goes_to_back() {
        let queue = CustomerQueue::new();
        assert_ok!(queue.enqueue("c1").await);
        assert_ok!(queue.enqueue("c2").await);

        queue.remove("c1").await;
        assert_ok!(queue.enqueue("c1").await);
        assert_eq!(
            queue.snapshot().await,
            vec!["c2".to_string(), "c1".to_string()]
        );
    }
}
