//! Tripscape error types

use thiserror::Error;

/// Tripscape error type
#[derive(Error, Debug)]
pub enum Error {
    /// An agent or customer identity is already connected
    #[error("identity '{0}' is already connected")]
    DuplicateIdentity(String),

    /// Sending to a peer channel failed (peer gone or unreachable)
    #[error("channel send failed: {0}")]
    ChannelSend(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat pipeline error
    #[error("Chat error: {0}")]
    Chat(String),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Tripscape operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identity_display() {
        let err = Error::DuplicateIdentity("customer-1".to_string());
        assert_eq!(err.to_string(), "identity 'customer-1' is already connected");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let bad = serde_json::from_str::<serde_json::Value>("not json");
        let err: Error = bad.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
