//! Tripscape configuration management

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main Tripscape configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripscapeConfig {
    /// Application name reported by the root endpoint
    pub app_name: String,

    /// Deployment environment ("development" or "production")
    pub environment: String,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Live-agent support configuration
    pub support: SupportConfig,
}

impl Default for TripscapeConfig {
    fn default() -> Self {
        Self {
            app_name: "Tripscape".to_string(),
            environment: "development".to_string(),
            server: ServerConfig::default(),
            support: SupportConfig::default(),
        }
    }
}

impl TripscapeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

/// Live-agent support configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportConfig {
    /// Greeting sent to customers on connect
    pub greeting: String,

    /// Per-peer outbound channel buffer size
    pub channel_buffer: usize,
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            greeting: "Connected to Tripscape support".to_string(),
            channel_buffer: 64,
        }
    }
}
