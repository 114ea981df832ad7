//! Tripscape - Travel booking support backend
//!
//! Backend for the Tripscape travel site: an AI-assisted chat pipeline for
//! trip planning plus a live-agent subsystem that pairs waiting customers
//! with support agents over persistent WebSocket channels.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Tripscape Backend                        │
//! │  ┌────────────────────────┐  ┌─────────────────────────────┐ │
//! │  │       HTTP API         │  │     WebSocket Endpoints      │ │
//! │  │  /api/chat  /api/...   │  │   /ws/agent  /ws/customer    │ │
//! │  └───────────┬────────────┘  └──────────────┬──────────────┘ │
//! │              │                              │                │
//! │  ┌───────────▼────────────┐  ┌──────────────▼──────────────┐ │
//! │  │      Chat Pipeline     │  │        Support Router        │ │
//! │  │  - Context retrieval   │  │  - Connection registry       │ │
//! │  │  - Package matching    │  │  - FIFO customer queue       │ │
//! │  │  - Reply generation    │  │  - Broadcast + direct relay  │ │
//! │  └────────────────────────┘  └─────────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`support`]: live-agent connection tracking, queueing, and routing
//! - [`chat`]: collaborator traits and orchestration for the chat pipeline
//! - [`server`]: axum application wiring and middleware
//! - [`config`]: configuration management
//! - [`error`]: crate-wide error type

pub mod chat;
pub mod config;
pub mod error;
pub mod server;
pub mod support;

pub use config::TripscapeConfig;
pub use error::{Error, Result};
