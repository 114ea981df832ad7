//! Live-agent support subsystem
//!
//! Tracks which agents and customers are connected, queues waiting
//! customers in FIFO order, and routes messages between the two sides with
//! point-to-point and broadcast semantics.

mod channel;
mod protocol;
mod queue;
mod registry;
mod router;
mod session;

pub use channel::PeerChannel;
pub use protocol::{AgentEvent, AgentRequest, CustomerEvent, CustomerRequest};
pub use queue::CustomerQueue;
pub use registry::ConnectionRegistry;
pub use router::SupportRouter;
pub use session::{run_agent_session, run_customer_session, SessionState};
