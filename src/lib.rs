//! Client library for the job-marketplace backend: endpoint resolution,
//! typed REST operations, the AI interview service and the real-time
//! message vocabulary.

pub mod cli;
pub mod client;
pub mod config;
pub mod encoding;
pub mod endpoints;
pub mod error;
pub mod interview;
pub mod realtime;
pub mod session;
pub mod types;

pub use client::ApiClient;
pub use config::{ApiConfig, Environment};
pub use endpoints::{Endpoint, Endpoints};
pub use error::{ClientError, ClientResult};
pub use interview::{InterviewClient, InterviewSession};
pub use realtime::{CallSession, CallState, ChannelEvent, SignalMessage};
pub use session::Session;
