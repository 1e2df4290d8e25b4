//! Remote agent access.
//!
//! This module covers exactly what the prompt runner needs from an
//! A2A-style agent service: fetching the agent card and sending one
//! user message at a time. Task lifecycle, streaming, and the rest of
//! the protocol stay with the remote service.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

mod card;
mod client;

pub use card::{AgentCapabilities, AgentCard, AgentSkill, CardResolver, WELL_KNOWN_CARD_PATH};
pub use client::A2aClient;

/// Default timeout for agent requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the agent endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("agent returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("agent returned RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("failed to decode agent response: {0}")]
    Parse(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

/// Client abstraction over the remote agent endpoint.
///
/// The concrete [`A2aClient`] talks JSON-RPC over HTTP; test doubles
/// implement this to drive the runner without a network.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Send one user message and return the agent's text reply.
    async fn send_message(&self, text: &str) -> Result<String, ClientError>;

    /// The endpoint this client talks to, for logs.
    fn endpoint(&self) -> &str;
}
