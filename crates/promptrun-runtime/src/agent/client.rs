//! JSON-RPC message client for an A2A-style agent endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::{AgentCard, AgentClient, ClientError, DEFAULT_TIMEOUT};

/// JSON-RPC envelope for `message/send`.
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    jsonrpc: &'static str,
    id: String,
    method: &'static str,
    params: MessageSendParams<'a>,
}

#[derive(Debug, Serialize)]
struct MessageSendParams<'a> {
    message: OutboundMessage<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundMessage<'a> {
    role: &'static str,
    parts: Vec<OutboundPart<'a>>,
    message_id: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum OutboundPart<'a> {
    Text { text: &'a str },
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    #[serde(default)]
    result: Option<InboundMessage>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct InboundMessage {
    #[serde(default)]
    parts: Vec<InboundPart>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum InboundPart {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// HTTP client for one agent endpoint.
///
/// Sends one `message/send` call per dataset record. Each request
/// carries fresh request and message ids; when a dataset reference is
/// set, requests also carry it in an `X-Reference` header so the
/// receiving service can attribute the traffic.
pub struct A2aClient {
    client: reqwest::Client,
    url: String,
    reference: Option<String>,
    timeout: Duration,
}

impl A2aClient {
    /// Create a client for a message endpoint URL.
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            reference: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client for the endpoint a resolved card advertises.
    pub fn for_card(client: reqwest::Client, card: &AgentCard) -> Self {
        Self::new(client, card.url.clone())
    }

    /// Tag requests with the dataset file they originate from.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl AgentClient for A2aClient {
    async fn send_message(&self, text: &str) -> Result<String, ClientError> {
        let request = SendMessageRequest {
            jsonrpc: "2.0",
            id: Uuid::new_v4().to_string(),
            method: "message/send",
            params: MessageSendParams {
                message: OutboundMessage {
                    role: "user",
                    parts: vec![OutboundPart::Text { text }],
                    message_id: Uuid::new_v4().simple().to_string(),
                },
            },
        };
        debug!(id = %request.id, "sending message");

        let mut builder = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&request);
        if let Some(reference) = &self.reference {
            builder = builder.header("X-Reference", reference);
        }

        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                ClientError::Timeout(self.timeout)
            } else {
                ClientError::Http(err.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: RpcEnvelope = response
            .json()
            .await
            .map_err(|err| ClientError::Parse(err.to_string()))?;

        if let Some(error) = envelope.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let message = envelope.result.ok_or_else(|| {
            ClientError::Parse("response carries neither result nor error".to_string())
        })?;

        Ok(message
            .parts
            .into_iter()
            .filter_map(|part| match part {
                InboundPart::Text { text } => Some(text),
                InboundPart::Other => None,
            })
            .collect::<Vec<_>>()
            .join(""))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
