//! Agent card resolution.
//!
//! An A2A-style service publishes a card describing itself at a
//! well-known path under its base URL. The runner fetches it once per
//! run to learn the message endpoint and the agent's identity.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ClientError;

/// Well-known path the agent card is published under.
pub const WELL_KNOWN_CARD_PATH: &str = "/.well-known/agent.json";

/// An agent's self-description document.
///
/// Only the fields the runner reads are modeled; unknown fields in the
/// document are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Display name of the agent.
    pub name: String,

    /// Endpoint messages are sent to.
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub capabilities: AgentCapabilities,

    #[serde(default)]
    pub skills: Vec<AgentSkill>,
}

/// Optional protocol capabilities advertised by the card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(default)]
    pub streaming: bool,

    #[serde(default)]
    pub push_notifications: bool,
}

/// One skill advertised by the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Fetches the agent card from a service base URL.
pub struct CardResolver {
    client: reqwest::Client,
    base_url: String,
    card_path: String,
}

impl CardResolver {
    /// Create a resolver using the default well-known card path.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            card_path: WELL_KNOWN_CARD_PATH.to_string(),
        }
    }

    /// Override the card path.
    pub fn with_card_path(mut self, card_path: impl Into<String>) -> Self {
        self.card_path = card_path.into();
        self
    }

    /// Fetch and decode the agent card.
    pub async fn resolve(&self) -> Result<AgentCard, ClientError> {
        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.card_path
        );
        debug!(%url, "resolving agent card");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ClientError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<AgentCard>()
            .await
            .map_err(|err| ClientError::Parse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_decodes_minimal_document() {
        let card: AgentCard = serde_json::from_str(
            r#"{"name": "Echo", "url": "http://localhost:9999/"}"#,
        )
        .unwrap();

        assert_eq!(card.name, "Echo");
        assert_eq!(card.url, "http://localhost:9999/");
        assert!(!card.capabilities.streaming);
        assert!(card.skills.is_empty());
    }

    #[test]
    fn test_card_decodes_full_document() {
        let card: AgentCard = serde_json::from_str(
            r#"{
                "name": "Helper",
                "url": "http://localhost:9999/",
                "description": "answers questions",
                "version": "1.0.0",
                "capabilities": {"streaming": true, "pushNotifications": false},
                "skills": [{"id": "qa", "name": "Q&A", "tags": ["general"]}],
                "defaultInputModes": ["text"]
            }"#,
        )
        .unwrap();

        assert_eq!(card.version.as_deref(), Some("1.0.0"));
        assert!(card.capabilities.streaming);
        assert_eq!(card.skills.len(), 1);
        assert_eq!(card.skills[0].id, "qa");
    }

    #[test]
    fn test_card_without_name_rejected() {
        let result = serde_json::from_str::<AgentCard>(r#"{"url": "http://x/"}"#);
        assert!(result.is_err());
    }
}
