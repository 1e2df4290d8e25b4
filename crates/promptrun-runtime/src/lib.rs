//! # promptrun-runtime
//!
//! Remote collaborators for the promptrun tools.
//!
//! Everything here is thin plumbing around services that do the real
//! work elsewhere:
//!
//! - [`agent`]: agent-card resolution and a message-send client for an
//!   A2A-style JSON-RPC endpoint. No protocol state machine lives here.
//! - [`evaluators`]: assembly of quality and content-safety evaluator
//!   handles from environment settings into a registry. No scoring
//!   lives here.
//! - [`settings`] / [`secrets`]: environment-backed configuration and
//!   credential handling shared by both.
//!
//! ## Example
//!
//! ```rust,ignore
//! use promptrun_runtime::{A2aClient, AgentClient, CardResolver};
//!
//! let http = reqwest::Client::new();
//! let card = CardResolver::new(http.clone(), "http://localhost:9999")
//!     .resolve()
//!     .await?;
//! let client = A2aClient::for_card(http, &card);
//! let reply = client.send_message("hi").await?;
//! ```

pub mod agent;
pub mod evaluators;
pub mod secrets;
pub mod settings;

// Re-export main types at crate root
pub use agent::{
    A2aClient, AgentCapabilities, AgentCard, AgentClient, AgentSkill, CardResolver, ClientError,
    DEFAULT_TIMEOUT, WELL_KNOWN_CARD_PATH,
};
pub use evaluators::{
    ColumnMapping, ContentSafetyEvaluator, ContentSafetyEvaluatorFactory, EvalInput, EvalScores,
    Evaluator, EvaluatorError, EvaluatorFactory, EvaluatorRegistry, QualityEvaluator,
    QualityEvaluatorFactory,
};
pub use secrets::{ApiCredential, CredentialSource};
pub use settings::{ModelSettings, ProjectSettings, Settings, SettingsError};
