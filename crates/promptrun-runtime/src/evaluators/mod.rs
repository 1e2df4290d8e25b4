//! Evaluator assembly.
//!
//! Wires quality and content-safety evaluator handles from environment
//! settings into a registry the CLI and downstream pipelines can look
//! up by name. The handles own configuration, request shaping, and
//! response decoding; scoring itself runs on the remote evaluation
//! service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::settings::SettingsError;

mod factory;
mod quality;
mod safety;

pub use factory::{EvaluatorFactory, EvaluatorRegistry};
pub use quality::{QualityEvaluator, QualityEvaluatorFactory};
pub use safety::{ContentSafetyEvaluator, ContentSafetyEvaluatorFactory};

/// Errors from evaluator assembly or delegation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("unknown evaluator: '{0}'")]
    Unknown(String),

    #[error("evaluation request failed: {0}")]
    Http(String),

    #[error("evaluation service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode evaluation response: {0}")]
    Parse(String),
}

/// One evaluation row, mapped from a dataset record and the agent's
/// response to it.
#[derive(Debug, Clone, Serialize)]
pub struct EvalInput {
    pub query: String,

    pub response: String,

    pub ground_truth: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Named scores returned by an evaluator.
///
/// Score names and value shapes are owned by the remote service; they
/// pass through untyped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvalScores {
    #[serde(flatten)]
    pub scores: BTreeMap<String, serde_json::Value>,
}

/// Data-column mapping handed to a downstream evaluation run.
///
/// Templates reference dataset columns by name, e.g. `${data.query}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub query: String,

    pub response: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            query: "${data.query}".to_string(),
            response: "${data.response}".to_string(),
            context: Some("${data.context}".to_string()),
        }
    }
}

/// An assembled evaluator handle.
#[async_trait]
pub trait Evaluator: Send + Sync {
    /// Registry name of this evaluator.
    fn name(&self) -> &str;

    /// Score one input row on the remote evaluation service.
    async fn evaluate(&self, input: &EvalInput) -> Result<EvalScores, EvaluatorError>;
}
