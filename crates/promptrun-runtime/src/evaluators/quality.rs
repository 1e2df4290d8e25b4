//! Composite quality evaluator.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::{
    ColumnMapping, EvalInput, EvalScores, Evaluator, EvaluatorError, EvaluatorFactory,
};
use crate::settings::ModelSettings;

/// Composite quality checks backed by a model endpoint.
///
/// Bundles coherence, fluency, groundedness, relevance, similarity,
/// and f1 behind the single registry name `quality`. The checks run on
/// the remote evaluation service; this handle owns the connection
/// settings and the request/response shapes only.
pub struct QualityEvaluator {
    settings: ModelSettings,
    mapping: ColumnMapping,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct QualityRequest<'a> {
    evaluator: &'static str,
    deployment: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_version: Option<&'a str>,
    column_mapping: &'a ColumnMapping,
    data: &'a EvalInput,
}

impl QualityEvaluator {
    /// Assemble from model settings with the default column mapping.
    pub fn new(settings: ModelSettings) -> Self {
        Self {
            settings,
            mapping: ColumnMapping::default(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Override the column mapping.
    pub fn with_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = mapping;
        self
    }

    fn evaluate_url(&self) -> String {
        format!("{}/evaluate", self.settings.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Evaluator for QualityEvaluator {
    fn name(&self) -> &str {
        "quality"
    }

    async fn evaluate(&self, input: &EvalInput) -> Result<EvalScores, EvaluatorError> {
        let request = QualityRequest {
            evaluator: "quality",
            deployment: &self.settings.deployment,
            api_version: self.settings.api_version.as_deref(),
            column_mapping: &self.mapping,
            data: input,
        };

        let response = self
            .client
            .post(self.evaluate_url())
            .header("api-key", self.settings.api_key.expose())
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|err| EvaluatorError::Http(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EvaluatorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<EvalScores>()
            .await
            .map_err(|err| EvaluatorError::Parse(err.to_string()))
    }
}

/// Factory for the `quality` evaluator.
pub struct QualityEvaluatorFactory;

impl EvaluatorFactory for QualityEvaluatorFactory {
    fn evaluator_type(&self) -> &'static str {
        "quality"
    }

    fn create(&self) -> Result<Arc<dyn Evaluator>, EvaluatorError> {
        let settings = ModelSettings::from_env()?;
        Ok(Arc::new(QualityEvaluator::new(settings)))
    }

    fn is_configured(&self) -> bool {
        ModelSettings::is_configured()
    }

    fn description(&self) -> &'static str {
        "Composite quality checks (coherence, fluency, groundedness, relevance, similarity, f1)"
    }
}
