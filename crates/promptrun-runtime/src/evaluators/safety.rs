//! Composite content-safety evaluator.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use super::{EvalInput, EvalScores, Evaluator, EvaluatorError, EvaluatorFactory};
use crate::settings::ProjectSettings;

/// Composite content-safety checks backed by an evaluation project.
///
/// Bundles hate/unfairness, self-harm, sexual, and violence checks
/// behind the single registry name `content_safety`. The checks run on
/// the remote project endpoint; this handle owns the connection
/// settings and the request/response shapes only.
pub struct ContentSafetyEvaluator {
    settings: ProjectSettings,
    client: reqwest::Client,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SafetyRequest<'a> {
    evaluator: &'static str,
    data: &'a EvalInput,
}

impl ContentSafetyEvaluator {
    /// Assemble from project settings.
    pub fn new(settings: ProjectSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(60),
        }
    }

    fn evaluate_url(&self) -> String {
        format!("{}/evaluate", self.settings.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Evaluator for ContentSafetyEvaluator {
    fn name(&self) -> &str {
        "content_safety"
    }

    async fn evaluate(&self, input: &EvalInput) -> Result<EvalScores, EvaluatorError> {
        let request = SafetyRequest {
            evaluator: "content_safety",
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

/// Factory for the `content_safety` evaluator.
pub struct ContentSafetyEvaluatorFactory;

impl EvaluatorFactory for ContentSafetyEvaluatorFactory {
    fn evaluator_type(&self) -> &'static str {
        "content_safety"
    }

    fn create(&self) -> Result<Arc<dyn Evaluator>, EvaluatorError> {
        let settings = ProjectSettings::from_env()?;
        Ok(Arc::new(ContentSafetyEvaluator::new(settings)))
    }

    fn is_configured(&self) -> bool {
        ProjectSettings::is_configured()
    }

    fn description(&self) -> &'static str {
        "Composite content-safety checks (hate/unfairness, self-harm, sexual, violence)"
    }
}
