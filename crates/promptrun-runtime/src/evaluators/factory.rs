//! Factory pattern for evaluator registration.
//!
//! New evaluator kinds register a factory instead of growing an enum.
//! Each factory knows how to probe its configuration and build an
//! instance from the environment.
//!
//! ## Usage
//!
//! ```ignore
//! let registry = EvaluatorRegistry::with_defaults();
//! let quality = registry.create("quality")?;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use super::{Evaluator, EvaluatorError};

/// Factory for creating evaluator instances from the environment.
pub trait EvaluatorFactory: Send + Sync {
    /// Unique registry name for this evaluator kind.
    ///
    /// Examples: "quality", "content_safety"
    fn evaluator_type(&self) -> &'static str;

    /// Build an evaluator instance from the current environment.
    fn create(&self) -> Result<Arc<dyn Evaluator>, EvaluatorError>;

    /// Whether the environment carries the settings this evaluator
    /// needs, without building it.
    fn is_configured(&self) -> bool;

    /// Human-readable description of this evaluator.
    fn description(&self) -> &'static str {
        "Evaluator"
    }
}

/// Registry of available evaluator factories.
#[derive(Default)]
pub struct EvaluatorRegistry {
    factories: BTreeMap<String, Arc<dyn EvaluatorFactory>>,
}

impl EvaluatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one with the same
    /// name.
    pub fn register(&mut self, factory: Arc<dyn EvaluatorFactory>) {
        self.factories
            .insert(factory.evaluator_type().to_string(), factory);
    }

    /// Build an evaluator by registry name.
    pub fn create(&self, evaluator_type: &str) -> Result<Arc<dyn Evaluator>, EvaluatorError> {
        self.factories
            .get(evaluator_type)
            .ok_or_else(|| EvaluatorError::Unknown(evaluator_type.to_string()))?
            .create()
    }

    /// List registered evaluator names.
    pub fn available_types(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }

    /// Whether a name is registered.
    pub fn has_evaluator(&self, evaluator_type: &str) -> bool {
        self.factories.contains_key(evaluator_type)
    }

    /// The factory behind a registry name.
    pub fn get_factory(&self, evaluator_type: &str) -> Option<&Arc<dyn EvaluatorFactory>> {
        self.factories.get(evaluator_type)
    }

    /// Registry with the built-in evaluators registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::QualityEvaluatorFactory));
        registry.register(Arc::new(super::ContentSafetyEvaluatorFactory));
        registry
    }
}

impl std::fmt::Debug for EvaluatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorRegistry")
            .field("evaluators", &self.available_types())
            .finish()
    }
}
