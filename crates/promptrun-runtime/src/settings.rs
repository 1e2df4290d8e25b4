//! Environment-backed settings for the remote collaborators.
//!
//! Settings are read from the process environment; the CLI loads a
//! `.env` file first, so both sources layer the same way. Each section
//! loads independently: [`Settings::from_env`] keeps whatever is
//! present and leaves the rest `None`, while the per-section
//! `from_env` constructors fail with a typed error naming the missing
//! variable.

use thiserror::Error;

use crate::secrets::ApiCredential;

/// Environment variable for the evaluation model endpoint.
pub const MODEL_BASE_URL_ENV: &str = "PROMPTRUN_MODEL_BASE_URL";
/// Environment variable for the evaluation model API key.
pub const MODEL_API_KEY_ENV: &str = "PROMPTRUN_MODEL_API_KEY";
/// Environment variable for the evaluation model deployment name.
pub const MODEL_DEPLOYMENT_ENV: &str = "PROMPTRUN_MODEL_DEPLOYMENT";
/// Environment variable for the evaluation model API version.
pub const MODEL_API_VERSION_ENV: &str = "PROMPTRUN_MODEL_API_VERSION";
/// Environment variable for the evaluation project endpoint.
pub const PROJECT_ENDPOINT_ENV: &str = "PROMPTRUN_PROJECT_ENDPOINT";
/// Environment variable for the evaluation project API key.
pub const PROJECT_API_KEY_ENV: &str = "PROMPTRUN_PROJECT_API_KEY";

/// Errors from settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{name} not set: configure '{var}' environment variable")]
    NotConfigured { name: String, var: String },
}

fn required_var(env_var: &str, name: &str) -> Result<String, SettingsError> {
    std::env::var(env_var)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| SettingsError::NotConfigured {
            name: name.to_string(),
            var: env_var.to_string(),
        })
}

/// Connection settings for the model backing the quality checks.
#[derive(Debug)]
pub struct ModelSettings {
    /// Base URL of the model endpoint
    pub base_url: String,

    /// API key for the model endpoint
    pub api_key: ApiCredential,

    /// Deployment name to evaluate with
    pub deployment: String,

    /// API version, when the endpoint requires one
    pub api_version: Option<String>,
}

impl ModelSettings {
    /// Load from the environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            base_url: required_var(MODEL_BASE_URL_ENV, "model endpoint")?,
            api_key: ApiCredential::from_env(MODEL_API_KEY_ENV, "model API key")?,
            deployment: required_var(MODEL_DEPLOYMENT_ENV, "model deployment")?,
            api_version: std::env::var(MODEL_API_VERSION_ENV).ok(),
        })
    }

    /// Whether the required variables are present, without loading.
    pub fn is_configured() -> bool {
        std::env::var(MODEL_BASE_URL_ENV).is_ok_and(|v| !v.is_empty())
            && ApiCredential::is_available(MODEL_API_KEY_ENV)
            && std::env::var(MODEL_DEPLOYMENT_ENV).is_ok_and(|v| !v.is_empty())
    }
}

/// Connection settings for the evaluation project hosting the safety
/// checks.
#[derive(Debug)]
pub struct ProjectSettings {
    /// Project endpoint URL
    pub endpoint: String,

    /// API key for the project endpoint
    pub api_key: ApiCredential,
}

impl ProjectSettings {
    /// Load from the environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            endpoint: required_var(PROJECT_ENDPOINT_ENV, "project endpoint")?,
            api_key: ApiCredential::from_env(PROJECT_API_KEY_ENV, "project API key")?,
        })
    }

    /// Whether the required variables are present, without loading.
    pub fn is_configured() -> bool {
        std::env::var(PROJECT_ENDPOINT_ENV).is_ok_and(|v| !v.is_empty())
            && ApiCredential::is_available(PROJECT_API_KEY_ENV)
    }
}

/// Everything the environment provides, with absent sections left out.
#[derive(Debug, Default)]
pub struct Settings {
    /// Model settings, when configured
    pub model: Option<ModelSettings>,
    /// Project settings, when configured
    pub project: Option<ProjectSettings>,
}

impl Settings {
    /// Load whatever the environment carries.
    pub fn from_env() -> Self {
        Self {
            model: ModelSettings::from_env().ok(),
            project: ProjectSettings::from_env().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    // These tests mutate shared process environment; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn clear_model_env() {
        std::env::remove_var(MODEL_BASE_URL_ENV);
        std::env::remove_var(MODEL_API_KEY_ENV);
        std::env::remove_var(MODEL_DEPLOYMENT_ENV);
        std::env::remove_var(MODEL_API_VERSION_ENV);
    }

    #[test]
    fn test_model_settings_from_env() {
        let _guard = env_guard();
        std::env::set_var(MODEL_BASE_URL_ENV, "https://models.example.com");
        std::env::set_var(MODEL_API_KEY_ENV, "key");
        std::env::set_var(MODEL_DEPLOYMENT_ENV, "gpt-test");

        assert!(ModelSettings::is_configured());
        let settings = ModelSettings::from_env().unwrap();
        assert_eq!(settings.base_url, "https://models.example.com");
        assert_eq!(settings.deployment, "gpt-test");
        assert_eq!(settings.api_version, None);

        clear_model_env();
    }

    #[test]
    fn test_model_settings_missing_names_variable() {
        let _guard = env_guard();
        clear_model_env();
        let err = ModelSettings::from_env().unwrap_err();
        assert!(err.to_string().contains(MODEL_BASE_URL_ENV));
        assert!(!ModelSettings::is_configured());
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let _guard = env_guard();
        std::env::set_var(MODEL_BASE_URL_ENV, "");
        let err = ModelSettings::from_env().unwrap_err();
        assert!(matches!(err, SettingsError::NotConfigured { .. }));
        clear_model_env();
    }
}
