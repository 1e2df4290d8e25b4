//! Secure credential handling.
//!
//! All remote collaborators load their credentials through
//! [`ApiCredential`], which keeps them out of logs:
//!
//! - `Debug`/`Display` print `[REDACTED]`, never the value
//! - the value is zeroed on drop
//! - use requires an explicit [`expose`](ApiCredential::expose) call
//!
//! ## Usage
//!
//! ```ignore
//! let cred = ApiCredential::from_env("PROMPTRUN_MODEL_API_KEY", "model API key")?;
//! request.header("api-key", cred.expose());
//! ```

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::settings::SettingsError;

/// Where a credential was loaded from.
///
/// Useful for debugging configuration issues without exposing the
/// credential value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from environment variable
    Environment,
    /// Provided programmatically
    Programmatic,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// A securely-stored API credential.
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl ApiCredential {
    /// Wrap a credential value.
    ///
    /// After this point the value cannot be accidentally logged.
    pub fn new(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        Self {
            value: SecretString::from(value.into()),
            source,
            name,
        }
    }

    /// Load a credential from an environment variable.
    ///
    /// `name` is the human-readable label used in error messages
    /// (e.g. "model API key"). The variable's value is not logged.
    pub fn from_env(env_var: &str, name: &'static str) -> Result<Self, SettingsError> {
        std::env::var(env_var)
            .map(|value| Self::new(value, CredentialSource::Environment, name))
            .map_err(|_| SettingsError::NotConfigured {
                name: name.to_string(),
                var: env_var.to_string(),
            })
    }

    /// Check whether the variable is set, without loading it.
    pub fn is_available(env_var: &str) -> bool {
        std::env::var(env_var).is_ok()
    }

    /// Expose the credential value for use in a request.
    ///
    /// Only call this at the point where the value is actually needed,
    /// such as setting an HTTP header; never store the exposed value.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    /// Whether the credential is empty.
    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }

    /// Where this credential came from.
    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Human-readable label for this credential.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} [REDACTED]", self.name, self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_redacted_in_debug() {
        let secret = "sk-super-secret-key-12345";
        let cred = ApiCredential::new(secret, CredentialSource::Programmatic, "test key");

        let debug = format!("{:?}", cred);
        assert!(!debug.contains(secret), "secret exposed in Debug!");
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_credential_redacted_in_display() {
        let secret = "sk-super-secret-key-12345";
        let cred = ApiCredential::new(secret, CredentialSource::Environment, "test key");

        let display = format!("{}", cred);
        assert!(!display.contains(secret), "secret exposed in Display!");
        assert!(display.contains("[REDACTED]"));
        assert!(display.contains("test key"));
        assert!(display.contains("environment"));
    }

    #[test]
    fn test_credential_expose() {
        let cred = ApiCredential::new("value", CredentialSource::Programmatic, "test key");
        assert_eq!(cred.expose(), "value");
        assert!(!cred.is_empty());
    }

    #[test]
    fn test_from_env() {
        std::env::set_var("PROMPTRUN_TEST_CRED", "env-value");
        let cred = ApiCredential::from_env("PROMPTRUN_TEST_CRED", "test key").unwrap();
        assert_eq!(cred.expose(), "env-value");
        assert_eq!(cred.source(), CredentialSource::Environment);
        std::env::remove_var("PROMPTRUN_TEST_CRED");
    }

    #[test]
    fn test_from_env_missing() {
        let result = ApiCredential::from_env("PROMPTRUN_TEST_CRED_MISSING", "test key");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("test key"));
        assert!(err.to_string().contains("PROMPTRUN_TEST_CRED_MISSING"));
    }

    #[test]
    fn test_is_available() {
        std::env::set_var("PROMPTRUN_TEST_CRED_PROBE", "x");
        assert!(ApiCredential::is_available("PROMPTRUN_TEST_CRED_PROBE"));
        std::env::remove_var("PROMPTRUN_TEST_CRED_PROBE");
        assert!(!ApiCredential::is_available("PROMPTRUN_TEST_CRED_PROBE"));
    }
}
