//! API key management for secure retrieval from environment variables,
//! .env files, and configuration files.
//!
//! The pipeline never reads the environment directly; it asks an injected
//! [`CredentialResolver`] once per run. [`ApiKeySources`] is the production
//! resolver: the environment variable wins, then the configuration value.

use crate::config::ProviderConfig;
use crate::config::constants::defaults;
use crate::llm::Credential;
use std::env;

/// Where a resolved credential came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Environment,
    ConfigFile,
    /// Supplied directly by the embedding caller
    Provided,
}

/// Source of the provider credential, consulted once per pipeline run
pub trait CredentialResolver: Send + Sync {
    /// `None` when no usable key is configured
    fn resolve(&self) -> Option<Credential>;

    /// Origin of the key `resolve` would return
    fn source(&self) -> Option<KeySource> {
        self.resolve().map(|_| KeySource::Provided)
    }

    /// Name of the variable the operator should set, for error messages
    fn env_var(&self) -> &str {
        defaults::DEFAULT_API_KEY_ENV
    }
}

/// API key sources for the configured provider
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// API key environment variable name
    pub env_var: String,
    /// API key from configuration file
    pub config_value: Option<String>,
}

impl Default for ApiKeySources {
    fn default() -> Self {
        Self {
            env_var: defaults::DEFAULT_API_KEY_ENV.to_string(),
            config_value: None,
        }
    }
}

impl From<&ProviderConfig> for ApiKeySources {
    fn from(config: &ProviderConfig) -> Self {
        Self {
            env_var: config.api_key_env.clone(),
            config_value: config.api_key.clone(),
        }
    }
}

impl ApiKeySources {
    fn lookup(&self) -> Option<(Credential, KeySource)> {
        if let Some(credential) = env::var(&self.env_var).ok().and_then(Credential::new) {
            return Some((credential, KeySource::Environment));
        }
        self.config_value
            .clone()
            .and_then(Credential::new)
            .map(|credential| (credential, KeySource::ConfigFile))
    }
}

impl CredentialResolver for ApiKeySources {
    fn resolve(&self) -> Option<Credential> {
        self.lookup().map(|(credential, _)| credential)
    }

    fn source(&self) -> Option<KeySource> {
        self.lookup().map(|(_, source)| source)
    }

    fn env_var(&self) -> &str {
        &self.env_var
    }
}

/// Fixed credential, for embedding callers and tests
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(pub Option<Credential>);

impl StaticCredential {
    pub fn new(raw: &str) -> Self {
        Self(Credential::new(raw))
    }

    pub fn absent() -> Self {
        Self(None)
    }
}

impl CredentialResolver for StaticCredential {
    fn resolve(&self) -> Option<Credential> {
        self.0.clone()
    }
}

/// Load environment variables from .env file
///
/// Missing files are not an error; a malformed file is reported and skipped.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "failed to parse .env file"),
    }
}
