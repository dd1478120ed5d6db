use crate::config::constants::{defaults, urls};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Text-generation provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Provider name (currently only "deepseek")
    #[serde(default = "default_provider")]
    pub name: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used by the blog pipeline and as the direct-route default
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Fallback API key when the environment variable is unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-call timeout in seconds; 0 disables the timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: default_provider(),
            base_url: default_base_url(),
            default_model: default_model(),
            api_key_env: default_api_key_env(),
            api_key: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl ProviderConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_seconds > 0).then(|| Duration::from_secs(self.request_timeout_seconds))
    }
}

fn default_provider() -> String {
    defaults::DEFAULT_PROVIDER.to_string()
}
fn default_base_url() -> String {
    urls::DEEPSEEK_API_BASE.to_string()
}
fn default_model() -> String {
    defaults::DEFAULT_MODEL.to_string()
}
fn default_api_key_env() -> String {
    defaults::DEFAULT_API_KEY_ENV.to_string()
}
fn default_request_timeout() -> u64 {
    defaults::DEFAULT_REQUEST_TIMEOUT_SECS
}
