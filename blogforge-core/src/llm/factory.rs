use super::provider::{LLMError, LLMProvider};
use super::providers::DeepSeekProvider;
use crate::config::ProviderConfig;
use std::collections::HashMap;
use std::sync::Arc;

type ProviderBuilder = Box<dyn Fn(&ProviderConfig) -> Arc<dyn LLMProvider> + Send + Sync>;

/// LLM provider factory and registry
pub struct LLMFactory {
    providers: HashMap<String, ProviderBuilder>,
}

impl LLMFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            providers: HashMap::new(),
        };

        factory.register_provider("deepseek", |config: &ProviderConfig| {
            Arc::new(DeepSeekProvider::with_base_url(config.base_url.clone())) as Arc<dyn LLMProvider>
        });

        factory
    }

    /// Register a new provider
    pub fn register_provider<F>(&mut self, name: &str, factory_fn: F)
    where
        F: Fn(&ProviderConfig) -> Arc<dyn LLMProvider> + Send + Sync + 'static,
    {
        self.providers.insert(name.to_string(), Box::new(factory_fn));
    }

    /// Create the provider named in the configuration
    pub fn create_provider(&self, config: &ProviderConfig) -> Result<Arc<dyn LLMProvider>, LLMError> {
        let factory_fn = self.providers.get(&config.name).ok_or_else(|| {
            LLMError::InvalidRequest(format!("Unknown provider: {}", config.name))
        })?;

        Ok(factory_fn(config))
    }

    /// List available providers
    pub fn list_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for LLMFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a provider from configuration using the built-in registry
pub fn create_provider_with_config(config: &ProviderConfig) -> Result<Arc<dyn LLMProvider>, LLMError> {
    LLMFactory::new().create_provider(config)
}
