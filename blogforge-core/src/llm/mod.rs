//! LLM abstraction layer
//!
//! A single-prompt provider trait plus the concrete providers behind it.

pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::{LLMFactory, create_provider_with_config};
pub use provider::{Credential, LLMError, LLMProvider, LLMRequest, LLMResponse};
pub use providers::DeepSeekProvider;
