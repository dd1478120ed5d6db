//! blogforge core library
//!
//! Prompt-chained blog generation over an OpenAI-compatible LLM provider:
//! - **Request model**: validated, immutable [`GenerationRequest`]
//! - **Templates**: pure prompt builders for each stage ([`prompts`])
//! - **Pipeline**: outline → draft → enhancement, plus a one-shot summarizer
//!   ([`BlogPipeline`])
//! - **Providers**: the [`LLMProvider`] trait and a DeepSeek implementation
//!
//! The provider and the credential source are injected, so the pipeline can be
//! driven against a stub in tests.

pub mod api_keys;
pub mod config;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod request;

pub use api_keys::{ApiKeySources, CredentialResolver, KeySource, StaticCredential, load_dotenv};
pub use config::{BlogForgeConfig, ConfigManager};
pub use llm::{Credential, DeepSeekProvider, LLMError, LLMProvider, LLMRequest, LLMResponse};
pub use pipeline::{BlogPipeline, GenerationError, PipelineSettings, PipelineState, RunHooks, Stage};
pub use request::{GenerationRequest, GenerationRequestPayload, Keywords, Tone};
