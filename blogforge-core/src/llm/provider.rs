//! Provider abstraction for single-prompt text generation
//!
//! Every pipeline stage is one request/response exchange: a model id, a
//! prompt, a sampling temperature and the caller's credential go in, the
//! generated text comes out. Providers never see more of the pipeline than
//! that, which keeps stages swappable and lets tests substitute a stub.
//!
//! ## Failure classes
//!
//! Callers need to tell apart three families of failures:
//! - **Credential**: [`LLMError::Authentication`]
//! - **Transport / provider**: [`LLMError::Network`], [`LLMError::Provider`],
//!   [`LLMError::RateLimit`], [`LLMError::Timeout`]
//! - **Response shape**: [`LLMError::MalformedResponse`]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Opaque provider credential.
///
/// The `Debug` impl is redacted so the value never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key; blank keys count as absent.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Raw value, for building the authorization header only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Single-prompt generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LLMRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
}

impl LLMRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature,
        }
    }
}

/// Generated text plus whatever bookkeeping the provider reported
#[derive(Debug, Clone, PartialEq)]
pub struct LLMResponse {
    pub content: String,
    pub model: String,
    pub usage: Option<Usage>,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error(String),
}

impl FinishReason {
    /// Output was cut short, by the token limit or a content filter
    pub fn is_truncated(&self) -> bool {
        matches!(self, FinishReason::Length | FinishReason::ContentFilter)
    }
}

/// Text-generation provider
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name (e.g., "deepseek")
    fn name(&self) -> &str;

    /// Run one generation; the credential is supplied per call
    async fn generate(
        &self,
        request: LLMRequest,
        credential: &Credential,
    ) -> Result<LLMResponse, LLMError>;

    /// Get supported models
    fn supported_models(&self) -> Vec<String>;

    /// Validate request for this provider
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError> {
        if request.prompt.trim().is_empty() {
            return Err(LLMError::InvalidRequest("Prompt cannot be empty".to_string()));
        }
        if request.model.trim().is_empty() {
            return Err(LLMError::InvalidRequest("Model cannot be empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl LLMError {
    /// Whether the failure points at the credential rather than the service
    pub fn is_credential_error(&self) -> bool {
        matches!(self, LLMError::Authentication(_))
    }
}
