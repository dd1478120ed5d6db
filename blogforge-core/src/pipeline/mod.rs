//! Prompt-chained generation pipelines
//!
//! The blog pipeline runs three strictly sequential stages, each prompt
//! embedding the previous stage's output verbatim:
//!
//! 1. **Outline** (temperature 0.7)
//! 2. **Draft** from the outline (0.8)
//! 3. **Enhancement** of the draft for SEO and readability (0.6)
//!
//! The summarizer is a single stage (0.5). Both resolve the credential once,
//! before any provider call, and abort on the first failure. Nothing is
//! retried and no partial output is returned.

pub mod error;
pub mod state;

pub use error::GenerationError;
pub use state::{PipelineState, RunHooks, Stage};

use crate::api_keys::{ApiKeySources, CredentialResolver, KeySource};
use crate::config::BlogForgeConfig;
use crate::config::constants::{defaults, temperatures};
use crate::llm::{
    Credential, LLMError, LLMProvider, LLMRequest, LLMResponse, create_provider_with_config,
};
use crate::prompts;
use crate::request::GenerationRequest;
use state::RunTracker;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Model and sampling settings applied to every run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    pub model: String,
    pub outline_temperature: f32,
    pub draft_temperature: f32,
    pub enhancement_temperature: f32,
    pub summary_temperature: f32,
    pub direct_temperature: f32,
    /// Per-call limit; `None` waits as long as the provider does
    pub request_timeout: Option<Duration>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_MODEL.to_string(),
            outline_temperature: temperatures::OUTLINE,
            draft_temperature: temperatures::DRAFT,
            enhancement_temperature: temperatures::ENHANCEMENT,
            summary_temperature: temperatures::SUMMARY,
            direct_temperature: temperatures::DIRECT,
            request_timeout: Some(Duration::from_secs(defaults::DEFAULT_REQUEST_TIMEOUT_SECS)),
        }
    }
}

impl From<&BlogForgeConfig> for PipelineSettings {
    fn from(config: &BlogForgeConfig) -> Self {
        Self {
            model: config.provider.default_model.clone(),
            outline_temperature: config.pipeline.outline_temperature,
            draft_temperature: config.pipeline.draft_temperature,
            enhancement_temperature: config.pipeline.enhancement_temperature,
            summary_temperature: config.pipeline.summary_temperature,
            direct_temperature: config.pipeline.direct_temperature,
            request_timeout: config.provider.request_timeout(),
        }
    }
}

/// Stateless driver for the blog, summary and direct pipelines
///
/// Cheap to share behind an `Arc`; concurrent runs hold no common mutable
/// state.
pub struct BlogPipeline {
    provider: Arc<dyn LLMProvider>,
    credentials: Arc<dyn CredentialResolver>,
    settings: PipelineSettings,
}

impl BlogPipeline {
    pub fn new(provider: Arc<dyn LLMProvider>, credentials: Arc<dyn CredentialResolver>) -> Self {
        Self {
            provider,
            credentials,
            settings: PipelineSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: PipelineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Wire the configured provider and key sources together
    pub fn from_config(config: &BlogForgeConfig) -> Result<Self, LLMError> {
        let provider = create_provider_with_config(&config.provider)?;
        let credentials = Arc::new(ApiKeySources::from(&config.provider));
        let pipeline = Self::new(provider, credentials).with_settings(PipelineSettings::from(config));
        if !pipeline.model_is_supported() {
            warn!(
                provider = %pipeline.provider_name(),
                model = %pipeline.settings.model,
                "configured model is not in the provider's model list"
            );
        }
        Ok(pipeline)
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Whether the provider lists the configured model
    pub fn model_is_supported(&self) -> bool {
        self.provider
            .supported_models()
            .iter()
            .any(|model| *model == self.settings.model)
    }

    /// Whether a credential is currently resolvable
    pub fn has_credential(&self) -> bool {
        self.credentials.resolve().is_some()
    }

    /// Where the credential would come from right now
    pub fn credential_source(&self) -> Option<KeySource> {
        self.credentials.source()
    }

    /// Environment variable the operator should set
    pub fn credential_env_var(&self) -> &str {
        self.credentials.env_var()
    }

    /// Outline → draft → enhancement; returns the enhanced article
    pub async fn generate_blog(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.generate_blog_with(request, RunHooks::default()).await
    }

    pub async fn generate_blog_with(
        &self,
        request: &GenerationRequest,
        hooks: RunHooks<'_>,
    ) -> Result<String, GenerationError> {
        let mut tracker = RunTracker::new(hooks);
        info!(topic = %request.topic(), tone = %request.tone(), "starting blog generation");

        let result = self.run_blog(request, &mut tracker).await;
        self.finish(&mut tracker, &result);
        result
    }

    async fn run_blog(
        &self,
        request: &GenerationRequest,
        tracker: &mut RunTracker<'_>,
    ) -> Result<String, GenerationError> {
        let credential = self.resolve_credential()?;
        let model = self.settings.model.as_str();

        let outline = self
            .call_stage(
                tracker,
                Stage::Outline,
                prompts::build_outline_prompt(request),
                model,
                self.settings.outline_temperature,
                &credential,
            )
            .await?;

        let draft = self
            .call_stage(
                tracker,
                Stage::Draft,
                prompts::build_draft_prompt(request, &outline),
                model,
                self.settings.draft_temperature,
                &credential,
            )
            .await?;

        self.call_stage(
            tracker,
            Stage::Enhancement,
            prompts::build_enhancement_prompt(request, &draft),
            model,
            self.settings.enhancement_temperature,
            &credential,
        )
        .await
    }

    /// Short 150-200 word summary of finished content
    pub async fn summarize_blog(&self, content: &str) -> Result<String, GenerationError> {
        self.summarize_blog_with(content, RunHooks::default()).await
    }

    pub async fn summarize_blog_with(
        &self,
        content: &str,
        hooks: RunHooks<'_>,
    ) -> Result<String, GenerationError> {
        let mut tracker = RunTracker::new(hooks);

        let result = self.run_summary(content, &mut tracker).await;
        self.finish(&mut tracker, &result);
        result
    }

    async fn run_summary(
        &self,
        content: &str,
        tracker: &mut RunTracker<'_>,
    ) -> Result<String, GenerationError> {
        let credential = self.resolve_credential()?;
        if content.trim().is_empty() {
            return Err(GenerationError::InvalidInput("Content is required".to_string()));
        }

        self.call_stage(
            tracker,
            Stage::Summary,
            prompts::build_summary_prompt(content),
            &self.settings.model,
            self.settings.summary_temperature,
            &credential,
        )
        .await
    }

    /// Single call with a caller-built prompt and optional overrides
    pub async fn generate_direct(
        &self,
        prompt: &str,
        model: Option<&str>,
        temperature: Option<f32>,
    ) -> Result<String, GenerationError> {
        let mut tracker = RunTracker::new(RunHooks::default());

        let result = self.run_direct(prompt, model, temperature, &mut tracker).await;
        self.finish(&mut tracker, &result);
        result
    }

    async fn run_direct(
        &self,
        prompt: &str,
        model: Option<&str>,
        temperature: Option<f32>,
        tracker: &mut RunTracker<'_>,
    ) -> Result<String, GenerationError> {
        let credential = self.resolve_credential()?;
        if prompt.trim().is_empty() {
            return Err(GenerationError::InvalidInput("Prompt is required".to_string()));
        }
        let temperature = temperature.unwrap_or(self.settings.direct_temperature);
        if !(temperatures::MIN..=temperatures::MAX).contains(&temperature) {
            return Err(GenerationError::InvalidInput(format!(
                "Temperature must be between {} and {}",
                temperatures::MIN,
                temperatures::MAX
            )));
        }
        let model = model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(&self.settings.model);

        self.call_stage(
            tracker,
            Stage::Direct,
            prompt.to_string(),
            model,
            temperature,
            &credential,
        )
        .await
    }

    fn resolve_credential(&self) -> Result<Credential, GenerationError> {
        self.credentials.resolve().ok_or_else(|| {
            warn!(env_var = %self.credentials.env_var(), "no provider credential configured");
            GenerationError::MissingCredential {
                env_var: self.credentials.env_var().to_string(),
            }
        })
    }

    async fn call_stage(
        &self,
        tracker: &mut RunTracker<'_>,
        stage: Stage,
        prompt: String,
        model: &str,
        temperature: f32,
        credential: &Credential,
    ) -> Result<String, GenerationError> {
        if tracker.is_cancelled() {
            return Err(GenerationError::Cancelled { stage });
        }
        tracker.advance(stage.running_state());

        info!(
            %stage,
            model,
            temperature,
            prompt_chars = prompt.len(),
            "calling provider"
        );
        let started = Instant::now();
        let request = LLMRequest::new(model, prompt, temperature);
        let call = self.call_with_timeout(request, credential);

        let outcome = tokio::select! {
            outcome = call => outcome,
            _ = tracker.cancelled() => {
                warn!(%stage, "run cancelled while awaiting provider");
                return Err(GenerationError::Cancelled { stage });
            }
        };

        match outcome {
            Ok(response) => {
                info!(
                    %stage,
                    model = %response.model,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    output_chars = response.content.len(),
                    "stage complete"
                );
                if response.finish_reason.is_truncated() {
                    warn!(%stage, reason = ?response.finish_reason, "provider cut the output short");
                }
                if let Some(usage) = &response.usage {
                    debug!(%stage, total_tokens = usage.total_tokens, "token usage");
                }
                Ok(response.content)
            }
            Err(source) => {
                if source.is_credential_error() {
                    warn!(
                        %stage,
                        env_var = %self.credentials.env_var(),
                        error = %source,
                        "provider rejected the API key"
                    );
                } else {
                    warn!(%stage, error = %source, "provider call failed");
                }
                Err(GenerationError::Provider { stage, source })
            }
        }
    }

    async fn call_with_timeout(
        &self,
        request: LLMRequest,
        credential: &Credential,
    ) -> Result<LLMResponse, LLMError> {
        match self.settings.request_timeout {
            Some(limit) => tokio::time::timeout(limit, self.provider.generate(request, credential))
                .await
                .unwrap_or(Err(LLMError::Timeout(limit))),
            None => self.provider.generate(request, credential).await,
        }
    }

    fn finish(&self, tracker: &mut RunTracker<'_>, result: &Result<String, GenerationError>) {
        match result {
            Ok(_) => tracker.advance(PipelineState::Done),
            Err(err) => {
                tracker.advance(PipelineState::Failed);
                if let Some(stage) = err.stage() {
                    debug!(%stage, "run failed");
                }
            }
        }
    }
}
