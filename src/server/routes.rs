use super::{AppState, error::ApiError};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use blogforge_core::prompts::build_direct_prompt;
use blogforge_core::{GenerationRequest, GenerationRequestPayload, KeySource, Keywords};
use serde::{Deserialize, Serialize};

/// Successful generation body
#[derive(Debug, Serialize, Deserialize)]
pub struct TextResponse {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvCheckResponse {
    pub has_api_key: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizePayload {
    #[serde(default)]
    pub content: String,
}

/// Raw prompt, or template fields when `useTemplate` is set
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectPayload {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub use_template: bool,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub keywords: Option<Keywords>,
}

impl DirectPayload {
    /// Template prompt when requested and every field is filled in,
    /// otherwise the caller's raw prompt
    pub fn resolve_prompt(&self) -> String {
        if self.use_template {
            let filled = |field: &Option<String>| {
                field
                    .as_deref()
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string)
            };
            if let (Some(topic), Some(tone), Some(audience), Some(keywords)) = (
                filled(&self.topic),
                filled(&self.tone),
                filled(&self.audience),
                self.keywords.as_ref().filter(|k| !k.is_empty()),
            ) {
                return build_direct_prompt(&topic, &tone, &audience, keywords);
            }
            tracing::debug!("template fields incomplete, falling back to raw prompt");
        }
        self.prompt.clone().unwrap_or_default()
    }
}

pub(super) async fn health() -> &'static str {
    "OK"
}

pub(super) async fn env_check(State(state): State<AppState>) -> Json<EnvCheckResponse> {
    let source = state.pipeline.credential_source();
    let env_var = state.pipeline.credential_env_var();
    let message = match source {
        Some(KeySource::Environment) => format!("{env_var} environment variable is set"),
        Some(KeySource::ConfigFile) => format!(
            "{env_var} environment variable is not set; using provider.api_key from the configuration file"
        ),
        Some(KeySource::Provided) => "API key is configured".to_string(),
        None => format!("{env_var} environment variable is not set"),
    };

    Json(EnvCheckResponse {
        has_api_key: source.is_some(),
        message,
    })
}

pub(super) async fn generate_blog(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequestPayload>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let Json(payload) = payload?;
    let request = GenerationRequest::try_from(payload)?;

    let text = state.pipeline.generate_blog(&request).await?;
    Ok(Json(TextResponse { text }))
}

pub(super) async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizePayload>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let Json(payload) = payload?;

    let text = state.pipeline.summarize_blog(&payload.content).await?;
    Ok(Json(TextResponse { text }))
}

pub(super) async fn direct(
    State(state): State<AppState>,
    payload: Result<Json<DirectPayload>, JsonRejection>,
) -> Result<Json<TextResponse>, ApiError> {
    let Json(payload) = payload?;
    let prompt = payload.resolve_prompt();

    let text = state
        .pipeline
        .generate_direct(&prompt, payload.model.as_deref(), payload.temperature)
        .await?;
    Ok(Json(TextResponse { text }))
}
