use crate::config::constants::{message_roles, models, urls};
use crate::llm::provider::{
    Credential, FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Usage,
};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::{Value, json};

/// DeepSeek chat completions (OpenAI-compatible wire format)
pub struct DeepSeekProvider {
    http_client: HttpClient,
    base_url: String,
}

impl DeepSeekProvider {
    pub fn new() -> Self {
        Self::with_base_url(urls::DEEPSEEK_API_BASE)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn convert_to_openai_format(&self, request: &LLMRequest) -> Value {
        json!({
            "model": request.model,
            "messages": [{
                "role": message_roles::USER,
                "content": request.prompt
            }],
            "temperature": request.temperature,
            "stream": false
        })
    }

    fn parse_openai_response(response_json: Value) -> Result<LLMResponse, LLMError> {
        let choices = response_json
            .get("choices")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                LLMError::MalformedResponse("Invalid response format: missing choices".to_string())
            })?;

        let choice = choices
            .first()
            .ok_or_else(|| LLMError::MalformedResponse("No choices in response".to_string()))?;

        let message = choice.get("message").ok_or_else(|| {
            LLMError::MalformedResponse("Invalid response format: missing message".to_string())
        })?;

        let content = message
            .get("content")
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                LLMError::MalformedResponse("Response contained no generated text".to_string())
            })?;

        let finish_reason = choice
            .get("finish_reason")
            .and_then(|fr| fr.as_str())
            .map(|fr| match fr {
                "stop" => FinishReason::Stop,
                "length" => FinishReason::Length,
                "content_filter" => FinishReason::ContentFilter,
                _ => FinishReason::Error(fr.to_string()),
            })
            .unwrap_or(FinishReason::Stop);

        let usage = response_json.get("usage").map(|u| Usage {
            prompt_tokens: u
                .get("prompt_tokens")
                .and_then(|pt| pt.as_u64())
                .unwrap_or(0) as u32,
            completion_tokens: u
                .get("completion_tokens")
                .and_then(|ct| ct.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: u
                .get("total_tokens")
                .and_then(|tt| tt.as_u64())
                .unwrap_or(0) as u32,
        });

        let model = response_json
            .get("model")
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string();

        Ok(LLMResponse {
            content,
            model,
            usage,
            finish_reason,
        })
    }

    /// Map a non-success HTTP status onto the error taxonomy, keeping the
    /// provider's own message when the body carries one
    fn classify_failure(status: StatusCode, body: &str) -> LLMError {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.pointer("/error/message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LLMError::Authentication(message),
            StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimit,
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                LLMError::InvalidRequest(message)
            }
            _ => LLMError::Provider(message),
        }
    }
}

impl Default for DeepSeekProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        "deepseek"
    }

    async fn generate(
        &self,
        request: LLMRequest,
        credential: &Credential,
    ) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let openai_request = self.convert_to_openai_format(&request);

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(credential.expose())
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_failure(status, &error_text));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            LLMError::MalformedResponse(format!("Failed to parse response: {e}"))
        })?;

        Self::parse_openai_response(response_json)
    }

    fn supported_models(&self) -> Vec<String> {
        models::deepseek::SUPPORTED_MODELS
            .iter()
            .map(|m| m.to_string())
            .collect()
    }
}
