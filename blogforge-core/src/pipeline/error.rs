use super::state::Stage;
use crate::llm::LLMError;

/// Failures surfaced by the blog and summary pipelines
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("DeepSeek API key is missing. Please set the {env_var} environment variable.")]
    MissingCredential { env_var: String },

    #[error("{stage} stage failed: {source}")]
    Provider {
        stage: Stage,
        #[source]
        source: LLMError,
    },

    #[error("{0}")]
    InvalidInput(String),

    #[error("{stage} stage was cancelled")]
    Cancelled { stage: Stage },
}

impl GenerationError {
    /// HTTP-like status: 400 for caller mistakes, 500 for everything upstream
    pub fn status_code(&self) -> u16 {
        match self {
            GenerationError::MissingCredential { .. } | GenerationError::InvalidInput(_) => 400,
            GenerationError::Provider { .. } | GenerationError::Cancelled { .. } => 500,
        }
    }

    /// Stage the run was in when it failed, if it got that far
    pub fn stage(&self) -> Option<Stage> {
        match self {
            GenerationError::Provider { stage, .. } | GenerationError::Cancelled { stage } => {
                Some(*stage)
            }
            _ => None,
        }
    }

    /// Underlying provider error, if any
    pub fn provider_error(&self) -> Option<&LLMError> {
        match self {
            GenerationError::Provider { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_messages_are_human_readable() {
        let err = GenerationError::MissingCredential {
            env_var: "DEEPSEEK_API_KEY".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "DeepSeek API key is missing. Please set the DEEPSEEK_API_KEY environment variable."
        );

        let err = GenerationError::Provider {
            stage: Stage::Draft,
            source: LLMError::Provider("HTTP 503: overloaded".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "draft stage failed: Provider error: HTTP 503: overloaded"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(GenerationError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(
            GenerationError::MissingCredential { env_var: "K".into() }.status_code(),
            400
        );
        let timeout = GenerationError::Provider {
            stage: Stage::Enhancement,
            source: LLMError::Timeout(Duration::from_secs(5)),
        };
        assert_eq!(timeout.status_code(), 500);
        assert_eq!(timeout.stage(), Some(Stage::Enhancement));
        assert!(timeout.provider_error().is_some());
    }
}
