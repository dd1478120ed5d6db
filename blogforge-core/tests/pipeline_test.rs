//! End-to-end pipeline behaviour against a recording stub provider

use async_trait::async_trait;
use blogforge_core::llm::provider::{FinishReason, Usage};
use blogforge_core::{
    BlogPipeline, Credential, GenerationError, GenerationRequest, Keywords, LLMError, LLMProvider,
    LLMRequest, LLMResponse, PipelineSettings, PipelineState, RunHooks, Stage, StaticCredential,
    Tone,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

type Responder = Box<dyn Fn(usize, &LLMRequest) -> Result<String, LLMError> + Send + Sync>;

struct StubProvider {
    calls: Mutex<Vec<LLMRequest>>,
    respond: Responder,
    delay: Option<Duration>,
}

impl StubProvider {
    fn new(
        respond: impl Fn(usize, &LLMRequest) -> Result<String, LLMError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
            delay: None,
        })
    }

    fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(|_, _| Ok("late".to_string())),
            delay: Some(delay),
        })
    }

    /// Replies "response N" to the Nth call (1-based)
    fn numbered() -> Arc<Self> {
        Self::new(|n, _| Ok(format!("response {n}")))
    }

    fn calls(&self) -> Vec<LLMRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(
        &self,
        request: LLMRequest,
        credential: &Credential,
    ) -> Result<LLMResponse, LLMError> {
        assert_eq!(credential.expose(), "test-key");
        let n = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request.clone());
            calls.len()
        };
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let content = (self.respond)(n, &request)?;
        Ok(LLMResponse {
            content,
            model: request.model,
            usage: Some(Usage {
                prompt_tokens: 1,
                completion_tokens: 1,
                total_tokens: 2,
            }),
            finish_reason: FinishReason::Stop,
        })
    }

    fn supported_models(&self) -> Vec<String> {
        vec!["deepseek-chat".to_string()]
    }
}

fn pipeline_with(provider: Arc<StubProvider>) -> BlogPipeline {
    BlogPipeline::new(provider, Arc::new(StaticCredential::new("test-key")))
}

fn remote_work_request() -> GenerationRequest {
    GenerationRequest::builder("Remote Work Tips", "business", Tone::Professional)
        .audience("")
        .keywords(Keywords::parse("remote,productivity"))
        .target_length(800)
        .build()
        .unwrap()
}

fn recorder() -> (Arc<Mutex<Vec<PipelineState>>>, RunHooks<'static>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let hooks = RunHooks::new().on_transition(move |state| sink.lock().unwrap().push(state));
    (seen, hooks)
}

#[tokio::test]
async fn test_blog_runs_three_stages_in_order() {
    let provider = StubProvider::numbered();
    let pipeline = pipeline_with(provider.clone());

    let result = pipeline.generate_blog(&remote_work_request()).await.unwrap();
    assert_eq!(result, "response 3");

    let calls = provider.calls();
    assert_eq!(calls.len(), 3);

    let outline_prompt = &calls[0].prompt;
    for expected in ["Remote Work Tips", "business", "professional", "remote, productivity"] {
        assert!(outline_prompt.contains(expected), "outline prompt missing {expected:?}");
    }
    assert!(calls[1].prompt.contains("response 1"));
    assert!(calls[2].prompt.contains("response 2"));
    assert!(!calls[2].prompt.contains("response 1"));

    let temperatures: Vec<f32> = calls.iter().map(|c| c.temperature).collect();
    assert_eq!(temperatures, vec![0.7, 0.8, 0.6]);
    assert!(calls.iter().all(|c| c.model == "deepseek-chat"));
}

#[tokio::test]
async fn test_final_text_is_returned_unchanged() {
    let final_markdown = "# Remote Work Tips\n\n  Trailing spaces and [kept] brackets  \n";
    let provider = StubProvider::new(move |n, _| {
        Ok(if n == 3 {
            final_markdown.to_string()
        } else {
            format!("stage {n}")
        })
    });
    let pipeline = pipeline_with(provider);

    let result = pipeline.generate_blog(&remote_work_request()).await.unwrap();
    assert_eq!(result, final_markdown);
}

#[tokio::test]
async fn test_draft_failure_skips_enhancement() {
    let provider = StubProvider::new(|n, _| match n {
        2 => Err(LLMError::Provider("HTTP 503: overloaded".to_string())),
        _ => Ok(format!("response {n}")),
    });
    let pipeline = pipeline_with(provider.clone());
    let (seen, hooks) = recorder();

    let err = pipeline
        .generate_blog_with(&remote_work_request(), hooks)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GenerationError::Provider {
            stage: Stage::Draft,
            source: LLMError::Provider("HTTP 503: overloaded".to_string()),
        }
    );
    assert_eq!(provider.calls().len(), 2);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            PipelineState::Outlining,
            PipelineState::Drafting,
            PipelineState::Failed
        ]
    );
}

#[tokio::test]
async fn test_successful_run_walks_every_state() {
    let pipeline = pipeline_with(StubProvider::numbered());
    let (seen, hooks) = recorder();

    pipeline
        .generate_blog_with(&remote_work_request(), hooks)
        .await
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            PipelineState::Outlining,
            PipelineState::Drafting,
            PipelineState::Enhancing,
            PipelineState::Done
        ]
    );
}

#[tokio::test]
async fn test_missing_credential_short_circuits() {
    let provider = StubProvider::numbered();
    let pipeline = BlogPipeline::new(provider.clone(), Arc::new(StaticCredential::absent()));

    let err = pipeline.generate_blog(&remote_work_request()).await.unwrap_err();
    assert!(matches!(err, GenerationError::MissingCredential { .. }));
    assert!(err.to_string().contains("DEEPSEEK_API_KEY"));

    let err = pipeline.summarize_blog("Some long article text...").await.unwrap_err();
    assert!(matches!(err, GenerationError::MissingCredential { .. }));

    let err = pipeline.generate_direct("Hello", None, None).await.unwrap_err();
    assert!(matches!(err, GenerationError::MissingCredential { .. }));

    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_summarize_makes_one_call() {
    let provider = StubProvider::new(|_, _| Ok("A short summary.".to_string()));
    let pipeline = pipeline_with(provider.clone());
    let (seen, hooks) = recorder();

    let summary = pipeline
        .summarize_blog_with("Some long article text...", hooks)
        .await
        .unwrap();
    assert_eq!(summary, "A short summary.");

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].prompt.contains("Some long article text..."));
    assert!(calls[0].prompt.contains("150-200 words"));
    assert_eq!(calls[0].temperature, 0.5);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![PipelineState::Summarizing, PipelineState::Done]
    );
}

#[tokio::test(start_paused = true)]
async fn test_timeout_counts_as_provider_failure() {
    let provider = StubProvider::slow(Duration::from_secs(30));
    let settings = PipelineSettings {
        request_timeout: Some(Duration::from_secs(5)),
        ..Default::default()
    };
    let pipeline = pipeline_with(provider.clone()).with_settings(settings);

    let err = pipeline.generate_blog(&remote_work_request()).await.unwrap_err();
    assert_eq!(
        err,
        GenerationError::Provider {
            stage: Stage::Outline,
            source: LLMError::Timeout(Duration::from_secs(5)),
        }
    );
    assert_eq!(err.status_code(), 500);
    assert_eq!(provider.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_aborts_in_flight_call() {
    let provider = StubProvider::slow(Duration::from_secs(60));
    let settings = PipelineSettings {
        request_timeout: None,
        ..Default::default()
    };
    let pipeline = pipeline_with(provider.clone()).with_settings(settings);

    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        tx.send(true).ok();
    });

    let (seen, hooks) = recorder();
    let err = pipeline
        .generate_blog_with(&remote_work_request(), hooks.cancel_on(rx))
        .await
        .unwrap_err();

    assert_eq!(err, GenerationError::Cancelled { stage: Stage::Outline });
    assert_eq!(provider.calls().len(), 1);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![PipelineState::Outlining, PipelineState::Failed]
    );
}

#[tokio::test]
async fn test_already_cancelled_run_makes_no_calls() {
    let provider = StubProvider::numbered();
    let pipeline = pipeline_with(provider.clone());
    let (_tx, rx) = watch::channel(true);

    let err = pipeline
        .generate_blog_with(&remote_work_request(), RunHooks::new().cancel_on(rx))
        .await
        .unwrap_err();

    assert_eq!(err, GenerationError::Cancelled { stage: Stage::Outline });
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_concurrent_runs_stay_independent() {
    // Echoing the prompt makes every stage's output carry the whole chain.
    let provider = StubProvider::new(|_, request| Ok(request.prompt.clone()));
    let pipeline = Arc::new(pipeline_with(provider.clone()));

    let travel = GenerationRequest::builder("Hidden Beaches of Crete", "travel", Tone::Inspirational)
        .build()
        .unwrap();
    let finance = GenerationRequest::builder("Index Funds 101", "finance", Tone::Educational)
        .build()
        .unwrap();

    let (a, b) = tokio::join!(
        pipeline.generate_blog(&travel),
        pipeline.generate_blog(&finance)
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(a.contains("Hidden Beaches of Crete") && !a.contains("Index Funds 101"));
    assert!(b.contains("Index Funds 101") && !b.contains("Hidden Beaches of Crete"));
    assert_eq!(provider.calls().len(), 6);
}

#[tokio::test]
async fn test_direct_route_prompt_passes_through() {
    let provider = StubProvider::new(|_, request| Ok(format!("len={}", request.prompt.len())));
    let pipeline = pipeline_with(provider.clone());

    let text = pipeline
        .generate_direct("Write one line about tea", Some("deepseek-reasoner"), Some(0.3))
        .await
        .unwrap();

    assert_eq!(text, "len=24");
    let calls = provider.calls();
    assert_eq!(calls[0].model, "deepseek-reasoner");
    assert_eq!(calls[0].temperature, 0.3);
}
