//! Router, shared state and listener

mod error;
mod routes;

pub use error::ApiError;
pub use routes::{DirectPayload, EnvCheckResponse, SummarizePayload, TextResponse};

use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use blogforge_core::BlogPipeline;
use std::sync::Arc;
use std::time::Instant;

/// Shared across handlers; the pipeline itself holds no per-run state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<BlogPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<BlogPipeline>) -> Self {
        Self { pipeline }
    }
}

pub fn router(pipeline: Arc<BlogPipeline>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/api/env-check", get(routes::env_check))
        .route("/api/blog", post(routes::generate_blog))
        .route("/api/summarize", post(routes::summarize))
        .route("/api/deepseek", post(routes::direct))
        .with_state(AppState::new(pipeline))
        .layer(middleware::from_fn(log_requests))
}

/// Bind and serve until the process is stopped
pub async fn serve(app: Router, bind_address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!(address = %bind_address, "blogforge listening");

    axum::serve(listener, app)
        .await
        .context("HTTP server terminated")?;
    Ok(())
}

async fn log_requests(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    response
}
