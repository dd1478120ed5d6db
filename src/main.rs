use anyhow::{Context, Result};
use blogforge::{router, serve};
use blogforge_core::{BlogPipeline, ConfigManager, load_dotenv};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "blogforge",
    version,
    about = "Prompt-chained blog generation service (outline, draft, SEO pass)"
)]
struct Cli {
    /// Config file; defaults to blogforge.toml or .blogforge/blogforge.toml in the current directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overrides [server].bind_address
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env first so RUST_LOG and the API key can come from it
    load_dotenv();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Cli::parse();

    let manager = match &args.config {
        Some(path) => ConfigManager::load_from_file(path)?,
        None => ConfigManager::load()?,
    };
    match manager.config_path() {
        Some(path) => tracing::info!(path = %path.display(), "loaded configuration"),
        None => tracing::info!("no config file found, using defaults"),
    }
    let config = manager.into_config();

    let pipeline = BlogPipeline::from_config(&config).context("Failed to create LLM provider")?;
    if !pipeline.has_credential() {
        tracing::warn!(
            env_var = %pipeline.credential_env_var(),
            "no API key configured; generation requests will be rejected"
        );
    }

    let bind_address = args.bind.unwrap_or(config.server.bind_address);
    serve(router(Arc::new(pipeline)), &bind_address).await
}
