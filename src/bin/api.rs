//! Health Saarthi API Server
//!
//! Run with: cargo run --bin health-saarthi-api
//!
//! # Configuration
//!
//! Read from `--config <path>`, or the first of
//! `~/.config/health-saarthi/config.toml`, `/etc/health-saarthi/config.toml`,
//! `./config.toml`. Environment variables override the file:
//! - `HEALTH_SAARTHI_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `HEALTH_SAARTHI_API_PORT`: Port to listen on (default: 8090)
//! - `GEMINI_API_KEY`: Enables the chat and the planner
//! - `HEALTH_SAARTHI_MODEL`: Model name
//! - `RUST_LOG`: Log filter (overrides `[logging] level`)

use anyhow::Context;
use clap::Parser;
use health_saarthi::ai::AiHandle;
use health_saarthi::api::{serve, AppState};
use health_saarthi::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "health-saarthi-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Health Saarthi REST API server")]
struct Args {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::resolve(args.config.as_deref()).context("loading configuration")?;

    health_saarthi::logging::init(&config.logging).context("initializing logging")?;

    tracing::info!("Starting Health Saarthi API server v{}", env!("CARGO_PKG_VERSION"));

    let ai = AiHandle::from_gemini_config(config.ai.gemini())
        .context("building the text-generation client")?;
    if !ai.is_configured() {
        tracing::warn!("Set GEMINI_API_KEY to enable the chat and the wellness planner");
    }

    let state = AppState::new(ai, config.api.clone()).with_chat_search(config.ai.chat_search);

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Health Saarthi API server stopped");
    Ok(())
}
