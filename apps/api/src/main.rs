mod analysis;
mod config;
mod document;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::document::RecursiveCharacterSplitter;
use crate::jobs::driver::WebDriverLauncher;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (API keys arrive per request)
    let llm = LlmClient::new(config.cohere_api_url.clone()).context("Failed to build HTTP client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Browser sessions are opened per search against this WebDriver server
    let browser = WebDriverLauncher::new(config.webdriver_url.clone());
    info!("Browser backend: WebDriver at {}", config.webdriver_url);

    let splitter = RecursiveCharacterSplitter::new(config.chunk_size, config.chunk_overlap)?;
    info!(
        "Chunking: {} chars with {} overlap",
        splitter.chunk_size(),
        splitter.chunk_overlap()
    );

    let state = AppState {
        llm: Arc::new(llm),
        browser: Arc::new(browser),
        splitter,
        scraper: config.scraper_settings(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("HOST and PORT must form a valid socket address")?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
