mod candidates;
mod config;
mod db;
mod embeddings;
mod errors;
mod extraction;
mod jobs;
mod llm_client;
mod models;
mod rankings;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ats_api::ranking::RankingEngine;

use crate::config::Config;
use crate::db::create_pool;
use crate::embeddings::{DisabledEmbedder, EmbeddingProvider, OpenAiEmbedder};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Validate weights and scoring constants before anything else starts
    let engine = RankingEngine::new(config.ranking).context("invalid ranking configuration")?;
    let weights = engine.config().weights;
    info!(
        "Ranking engine ready: skills={} experience={} domain={} education={} bonus_cap={}",
        weights.skills,
        weights.experience,
        weights.domain,
        weights.education,
        engine.config().semantic_bonus_cap
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client and embedder (optional)
    let llm = match &config.openai_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                &config.openai_base_url,
                config.openai_model.clone(),
            )
            .context("failed to build LLM HTTP client")?;
            info!("LLM client initialized (model: {})", client.model());
            Some(client)
        }
        None => {
            warn!("OPENAI_API_KEY not set: using heuristic extraction and no semantic bonus");
            None
        }
    };

    let embedder: Arc<dyn EmbeddingProvider> = match &llm {
        Some(client) => Arc::new(OpenAiEmbedder::new(
            client.clone(),
            config.openai_embedding_model.clone(),
        )),
        None => Arc::new(DisabledEmbedder),
    };

    // Build app state
    let state = AppState {
        db,
        llm,
        embedder,
        engine: Arc::new(engine),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the recruiter UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
