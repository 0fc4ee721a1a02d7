use std::sync::Arc;

use sqlx::PgPool;
use ats_api::ranking::RankingEngine;

use crate::config::Config;
use crate::embeddings::EmbeddingProvider;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// `None` without an API key: extraction falls back to heuristics.
    pub llm: Option<LlmClient>,
    /// Pluggable embedder. `DisabledEmbedder` when no provider is configured.
    pub embedder: Arc<dyn EmbeddingProvider>,
    /// Built and validated once at startup.
    pub engine: Arc<RankingEngine>,
    pub config: Config,
}
