//! Embeddings — pluggable, trait-based text embedder for semantic matching.
//!
//! Default with an API key: `OpenAiEmbedder`. Without one: `DisabledEmbedder`,
//! which makes every semantic bonus zero.
//!
//! `AppState` holds an `Arc<dyn EmbeddingProvider>`, chosen at startup via config.

use async_trait::async_trait;
use tracing::warn;

use crate::llm_client::{LlmClient, LlmError};

/// Characters of text sent for embedding. Longer input is cut.
const EMBED_MAX_CHARS: usize = 8_000;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds one text. Errors are provider failures; callers decide whether to tolerate them.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;

    /// Model identifier stored next to every persisted vector. `None` when disabled.
    fn model(&self) -> Option<&str>;
}

// ────────────────────────────────────────────────────────────────────────────
// Implementations
// ────────────────────────────────────────────────────────────────────────────

pub struct OpenAiEmbedder {
    client: LlmClient,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(client: LlmClient, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let text = crate::llm_client::prompts::truncate_for_prompt(text, EMBED_MAX_CHARS);
        self.client.embed(&self.model, text).await
    }

    fn model(&self) -> Option<&str> {
        Some(&self.model)
    }
}

/// Used when no provider key is configured.
pub struct DisabledEmbedder;

#[async_trait]
impl EmbeddingProvider for DisabledEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        Err(LlmError::EmptyContent)
    }

    fn model(&self) -> Option<&str> {
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Embeds `text`, turning any failure into `None`. A missing embedding only
/// removes the semantic bonus, so it never fails a request.
/// Returns the vector together with the model that produced it.
pub async fn embed_or_skip(
    embedder: &dyn EmbeddingProvider,
    text: &str,
) -> Option<(Vec<f32>, String)> {
    let model = embedder.model()?.to_string();
    if text.trim().is_empty() {
        return None;
    }
    match embedder.embed(text).await {
        Ok(vector) if vector.iter().all(|v| v.is_finite()) && !vector.is_empty() => {
            Some((vector, model))
        }
        Ok(_) => {
            warn!("Embedding model {model} returned an unusable vector, skipping");
            None
        }
        Err(e) => {
            warn!("Embedding failed, continuing without semantic bonus: {e}");
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{FailingEmbedder, FixedEmbedder};
    use super::*;

    #[tokio::test]
    async fn test_embed_or_skip_returns_vector_and_model() {
        let embedder = FixedEmbedder(vec![0.1, 0.2, 0.3]);
        let (vector, model) = embed_or_skip(&embedder, "python developer").await.unwrap();
        assert_eq!(vector, vec![0.1, 0.2, 0.3]);
        assert_eq!(model, "fixed-test-model");
    }

    #[tokio::test]
    async fn test_embed_or_skip_tolerates_provider_failure() {
        assert!(embed_or_skip(&FailingEmbedder, "python developer").await.is_none());
    }

    #[tokio::test]
    async fn test_embed_or_skip_disabled_embedder() {
        assert!(embed_or_skip(&DisabledEmbedder, "python developer").await.is_none());
    }

    #[tokio::test]
    async fn test_embed_or_skip_rejects_non_finite_vectors() {
        let embedder = FixedEmbedder(vec![0.1, f32::NAN]);
        assert!(embed_or_skip(&embedder, "text").await.is_none());
    }

    #[tokio::test]
    async fn test_embed_or_skip_ignores_blank_text() {
        let embedder = FixedEmbedder(vec![1.0]);
        assert!(embed_or_skip(&embedder, "   ").await.is_none());
    }
}
