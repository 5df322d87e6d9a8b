//! Embedding provider abstraction.
//!
//! The similarity algorithm is delegated behind this trait; the store only
//! requires that scores computed from these vectors are comparable within
//! one index instance.

use docreply_core::AppResult;

/// Trait for text embedding backends.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the provider name (e.g., "trigram").
    fn provider_name(&self) -> &str;

    /// Dimensionality of produced vectors.
    fn dimensions(&self) -> usize;

    /// Embed a batch of texts. Output order matches input order.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        Ok(embeddings.pop().unwrap_or_default())
    }
}
