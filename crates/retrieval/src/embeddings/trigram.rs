//! Character-trigram embedding provider.
//!
//! Deterministic, offline embeddings built from character trigrams and
//! word frequencies. Not semantically accurate like a neural model, but
//! consistent and content-dependent, which is what local runs and the
//! test suite need.

use crate::embeddings::provider::EmbeddingProvider;
use docreply_core::AppResult;
use std::collections::{HashMap, HashSet};

/// Default embedding dimensionality.
pub const DEFAULT_DIMENSIONS: usize = 384;

/// Trigram-based embedding provider.
#[derive(Debug)]
pub struct TrigramProvider {
    dimensions: usize,
}

impl TrigramProvider {
    /// Create a provider with the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        let stop_words: HashSet<&str> = [
            "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to",
            "of", "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have",
            "has", "had", "it", "its", "their", "they", "them",
        ]
        .into_iter()
        .collect();

        let lower = text.to_lowercase();
        let mut word_freq: HashMap<&str, u32> = HashMap::new();
        for word in lower
            .split_whitespace()
            .filter(|w| w.len() > 2 && !stop_words.contains(w))
        {
            *word_freq.entry(word).or_insert(0) += 1;
        }

        for (word, freq) in &word_freq {
            let chars: Vec<char> = word.chars().collect();

            // Spread each word over several dimensions via its trigrams
            for window in chars.windows(3) {
                let hash = window
                    .iter()
                    .flat_map(|c| {
                        let mut buf = [0u8; 4];
                        c.encode_utf8(&mut buf).as_bytes().to_vec()
                    })
                    .fold(0u64, |acc, b| acc.wrapping_mul(37).wrapping_add(b as u64));

                let dim = (hash as usize) % self.dimensions;
                embedding[dim] += (*freq as f32).sqrt();
            }

            // Whole-word signal
            let word_hash = word
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
            embedding[(word_hash as usize) % self.dimensions] += *freq as f32;
        }

        // Normalize to unit length so cosine similarity reduces to a dot
        // product in the index.
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

impl Default for TrigramProvider {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dimensions_and_name() {
        let provider = TrigramProvider::default();
        assert_eq!(provider.dimensions(), DEFAULT_DIMENSIONS);
        assert_eq!(provider.provider_name(), "trigram");
    }

    #[tokio::test]
    async fn test_embeddings_are_unit_vectors() {
        let provider = TrigramProvider::new(128);
        let embedding = provider.embed("quarterly revenue report").await.unwrap();

        assert_eq!(embedding.len(), 128);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let provider = TrigramProvider::new(128);
        let a = provider.embed("deterministic input").await.unwrap();
        let b = provider.embed("deterministic input").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_different_texts_differ() {
        let provider = TrigramProvider::new(128);
        let a = provider.embed("annual revenue figures").await.unwrap();
        let b = provider.embed("employee onboarding guide").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = TrigramProvider::new(128);
        let embedding = provider.embed("").await.unwrap();
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_related_text_scores_higher() {
        let provider = TrigramProvider::new(384);
        let query = provider.embed("what was the revenue").await.unwrap();
        let related = provider
            .embed("the revenue reported was five million dollars")
            .await
            .unwrap();
        let unrelated = provider
            .embed("kitchen cleaning schedule rotation")
            .await
            .unwrap();

        let dot = |a: &[f32], b: &[f32]| -> f32 { a.iter().zip(b).map(|(x, y)| x * y).sum() };
        assert!(dot(&query, &related) > dot(&query, &unrelated));
    }
}
