//! In-memory similarity index.
//!
//! Holds normalized chunk embeddings alongside their attribution and ranks
//! query results by cosine similarity. Ordering is deterministic: ties are
//! broken by original document, page, and chunk ingestion order.

use crate::types::Passage;

/// One indexed chunk with its attribution and ingestion position.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// Chunk text
    pub text: String,

    /// Normalized embedding vector
    pub embedding: Vec<f32>,

    /// Source document name
    pub document: String,

    /// Source page label
    pub page: String,

    /// Ingestion order (document, page, chunk), used for tie-breaking
    pub ordinal: (usize, usize, usize),
}

/// Immutable in-memory cosine similarity index.
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    entries: Vec<IndexEntry>,
}

impl InMemoryIndex {
    /// Build an index from prepared entries.
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Search for the top-k most similar chunks to the query embedding.
    ///
    /// Returns passages ordered by descending score; equal scores keep the
    /// original document/page/chunk order.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Vec<Passage> {
        let mut scored: Vec<(&IndexEntry, f32)> = self
            .entries
            .iter()
            .map(|entry| (entry, dot(&entry.embedding, query_embedding)))
            .collect();

        scored.sort_by(|(a, score_a), (b, score_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.ordinal.cmp(&b.ordinal))
        });

        scored
            .into_iter()
            .take(top_k)
            .map(|(entry, score)| Passage {
                text: entry.text.clone(),
                score,
                document: entry.document.clone(),
                page: entry.page.clone(),
            })
            .collect()
    }
}

/// Dot product; cosine similarity for unit vectors.
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
