//! The evidence store: a build-once, query-many similarity index over a
//! document folder.
//!
//! Built once at pipeline start and never mutated afterwards; queries are
//! read-only and safe to run concurrently.

use crate::chunker::{chunk_text, DEFAULT_MAX_CHUNK_BYTES};
use crate::embeddings::EmbeddingProvider;
use crate::index::{InMemoryIndex, IndexEntry};
use crate::loader::load_corpus;
use crate::types::Passage;
use docreply_core::{AppError, AppResult};
use std::path::Path;
use std::sync::Arc;

/// Corpus statistics collected during the build.
#[derive(Debug, Clone, Copy)]
pub struct StoreStats {
    pub documents: usize,
    pub pages: usize,
    pub passages: usize,
}

/// Read-only similarity index over a document corpus.
pub struct EvidenceStore {
    index: InMemoryIndex,
    embedder: Arc<dyn EmbeddingProvider>,
    stats: StoreStats,
}

impl EvidenceStore {
    /// Build a store from every supported document in `folder`.
    ///
    /// Fails with an ingestion error when the folder is missing,
    /// unreadable, or yields zero indexable chunks.
    pub async fn build(
        folder: &Path,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> AppResult<Self> {
        tracing::info!("Building evidence store from {}", folder.display());

        let documents = load_corpus(folder)?;
        let page_count: usize = documents.iter().map(|d| d.pages.len()).sum();

        let mut texts = Vec::new();
        let mut attributions = Vec::new();
        for (doc_ord, document) in documents.iter().enumerate() {
            for (page_ord, page) in document.pages.iter().enumerate() {
                for (chunk_ord, chunk) in
                    chunk_text(&page.text, DEFAULT_MAX_CHUNK_BYTES).into_iter().enumerate()
                {
                    texts.push(chunk);
                    attributions.push((
                        document.name.clone(),
                        page.label.clone(),
                        (doc_ord, page_ord, chunk_ord),
                    ));
                }
            }
        }

        if texts.is_empty() {
            return Err(AppError::Ingestion(format!(
                "Documents in {} contained no indexable text",
                folder.display()
            )));
        }

        let embeddings = embedder.embed_batch(&texts).await?;

        let entries: Vec<IndexEntry> = texts
            .into_iter()
            .zip(embeddings)
            .zip(attributions)
            .map(|((text, embedding), (document, page, ordinal))| IndexEntry {
                text,
                embedding,
                document,
                page,
                ordinal,
            })
            .collect();

        let stats = StoreStats {
            documents: documents.len(),
            pages: page_count,
            passages: entries.len(),
        };

        tracing::info!(
            "Indexed {} passages from {} documents ({} pages)",
            stats.passages,
            stats.documents,
            stats.pages
        );

        Ok(Self {
            index: InMemoryIndex::new(entries),
            embedder,
            stats,
        })
    }

    /// Query the store for up to `top_k` passages relevant to `question`.
    ///
    /// Passages come back in descending score order with deterministic
    /// tie-breaking; scores are comparable across calls on one store.
    pub async fn query(&self, question: &str, top_k: usize) -> AppResult<Vec<Passage>> {
        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| AppError::Retrieval(format!("Failed to embed query: {}", e)))?;

        let passages = self.index.search(&query_embedding, top_k);

        tracing::debug!(
            "Query returned {} passages (top score: {:.3})",
            passages.len(),
            passages.first().map(|p| p.score).unwrap_or(0.0)
        );

        Ok(passages)
    }

    /// Corpus statistics from the build.
    pub fn stats(&self) -> StoreStats {
        self.stats
    }
}
