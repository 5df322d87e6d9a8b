//! Evidence retrieval for docreply.
//!
//! Loads a folder of documents (PDF, plain text, markdown), chunks page
//! text, embeds the chunks, and serves scored, attributed passages from a
//! build-once in-memory similarity index.

pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod loader;
pub mod store;
pub mod types;

pub use embeddings::{EmbeddingProvider, TrigramProvider};
pub use loader::count_supported_files;
pub use store::{EvidenceStore, StoreStats};
pub use types::{Document, Page, Passage};
