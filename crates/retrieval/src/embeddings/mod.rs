//! Embedding providers for the evidence store.

mod provider;
mod trigram;

pub use provider::EmbeddingProvider;
pub use trigram::{TrigramProvider, DEFAULT_DIMENSIONS};
