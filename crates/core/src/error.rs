//! Error types for the docreply pipeline.
//!
//! This module defines a unified error enum covering every failure stage of
//! the email answering run: document ingestion, question extraction,
//! evidence retrieval, answer composition, and report delivery, plus the
//! ambient configuration, I/O, and LLM transport errors.

use thiserror::Error;

/// Unified error type for the docreply pipeline.
///
/// All functions in the workspace return `Result<T, AppError>`.
/// We never panic; errors must be represented and propagated.
///
/// Ingestion and extraction errors are fatal for a pipeline run; retrieval
/// and composition errors are isolated to the question that raised them;
/// delivery errors are recovered by falling back to a local surface.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider transport errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Document folder empty or unreadable (fatal, pre-extraction)
    #[error("Ingestion error: {0}")]
    Ingestion(String),

    /// Question extraction model call failed (fatal)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Evidence store query failed (per-question)
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Answer model call failed (per-question)
    #[error("Composition error: {0}")]
    Composition(String),

    /// Report could not be sent on the requested channel
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl AppError {
    /// Whether this error aborts the whole pipeline run.
    ///
    /// Per-question errors (retrieval, composition) degrade a single
    /// answer record instead; delivery errors are recovered by the caller.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            AppError::Retrieval(_) | AppError::Composition(_) | AppError::Delivery(_)
        )
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
