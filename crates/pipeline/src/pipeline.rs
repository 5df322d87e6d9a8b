//! Pipeline orchestration.
//!
//! Drives the end-to-end flow for one email: gate on the document folder,
//! extract questions, early-exit on the sentinel, build the evidence
//! store once, answer each question independently, and assemble the
//! report in extraction order.
//!
//! Ingestion and extraction failures abort the run; retrieval and
//! composition failures degrade only the question that raised them.

use crate::composer::AnswerComposer;
use crate::extractor::QuestionExtractor;
use crate::filter::filter_passages;
use crate::report::Report;
use docreply_core::{AppError, AppResult};
use docreply_llm::{LlmClient, RetryPolicy};
use docreply_retrieval::{count_supported_files, EmbeddingProvider, EvidenceStore};
use std::path::Path;
use std::sync::Arc;

/// Tunables for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Passages retrieved per question
    pub top_k: usize,

    /// Minimum score (exclusive) for evidence to be kept
    pub relevance_threshold: f32,

    /// Sender name for the report greeting, when known
    pub sender_name: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_k: docreply_core::config::DEFAULT_TOP_K,
            relevance_threshold: docreply_core::config::DEFAULT_RELEVANCE_THRESHOLD,
            sender_name: None,
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The email contained no questions; nothing to deliver.
    NoQuestions,

    /// The completed report, ready for delivery.
    Completed(Report),
}

/// The email answering pipeline.
pub struct Pipeline {
    extractor: QuestionExtractor,
    composer: AnswerComposer,
    embedder: Arc<dyn EmbeddingProvider>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline with the default retry policy.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        embedder: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        options: PipelineOptions,
    ) -> Self {
        Self::with_retry_policy(llm, embedder, model, options, RetryPolicy::default())
    }

    /// Create a pipeline with an explicit retry policy for model calls.
    pub fn with_retry_policy(
        llm: Arc<dyn LlmClient>,
        embedder: Arc<dyn EmbeddingProvider>,
        model: impl Into<String>,
        options: PipelineOptions,
        retry: RetryPolicy,
    ) -> Self {
        let model = model.into();
        Self {
            extractor: QuestionExtractor::new(llm.clone(), model.clone(), retry.clone()),
            composer: AnswerComposer::new(llm, model, retry),
            embedder,
            options,
        }
    }

    /// Run the pipeline for one email body against a document folder.
    ///
    /// Returns [`PipelineOutcome::NoQuestions`] on the extraction
    /// sentinel; the caller should skip delivery in that case. The folder
    /// gate runs before the extraction call so no model tokens are spent
    /// on an email without usable attachments.
    pub async fn run(&self, email_body: &str, documents: &Path) -> AppResult<PipelineOutcome> {
        let available = count_supported_files(documents)?;
        if available == 0 {
            return Err(AppError::Ingestion(format!(
                "No documents in folder: {}",
                documents.display()
            )));
        }

        let questions = self.extractor.extract(email_body).await?;
        if questions.is_empty() {
            tracing::info!("Email body contained no questions, stopping");
            return Ok(PipelineOutcome::NoQuestions);
        }

        // Built once, queried read-only by every question task.
        let store = EvidenceStore::build(documents, self.embedder.clone()).await?;

        // Questions are independent once the store exists; run them
        // concurrently and re-join in extraction order.
        let tasks = questions
            .iter()
            .map(|question| self.answer_question(&store, question));
        let records = futures::future::join_all(tasks).await;

        let mut report = Report::new(self.options.sender_name.as_deref());
        for record in records {
            report.push(record);
        }

        tracing::info!("Pipeline completed with {} record(s)", report.records.len());
        Ok(PipelineOutcome::Completed(report))
    }

    /// Answer one question: query, filter, compose.
    ///
    /// Never fails; retrieval or composition errors yield the degraded
    /// record so one bad question cannot sink the whole reply.
    async fn answer_question(
        &self,
        store: &EvidenceStore,
        question: &str,
    ) -> crate::report::AnswerRecord {
        let passages = match store.query(question, self.options.top_k).await {
            Ok(passages) => passages,
            Err(e) => {
                tracing::error!("Retrieval failed for question '{}': {}", question, e);
                return AnswerComposer::degraded_record(question);
            }
        };

        let outcome = filter_passages(passages, self.options.relevance_threshold);

        match self.composer.compose(question, outcome.kept).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!("Composition failed for question '{}': {}", question, e);
                AnswerComposer::degraded_record(question)
            }
        }
    }
}
