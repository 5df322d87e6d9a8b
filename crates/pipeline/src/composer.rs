//! Grounded answer composition.
//!
//! Builds a grounding prompt from a question and its kept evidence and
//! asks the LLM for an answer constrained to that evidence. When no
//! evidence survived filtering, the fixed fallback answer is returned
//! without any model call: the model is never allowed to answer
//! ungrounded, and the call cost is saved.

use crate::prompts::{grounding_prompt, COMPOSITION_SYSTEM_PROMPT};
use crate::report::AnswerRecord;
use docreply_core::{AppError, AppResult};
use docreply_llm::{CompletionRequest, LlmClient, RetryPolicy};
use docreply_retrieval::Passage;
use std::sync::Arc;

/// Fixed answer used when no evidence passed the relevance filter.
pub const NO_EVIDENCE_ANSWER: &str = "Didn't find anything relevant to answer this question.";

/// Answer used for a record whose composition call failed.
pub const DEGRADED_ANSWER: &str = "Error retrieving answer.";

/// Composes grounded answers from filtered evidence.
pub struct AnswerComposer {
    llm: Arc<dyn LlmClient>,
    model: String,
    retry: RetryPolicy,
}

impl AnswerComposer {
    /// Create a composer using the given client and model.
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            llm,
            model: model.into(),
            retry,
        }
    }

    /// Compose an answer record for one question.
    ///
    /// A failed model call is returned as a composition error; the caller
    /// degrades that single record rather than aborting the run.
    pub async fn compose(
        &self,
        question: &str,
        kept: Vec<Passage>,
    ) -> AppResult<AnswerRecord> {
        if kept.is_empty() {
            tracing::info!("No evidence for question, using fallback: {}", question);
            return Ok(AnswerRecord {
                question: question.to_string(),
                answer: NO_EVIDENCE_ANSWER.to_string(),
                sources: Vec::new(),
                had_evidence: false,
            });
        }

        let prompt = grounding_prompt(question, &kept)?;
        let request = CompletionRequest::new(prompt, &self.model)
            .with_system(COMPOSITION_SYSTEM_PROMPT)
            .with_temperature(0.3);

        let completion = self
            .retry
            .run("answer composition", || self.llm.complete(&request))
            .await
            .map_err(|e| {
                AppError::Composition(format!(
                    "Answer model call failed for question '{}': {}",
                    question, e
                ))
            })?;

        Ok(AnswerRecord {
            question: question.to_string(),
            answer: completion.text,
            sources: kept,
            had_evidence: true,
        })
    }

    /// Build the degraded record for a question whose retrieval or
    /// composition failed.
    pub fn degraded_record(question: &str) -> AnswerRecord {
        AnswerRecord {
            question: question.to_string(),
            answer: DEGRADED_ANSWER.to_string(),
            sources: Vec::new(),
            had_evidence: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedClient;

    fn passage(text: &str) -> Passage {
        Passage {
            text: text.to_string(),
            score: 0.8,
            document: "report.pdf".to_string(),
            page: "3".to_string(),
        }
    }

    #[tokio::test]
    async fn test_no_evidence_skips_model_call() {
        let client = Arc::new(ScriptedClient::failing("must not be called"));
        let composer =
            AnswerComposer::new(client.clone(), "gpt-4", RetryPolicy::no_retries());

        let record = composer
            .compose("What is the revenue?", Vec::new())
            .await
            .unwrap();

        assert_eq!(record.answer, NO_EVIDENCE_ANSWER);
        assert!(!record.had_evidence);
        assert!(record.sources.is_empty());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_grounded_answer_uses_evidence() {
        let client = Arc::new(ScriptedClient::with_responses(vec![
            "The revenue was $5M (report.pdf, page 3).".to_string(),
        ]));
        let composer =
            AnswerComposer::new(client.clone(), "gpt-4", RetryPolicy::no_retries());

        let record = composer
            .compose("What is the revenue?", vec![passage("$5M revenue")])
            .await
            .unwrap();

        assert!(record.had_evidence);
        assert!(record.answer.contains("$5M"));
        assert_eq!(record.sources.len(), 1);
        assert_eq!(client.calls(), 1);

        // The grounding prompt carried the evidence and its attribution.
        let prompt = client.last_prompt().unwrap();
        assert!(prompt.contains("$5M revenue"));
        assert!(prompt.contains("File: report.pdf, page 3"));
    }

    #[tokio::test]
    async fn test_model_failure_maps_to_composition_error() {
        let client = Arc::new(ScriptedClient::failing("rate limited"));
        let composer = AnswerComposer::new(client, "gpt-4", RetryPolicy::no_retries());

        let result = composer
            .compose("What is the revenue?", vec![passage("$5M revenue")])
            .await;

        assert!(matches!(result, Err(AppError::Composition(_))));
    }

    #[test]
    fn test_degraded_record_shape() {
        let record = AnswerComposer::degraded_record("What is the revenue?");
        assert_eq!(record.answer, DEGRADED_ANSWER);
        assert!(!record.had_evidence);
        assert!(record.sources.is_empty());
    }
}
