//! Question extraction from email bodies.
//!
//! One LLM call turns an unstructured email body into zero or more
//! discrete questions, one per output line. The literal sentinel `NONE`
//! as the sole output signals "no questions" and must be recognized
//! before any line splitting, so an email genuinely asking about the
//! string "NONE" is not swallowed.

use crate::prompts::{extraction_prompt, EXTRACTION_SYSTEM_PROMPT};
use docreply_core::{AppError, AppResult};
use docreply_llm::{CompletionRequest, LlmClient, RetryPolicy};
use std::sync::Arc;

/// Literal model output signalling "no extractable questions".
pub const NO_QUESTIONS_SENTINEL: &str = "NONE";

/// Extracts discrete questions from raw email text via an LLM call.
pub struct QuestionExtractor {
    llm: Arc<dyn LlmClient>,
    model: String,
    retry: RetryPolicy,
}

impl QuestionExtractor {
    /// Create an extractor using the given client and model.
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>, retry: RetryPolicy) -> Self {
        Self {
            llm,
            model: model.into(),
            retry,
        }
    }

    /// Extract questions from an email body, in order of appearance.
    ///
    /// Returns an empty list when the model emits the sentinel. A failed
    /// model call is fatal for the run: no partial processing happens.
    pub async fn extract(&self, email_body: &str) -> AppResult<Vec<String>> {
        let prompt = extraction_prompt(email_body)?;
        let request = CompletionRequest::new(prompt, &self.model)
            .with_system(EXTRACTION_SYSTEM_PROMPT)
            .with_temperature(0.0);

        let completion = self
            .retry
            .run("question extraction", || self.llm.complete(&request))
            .await
            .map_err(|e| AppError::Extraction(format!("Extraction model call failed: {}", e)))?;

        let questions = parse_extraction_output(&completion.text);
        tracing::info!("Extracted {} question(s) from email body", questions.len());

        Ok(questions)
    }
}

/// Parse raw multi-line extraction output into questions.
///
/// The sentinel check runs on the whole trimmed output before the text is
/// split into lines; afterwards each non-empty trimmed line is one
/// question, preserving order.
pub fn parse_extraction_output(raw: &str) -> Vec<String> {
    if raw.trim() == NO_QUESTIONS_SENTINEL {
        return Vec::new();
    }

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_yields_no_questions() {
        assert!(parse_extraction_output("NONE").is_empty());
        assert!(parse_extraction_output("  NONE\n").is_empty());
    }

    #[test]
    fn test_sentinel_is_case_sensitive() {
        assert_eq!(parse_extraction_output("none"), vec!["none".to_string()]);
        assert_eq!(parse_extraction_output("None"), vec!["None".to_string()]);
    }

    #[test]
    fn test_sentinel_checked_before_line_split() {
        // "NONE" among real questions is a literal question, not a signal.
        let parsed = parse_extraction_output("What does NONE mean here?\nNONE");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], "NONE");
    }

    #[test]
    fn test_lines_become_questions_in_order() {
        let raw = "What is the year of the document?\nWhat was the revenue?\n";
        let parsed = parse_extraction_output(raw);
        assert_eq!(
            parsed,
            vec![
                "What is the year of the document?".to_string(),
                "What was the revenue?".to_string(),
            ]
        );
    }

    #[test]
    fn test_blank_lines_and_padding_dropped() {
        let raw = "\n  What is the revenue?  \n\n   \nWas it growing?\n";
        let parsed = parse_extraction_output(raw);
        assert_eq!(parsed, vec!["What is the revenue?", "Was it growing?"]);
    }

    #[test]
    fn test_duplicate_questions_are_kept() {
        let raw = "What is the revenue?\nWhat is the revenue?";
        assert_eq!(parse_extraction_output(raw).len(), 2);
    }
}
