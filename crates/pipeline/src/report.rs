//! Answer records and the reply report.
//!
//! The report is the sole artifact handed to the delivery collaborator:
//! a greeting, one block per question in extraction order, and a footer.
//! The rendered layout is stable so callers and tests can rely on it.

use docreply_retrieval::Passage;
use serde::{Deserialize, Serialize};

/// Separator line between question blocks.
pub const BLOCK_SEPARATOR: &str = "-------------------------------------------------------";

const DEFAULT_FOOTER: &str =
    "This reply was generated automatically from the attached documents.";

/// The outcome of answering one question. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// The extracted question, verbatim
    pub question: String,

    /// Composed answer, fixed fallback, or degraded error text
    pub answer: String,

    /// Passages that passed filtering (empty when none survived)
    pub sources: Vec<Passage>,

    /// True iff the answer was grounded in at least one passage
    pub had_evidence: bool,
}

/// The assembled reply for one email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Greeting line, personalized when the sender name is known
    pub greeting: String,

    /// Answer records in extraction order
    pub records: Vec<AnswerRecord>,

    /// Closing line
    pub footer: String,
}

impl Report {
    /// Create an empty report, greeting the sender by name when known.
    pub fn new(sender_name: Option<&str>) -> Self {
        let greeting = match sender_name {
            Some(name) if !name.trim().is_empty() => format!("Hi {}!", name.trim()),
            _ => "Hi!".to_string(),
        };

        Self {
            greeting,
            records: Vec::new(),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }

    /// Append a record. Records keep their insertion order.
    pub fn push(&mut self, record: AnswerRecord) {
        self.records.push(record);
    }

    /// Render the report as the plain-text reply body.
    pub fn render(&self) -> String {
        let mut body = String::new();

        body.push_str(&self.greeting);
        body.push_str("\n\nHere are the replies to your questions:\n\n");

        for record in &self.records {
            body.push_str(BLOCK_SEPARATOR);
            body.push_str("\n\n");
            body.push_str(&format!("Question: {}\n\n", record.question));
            body.push_str(&format!("Response: {}\n\n", record.answer));

            if record.had_evidence {
                body.push_str(&format!("Sources: {}\n\n", source_list(&record.sources)));
            }
        }

        body.push_str(&self.footer);
        body.push('\n');

        body
    }
}

/// Deduplicated, order-preserving list of source labels.
fn source_list(sources: &[Passage]) -> String {
    let mut seen = Vec::new();
    for passage in sources {
        let label = passage.source_label();
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(document: &str, page: &str) -> Passage {
        Passage {
            text: "evidence".to_string(),
            score: 0.8,
            document: document.to_string(),
            page: page.to_string(),
        }
    }

    fn record(question: &str, answer: &str, sources: Vec<Passage>) -> AnswerRecord {
        let had_evidence = !sources.is_empty();
        AnswerRecord {
            question: question.to_string(),
            answer: answer.to_string(),
            sources,
            had_evidence,
        }
    }

    #[test]
    fn test_greeting_personalized() {
        assert_eq!(Report::new(Some("Maria")).greeting, "Hi Maria!");
        assert_eq!(Report::new(None).greeting, "Hi!");
        assert_eq!(Report::new(Some("  ")).greeting, "Hi!");
    }

    #[test]
    fn test_render_block_layout() {
        let mut report = Report::new(None);
        report.push(record(
            "What is the revenue?",
            "The revenue was $5M.",
            vec![passage("report.pdf", "3")],
        ));

        let body = report.render();
        assert!(body.starts_with("Hi!\n\nHere are the replies to your questions:\n\n"));
        assert!(body.contains(BLOCK_SEPARATOR));
        assert!(body.contains("Question: What is the revenue?\n\n"));
        assert!(body.contains("Response: The revenue was $5M.\n\n"));
        assert!(body.contains("Sources: report.pdf, page 3"));
    }

    #[test]
    fn test_render_keeps_record_order() {
        let mut report = Report::new(None);
        report.push(record("First?", "A1", vec![]));
        report.push(record("Second?", "A2", vec![]));

        let body = report.render();
        let first = body.find("Question: First?").unwrap();
        let second = body.find("Question: Second?").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_no_sources_line_without_evidence() {
        let mut report = Report::new(None);
        report.push(record("Anything?", "Didn't find anything.", vec![]));

        assert!(!report.render().contains("Sources:"));
    }

    #[test]
    fn test_source_list_deduplicates() {
        let sources = vec![
            passage("report.pdf", "3"),
            passage("report.pdf", "3"),
            passage("report.pdf", "4"),
        ];
        assert_eq!(source_list(&sources), "report.pdf, page 3; report.pdf, page 4");
    }
}
