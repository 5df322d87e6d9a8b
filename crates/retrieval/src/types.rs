//! Core retrieval value types.

use serde::{Deserialize, Serialize};

/// A source file loaded from the document folder.
///
/// Immutable once loaded; pages keep their original order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Identifier for attribution, the file name (e.g., "report.pdf")
    pub name: String,

    /// Ordered pages of the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a single-page document, used for plain-text sources.
    pub fn single_page(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pages: vec![Page {
                label: "1".to_string(),
                text: text.into(),
            }],
        }
    }
}

/// One page of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page label, usually the 1-based page number
    pub label: String,

    /// Raw text content of the page
    pub text: String,
}

/// A scored unit of retrieved text evidence tied to a document/page.
///
/// Produced fresh per query and never persisted. Carries exactly the
/// fields the answering stage consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// Text content of the evidence
    pub text: String,

    /// Relevance score; higher is more relevant, comparable within one
    /// store instance
    pub score: f32,

    /// Source document identifier (file name)
    pub document: String,

    /// Source page label
    pub page: String,
}

impl Passage {
    /// Human-readable source attribution, e.g. "report.pdf, page 3".
    pub fn source_label(&self) -> String {
        format!("{}, page {}", self.document, self.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_document() {
        let doc = Document::single_page("notes.txt", "Hello");
        assert_eq!(doc.name, "notes.txt");
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].label, "1");
    }

    #[test]
    fn test_passage_source_label() {
        let passage = Passage {
            text: "$5M revenue".to_string(),
            score: 0.8,
            document: "report.pdf".to_string(),
            page: "3".to_string(),
        };
        assert_eq!(passage.source_label(), "report.pdf, page 3");
    }
}
