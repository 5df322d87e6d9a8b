//! Prompt templates for question extraction and grounded answering.
//!
//! Templates are fixed strings rendered with Handlebars. The extraction
//! template embeds a few-shot example and the `NONE` sentinel convention;
//! the grounding template carries the question plus each kept passage
//! annotated with its source document and page.

use docreply_core::{AppError, AppResult};
use docreply_retrieval::Passage;
use handlebars::Handlebars;
use serde::Serialize;

/// System instruction for the extraction call.
pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are an assistant helping extract structured data from messages.";

/// System instruction for the answer composition call.
pub const COMPOSITION_SYSTEM_PROMPT: &str = "You are an assistant helping to answer the \
     user's question based on the information found by other assistants.";

const EXTRACTION_TEMPLATE: &str = "\
Your task is to extract the user's questions, and questions only, from the
following email body. The user is asking questions about the attached
documents, and the extracted questions are used one by one in a later step.

Return the questions individually, each on its own line, and do not add any
extra characters or explanations to your reply. Retain the user's original
wording as much as possible.

If there are no questions about the documents in the email, return a single
line with the text NONE and nothing else.

Follow the example below.

*** Example starts ***
<User's message>
Hi, I would like to know some details about the attached documents. What is
the year of the document? Then also tell me what was the revenue reported in
the year in question. Was it growing compared to last year?

Thanks,
Some person

<Your output>
What is the year of the document?
What was the revenue reported in the year in question?
Was the revenue growing compared to previous year?
*** Example ends ***

Now your turn, extract the questions from this message:

{{email_body}}
";

const GROUNDING_TEMPLATE: &str = "\
Your task is to answer the following question:

{{question}}

Use only the information provided in the contextual passages below, which
another assistant has extracted from the documents provided by the user. If
the passages do not provide an answer to the question, clearly state that.
You may use tables and bullet lists to make the information easily
understandable, if they make sense in the context of the question.

Along with each passage, its source is mentioned (the document and the
page). In your final response, include the sources either in the relevant
places of your response, or at the end.
{{#each passages}}

***CONTEXT***
{{text}}
***SOURCE*** File: {{document}}, page {{page}}
{{/each}}
";

#[derive(Serialize)]
struct ExtractionVars<'a> {
    email_body: &'a str,
}

#[derive(Serialize)]
struct GroundingVars<'a> {
    question: &'a str,
    passages: &'a [Passage],
}

fn render<T: Serialize>(template: &str, vars: &T) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text prompts, no HTML escaping
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Other(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", vars)
        .map_err(|e| AppError::Other(format!("Failed to render template: {}", e)))
}

/// Render the question extraction prompt for an email body.
pub fn extraction_prompt(email_body: &str) -> AppResult<String> {
    render(EXTRACTION_TEMPLATE, &ExtractionVars { email_body })
}

/// Render the grounding prompt for one question and its kept evidence.
///
/// Built fresh per question from an empty accumulator; never reuses state
/// from a previous question.
pub fn grounding_prompt(question: &str, passages: &[Passage]) -> AppResult<String> {
    render(GROUNDING_TEMPLATE, &GroundingVars { question, passages })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(text: &str, document: &str, page: &str) -> Passage {
        Passage {
            text: text.to_string(),
            score: 0.8,
            document: document.to_string(),
            page: page.to_string(),
        }
    }

    #[test]
    fn test_extraction_prompt_embeds_body() {
        let prompt = extraction_prompt("What is the revenue?").unwrap();
        assert!(prompt.contains("What is the revenue?"));
        assert!(prompt.contains("NONE"));
        assert!(prompt.contains("*** Example starts ***"));
    }

    #[test]
    fn test_grounding_prompt_annotates_sources() {
        let passages = vec![
            passage("$5M revenue", "report.pdf", "3"),
            passage("Growth was 12%", "report.pdf", "4"),
        ];

        let prompt = grounding_prompt("What is the revenue?", &passages).unwrap();
        assert!(prompt.contains("What is the revenue?"));
        assert!(prompt.contains("***CONTEXT***\n$5M revenue"));
        assert!(prompt.contains("***SOURCE*** File: report.pdf, page 3"));
        assert!(prompt.contains("***SOURCE*** File: report.pdf, page 4"));
    }

    #[test]
    fn test_grounding_prompt_isolated_per_question() {
        let passages = vec![passage("$5M revenue", "report.pdf", "3")];

        let first = grounding_prompt("Question one?", &passages).unwrap();
        let second = grounding_prompt("Question two?", &[]).unwrap();

        // The second prompt starts empty; nothing leaks from the first.
        assert!(!second.contains("$5M revenue"));
        assert!(!second.contains("Question one?"));
        assert!(first.contains("Question one?"));
    }

    #[test]
    fn test_prompts_do_not_escape_plain_text() {
        let prompt = extraction_prompt("Is A < B & C > D?").unwrap();
        assert!(prompt.contains("Is A < B & C > D?"));
    }
}
