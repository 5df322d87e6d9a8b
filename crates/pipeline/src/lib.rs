//! The docreply answering pipeline.
//!
//! Given an inbound email body and a folder of attached documents, this
//! crate extracts the questions, retrieves and filters evidence per
//! question, composes grounded answers, and assembles the reply report.

pub mod composer;
pub mod delivery;
pub mod extractor;
pub mod filter;
pub mod pipeline;
pub mod prompts;
pub mod report;

#[cfg(test)]
pub(crate) mod testing;

pub use composer::{AnswerComposer, DEGRADED_ANSWER, NO_EVIDENCE_ANSWER};
pub use delivery::{deliver_or_fallback, ConsoleDeliverer, Deliverer, OutboundMessage};
pub use extractor::{QuestionExtractor, NO_QUESTIONS_SENTINEL};
pub use filter::{filter_passages, FilterOutcome};
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutcome};
pub use report::{AnswerRecord, Report};
