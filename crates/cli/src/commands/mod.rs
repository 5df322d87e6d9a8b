//! CLI command implementations.

mod answer;
mod index;

pub use answer::AnswerCommand;
pub use index::IndexCommand;
