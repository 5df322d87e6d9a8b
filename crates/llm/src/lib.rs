//! LLM client abstractions and provider implementations for docreply.
//!
//! Exposes a typed request/response completion interface behind the
//! [`LlmClient`] trait, concrete OpenAI and Ollama providers, a factory
//! for provider resolution, and a bounded retry policy for external calls.

pub mod client;
pub mod factory;
pub mod providers;
pub mod retry;

pub use client::{Completion, CompletionRequest, LlmClient, TokenUsage};
pub use factory::create_client;
pub use retry::RetryPolicy;
