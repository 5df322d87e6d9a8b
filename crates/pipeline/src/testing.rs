//! Test doubles shared by the pipeline test modules.

use docreply_core::{AppError, AppResult};
use docreply_llm::{Completion, CompletionRequest, LlmClient, TokenUsage};
use docreply_retrieval::EmbeddingProvider;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// LLM client that replays a fixed script of responses.
///
/// Each `complete` call consumes the next scripted entry; `Err` entries
/// surface as LLM errors. Exhausting the script is an error so tests
/// notice unexpected extra calls.
pub(crate) struct ScriptedClient {
    script: Mutex<VecDeque<Result<String, String>>>,
    fail_all: Option<String>,
    calls: AtomicU32,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub(crate) fn with_responses(responses: Vec<String>) -> Self {
        Self::with_script(responses.into_iter().map(Ok).collect())
    }

    pub(crate) fn with_script(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fail_all: None,
            calls: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A client whose every call fails with the given message.
    pub(crate) fn failing(message: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fail_all: Some(message.to_string()),
            calls: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of completion calls made so far.
    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent user prompt, if any call was made.
    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> AppResult<Completion> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());

        if let Some(ref message) = self.fail_all {
            return Err(AppError::Llm(message.clone()));
        }

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(Completion {
                text,
                model: request.model.clone(),
                usage: TokenUsage::default(),
            }),
            Some(Err(message)) => Err(AppError::Llm(message)),
            None => Err(AppError::Llm("script exhausted".to_string())),
        }
    }
}

/// Embedding provider that fails for texts mentioning "budget".
///
/// Indexing succeeds as long as the corpus avoids the word, so a question
/// containing it exercises the retrieval failure path while other
/// questions behave like [`KeywordEmbedder`].
pub(crate) struct FaultyEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for FaultyEmbedder {
    fn provider_name(&self) -> &str {
        "faulty"
    }

    fn dimensions(&self) -> usize {
        2
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        if texts.iter().any(|t| t.to_lowercase().contains("budget")) {
            return Err(AppError::Other("embedding backend unavailable".to_string()));
        }
        KeywordEmbedder.embed_batch(texts).await
    }
}

/// Embedding provider with controllable similarity.
///
/// Texts mentioning "revenue" embed to [1, 0], everything else to
/// [0.3, 0], so a revenue question scores revenue passages at 1.0 and
/// other passages at 0.3, straddling the default 0.6 threshold.
pub(crate) struct KeywordEmbedder;

#[async_trait::async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    fn provider_name(&self) -> &str {
        "keyword"
    }

    fn dimensions(&self) -> usize {
        2
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                if text.to_lowercase().contains("revenue") {
                    vec![1.0, 0.0]
                } else {
                    vec![0.3, 0.0]
                }
            })
            .collect())
    }
}
