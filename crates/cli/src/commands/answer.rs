//! Answer command: run the full pipeline for one email.

use clap::Args;
use docreply_core::config::{AppConfig, ProviderConfig};
use docreply_core::{AppError, AppResult};
use docreply_llm::create_client;
use docreply_pipeline::{
    deliver_or_fallback, ConsoleDeliverer, OutboundMessage, Pipeline, PipelineOptions,
    PipelineOutcome,
};
use docreply_retrieval::TrigramProvider;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

/// Answer the questions in an email body from a document folder.
#[derive(Args, Debug)]
pub struct AnswerCommand {
    /// Folder containing the attached documents
    #[arg(short, long)]
    documents: PathBuf,

    /// File containing the email body (reads stdin when omitted)
    #[arg(short, long)]
    email: Option<PathBuf>,

    /// Recipient address for the reply
    #[arg(long)]
    to: Option<String>,

    /// Subject line for the reply
    #[arg(long)]
    subject: Option<String>,

    /// Sender name used in the report greeting
    #[arg(long)]
    sender_name: Option<String>,

    /// Passages retrieved per question
    #[arg(long)]
    top_k: Option<usize>,

    /// Minimum relevance score (exclusive) for keeping evidence
    #[arg(long)]
    threshold: Option<f32>,

    /// Emit the report as JSON instead of rendered text
    #[arg(long)]
    json: bool,
}

impl AnswerCommand {
    pub async fn execute(self, config: &AppConfig) -> AppResult<()> {
        let config = config.clone().with_overrides(
            None,
            None,
            None,
            self.top_k,
            self.threshold,
            None,
            false,
            false,
        );
        config.validate()?;

        let email_body = self.read_email_body()?;
        if email_body.trim().is_empty() {
            return Err(AppError::Config("Email body is empty".to_string()));
        }

        let endpoint = match config.get_provider_config(&config.provider) {
            Some(ProviderConfig::OpenAi { endpoint, .. }) => endpoint,
            Some(ProviderConfig::Ollama { endpoint, .. }) => Some(endpoint),
            None => None,
        };
        let api_key = config.resolve_api_key(&config.provider);
        let llm = create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())?;

        let options = PipelineOptions {
            top_k: config.top_k,
            relevance_threshold: config.relevance_threshold,
            sender_name: self.sender_name.clone(),
        };
        let pipeline = Pipeline::new(
            llm,
            Arc::new(TrigramProvider::default()),
            config.model.clone(),
            options,
        );

        let report = match pipeline.run(&email_body, &self.documents).await? {
            PipelineOutcome::NoQuestions => {
                tracing::info!("No questions found in the email; nothing to deliver");
                println!("No questions found in the email.");
                return Ok(());
            }
            PipelineOutcome::Completed(report) => report,
        };

        if self.json {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Serialization(e.to_string()))?;
            println!("{}", rendered);
            return Ok(());
        }

        let body = report.render();
        match self.to {
            Some(to) => {
                let mut message = OutboundMessage::new(to, body);
                if let Some(subject) = self.subject {
                    message.subject = subject;
                }
                deliver_or_fallback(&ConsoleDeliverer, &message).await
            }
            None => {
                println!("{}", body);
                Ok(())
            }
        }
    }

    fn read_email_body(&self) -> AppResult<String> {
        match &self.email {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read email file {:?}: {}", path, e))
            }),
            None => {
                let mut body = String::new();
                std::io::stdin()
                    .read_to_string(&mut body)
                    .map_err(|e| AppError::Config(format!("Failed to read stdin: {}", e)))?;
                Ok(body)
            }
        }
    }
}
