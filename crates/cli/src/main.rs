//! docreply CLI
//!
//! Main entry point for the docreply command-line tool: answers questions
//! embedded in an email body from a folder of attached documents.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AnswerCommand, IndexCommand};
use docreply_core::{config::AppConfig, logging};
use std::path::PathBuf;

/// docreply - grounded email question answering over attached documents
#[derive(Parser, Debug)]
#[command(name = "docreply")]
#[command(about = "Answer email questions from attached documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "DOCREPLY_CONFIG")]
    config: Option<PathBuf>,

    /// LLM provider (openai, ollama)
    #[arg(short, long, global = true, env = "DOCREPLY_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "DOCREPLY_MODEL")]
    model: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer the questions in an email body from a document folder
    Answer(AnswerCommand),

    /// Build the evidence index and show corpus statistics
    Index(IndexCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_with_file(cli.config)?;
    let config = config.with_overrides(
        None,
        cli.provider,
        cli.model,
        None,
        None,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("docreply starting");
    tracing::debug!("Provider: {}, model: {}", config.provider, config.model);

    let command_name = match &cli.command {
        Commands::Answer(_) => "answer",
        Commands::Index(_) => "index",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Answer(cmd) => cmd.execute(&config).await,
        Commands::Index(cmd) => cmd.execute().await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result?;
    Ok(())
}
