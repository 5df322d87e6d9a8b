//! Index command: build the evidence index and report corpus statistics.

use clap::Args;
use docreply_core::AppResult;
use docreply_retrieval::{EvidenceStore, TrigramProvider};
use std::path::PathBuf;
use std::sync::Arc;

/// Build the evidence index and show what it would contain.
///
/// Useful for checking a document folder before wiring it to a mailbox:
/// surfaces unreadable files and empty corpora without any model calls.
#[derive(Args, Debug)]
pub struct IndexCommand {
    /// Folder containing the documents to index
    #[arg(short, long)]
    documents: PathBuf,
}

impl IndexCommand {
    pub async fn execute(self) -> AppResult<()> {
        let store =
            EvidenceStore::build(&self.documents, Arc::new(TrigramProvider::default())).await?;
        let stats = store.stats();

        println!("Indexed {}", self.documents.display());
        println!("  documents: {}", stats.documents);
        println!("  pages:     {}", stats.pages);
        println!("  passages:  {}", stats.passages);

        Ok(())
    }
}
