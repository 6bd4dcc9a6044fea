//! Index command implementation.

use crate::cli::IndexArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::{document_id_for, gemini_provider, pinecone_store};
use rolecheck_extractor::RetrievalIndexer;
use rolecheck_sources::try_read_document;

/// Execute the index command.
pub fn execute_index(args: IndexArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = try_read_document(&args.pdf)?;
    let document_id = document_id_for(&args.pdf, args.document_id.as_deref());

    let provider = gemini_provider(config)?;
    let store = pinecone_store(config)?;
    let indexer = RetrievalIndexer::new(&provider, &store, config.indexer.clone())?;

    let summary = indexer.reindex(&document, &document_id)?;

    println!("{}", formatter.format_index_summary(&summary)?);
    Ok(())
}
