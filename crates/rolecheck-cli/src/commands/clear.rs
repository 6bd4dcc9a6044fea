//! Clear command implementation.

use crate::cli::ClearArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::pinecone_store;
use rolecheck_extractor::clear_document;

/// Execute the clear command.
pub fn execute_clear(args: ClearArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = pinecone_store(config)?;
    let outcome = clear_document(&store, &args.document_id);

    println!("{}", formatter.format_clear(&args.document_id, &outcome)?);
    Ok(())
}
