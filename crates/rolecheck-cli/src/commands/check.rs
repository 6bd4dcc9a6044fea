//! Check command implementation.

use super::verdict_exit_code;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::pipeline::{document_id_for, gemini_provider, pinecone_store, Pipeline};
use rolecheck_sources::{extract_roles, read_document};
use rolecheck_store::MemoryVectorStore;
use std::process::ExitCode;
use tracing::{info, warn};

/// Execute the check command.
pub fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<ExitCode> {
    let role_path = config.role_path()?;
    let provider = gemini_provider(config)?;

    let store = if args.skip_index {
        None
    } else {
        match pinecone_store(config) {
            Ok(store) => Some(store),
            Err(e @ CliError::MissingCredential(_)) => return Err(e),
            Err(e) => {
                warn!("Vector store unavailable: {}; skipping indexing", e);
                None
            }
        }
    };

    let authoritative = extract_roles(&args.xml, &role_path);
    let document = read_document(&args.pdf);
    let document_id = document_id_for(&args.pdf, args.document_id.as_deref());
    info!(
        "Checking '{}' ({} chars) against {} authoritative roles",
        document_id,
        document.chars().count(),
        authoritative.len()
    );

    let report = match &store {
        Some(store) => Pipeline::new(&provider, store, &provider, config)?.check(
            &authoritative,
            &document,
            &document_id,
            false,
        ),
        // The placeholder store is never touched when indexing is skipped
        None => Pipeline::new(&provider, MemoryVectorStore::new(), &provider, config)?.check(
            &authoritative,
            &document,
            &document_id,
            true,
        ),
    };

    println!("{}", formatter.format_report(&report)?);
    Ok(verdict_exit_code(&report, args.fail_on_mismatch))
}
