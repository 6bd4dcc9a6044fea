//! Ask command implementation.

use crate::cli::AskArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::pipeline::{gemini_provider, pinecone_store};
use rolecheck_extractor::RetrievalQa;

/// Execute the ask command.
pub fn execute_ask(args: AskArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let question = args.question.trim();
    if question.is_empty() {
        return Err(CliError::InvalidInput("question must not be empty".to_string()));
    }

    let mut qa_config = config.qa.clone();
    if let Some(top_k) = args.top_k {
        qa_config.top_k = top_k;
    }

    let provider = gemini_provider(config)?;
    let store = pinecone_store(config)?;
    let qa = RetrievalQa::new(&provider, &store, &provider, qa_config)?;

    let answer = qa.ask(question)?;

    println!("{}", formatter.format_answer(question, &answer)?);
    Ok(())
}
