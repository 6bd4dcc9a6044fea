//! Wipe-index command implementation.

use crate::cli::WipeIndexArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::pinecone_store;
use rolecheck_domain::VectorStore;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Execute the wipe-index command.
///
/// Deletes every vector of every document in the configured index.
pub fn execute_wipe_index(
    args: WipeIndexArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    if !args.yes {
        print!(
            "About to delete ALL vectors in index '{}'. Continue? [y/N] ",
            config.store.index_name
        );
        io::stdout().flush()?;

        if !confirmed(io::stdin().lock())? {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    let store = pinecone_store(config)?;
    warn!("Wiping every vector in index '{}'", store.index_name());
    store.delete_all()?;

    println!(
        "{}",
        formatter.success(&format!("Wiped index '{}'", store.index_name()))
    );
    Ok(())
}

/// Read one line and accept only "y" or "yes".
fn confirmed(mut input: impl BufRead) -> Result<bool> {
    let mut response = String::new();
    input.read_line(&mut response)?;
    let response = response.trim();
    Ok(response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_confirmation_answers() {
        assert!(confirmed(Cursor::new("y\n")).unwrap());
        assert!(confirmed(Cursor::new("  YES \n")).unwrap());
        assert!(!confirmed(Cursor::new("\n")).unwrap());
        assert!(!confirmed(Cursor::new("no\n")).unwrap());
        assert!(!confirmed(Cursor::new("")).unwrap());
    }
}
