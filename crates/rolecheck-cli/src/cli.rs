//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rolecheck - Validate the job roles in a PDF against an authoritative XML list.
#[derive(Debug, Parser)]
#[command(name = "rolecheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fuzzy match threshold (0-100), overrides FUZZY_MATCH_THRESHOLD
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub threshold: Option<u32>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (verdict only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Index a PDF, extract its roles and compare them with the XML roles
    Check(CheckArgs),

    /// Compare XML roles with roles given on the command line (offline)
    Compare(CompareArgs),

    /// Clear and re-index a PDF for question answering
    Index(IndexArgs),

    /// Ask a question about the indexed documents
    Ask(AskArgs),

    /// Delete one document's vectors from the index
    Clear(ClearArgs),

    /// Delete every vector in the index, across all documents
    WipeIndex(WipeIndexArgs),

    /// Print the authoritative roles from an XML file
    Roles(RolesArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// XML file with the authoritative roles
    #[arg(short, long)]
    pub xml: PathBuf,

    /// PDF document to check
    #[arg(short, long)]
    pub pdf: PathBuf,

    /// Id of the document in the index (defaults to the PDF file name)
    #[arg(short, long)]
    pub document_id: Option<String>,

    /// Do not clear and re-index the document
    #[arg(long)]
    pub skip_index: bool,

    /// Exit with status 2 when the document has non-authoritative roles
    #[arg(long)]
    pub fail_on_mismatch: bool,
}

/// Arguments for the compare command.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// XML file with the authoritative roles
    #[arg(short, long)]
    pub xml: PathBuf,

    /// Candidate roles
    #[arg(required = true)]
    pub roles: Vec<String>,

    /// Exit with status 2 when a candidate role is not authoritative
    #[arg(long)]
    pub fail_on_mismatch: bool,
}

/// Arguments for the index command.
#[derive(Debug, Parser)]
pub struct IndexArgs {
    /// PDF document to index
    #[arg(short, long)]
    pub pdf: PathBuf,

    /// Id of the document in the index (defaults to the PDF file name)
    #[arg(short, long)]
    pub document_id: Option<String>,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question text
    #[arg(short, long)]
    pub question: String,

    /// Number of chunks to retrieve, overrides RETRIEVAL_TOP_K
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

/// Arguments for the clear command.
#[derive(Debug, Parser)]
pub struct ClearArgs {
    /// Id of the document to clear
    #[arg(short, long)]
    pub document_id: String,
}

/// Arguments for the wipe-index command.
#[derive(Debug, Parser)]
pub struct WipeIndexArgs {
    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the roles command.
#[derive(Debug, Parser)]
pub struct RolesArgs {
    /// XML file with the authoritative roles
    #[arg(short, long)]
    pub xml: PathBuf,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from([
            "rolecheck",
            "check",
            "--xml",
            "roles.xml",
            "--pdf",
            "report.pdf",
            "--fail-on-mismatch",
        ]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.xml, PathBuf::from("roles.xml"));
                assert_eq!(args.pdf, PathBuf::from("report.pdf"));
                assert!(args.document_id.is_none());
                assert!(!args.skip_index);
                assert!(args.fail_on_mismatch);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_compare_takes_roles() {
        let cli = Cli::parse_from([
            "rolecheck",
            "--threshold",
            "90",
            "compare",
            "--xml",
            "roles.xml",
            "Data Analyst",
            "QA Tester",
        ]);
        assert_eq!(cli.threshold, Some(90));
        match cli.command {
            Command::Compare(args) => assert_eq!(args.roles, vec!["Data Analyst", "QA Tester"]),
            _ => panic!("Expected Compare command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["rolecheck", "roles", "-x", "roles.xml", "--format", "json", "-v"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.verbose);
    }

    #[test]
    fn test_threshold_out_of_range() {
        let result = Cli::try_parse_from(["rolecheck", "--threshold", "101", "roles", "-x", "r.xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_wipe_index_flag() {
        let cli = Cli::parse_from(["rolecheck", "wipe-index", "--yes"]);
        assert!(matches!(cli.command, Command::WipeIndex(WipeIndexArgs { yes: true })));
    }

    #[test]
    fn test_compare_requires_roles() {
        assert!(Cli::try_parse_from(["rolecheck", "compare", "--xml", "roles.xml"]).is_err());
    }
}
