//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A credential needed by the command is not configured
    #[error("Missing credential: set {0} in the environment, .env or config file")]
    MissingCredential(&'static str),

    /// Text generation or embedding service error
    #[error(transparent)]
    Llm(#[from] rolecheck_llm::LlmError),

    /// Vector store error
    #[error(transparent)]
    Store(#[from] rolecheck_store::StoreError),

    /// Indexing or retrieval error
    #[error(transparent)]
    Extractor(#[from] rolecheck_extractor::ExtractorError),

    /// Source file error
    #[error(transparent)]
    Source(#[from] rolecheck_sources::SourceError),

    /// Reconciler configuration error
    #[error(transparent)]
    Reconciler(#[from] rolecheck_reconciler::ReconcilerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
