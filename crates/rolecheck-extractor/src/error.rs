//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during indexing, extraction or retrieval
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Text generator error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Vector store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
