//! Error types for document sources

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading role sources
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML
    #[error("XML error: {0}")]
    Xml(String),

    /// The PDF could not be decoded
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Extraction produced no text
    #[error("No text extracted from {}", .0.display())]
    EmptyDocument(PathBuf),

    /// Unsupported or malformed role path expression
    #[error("Invalid role path '{expression}': {reason}")]
    InvalidPath {
        /// Expression as given
        expression: String,
        /// What is wrong with it
        reason: String,
    },
}

impl SourceError {
    /// True for a missing source file
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound(_))
    }
}
