//! Configuration for chunking, indexing, extraction and retrieval

use crate::error::ExtractorError;
use crate::prompt::DEFAULT_ROLE_PROMPT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Characters a chunk may contain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Charset {
    /// ASCII only; everything else is dropped
    #[default]
    Ascii,
    /// Any Unicode scalar value
    Unicode,
}

impl Charset {
    /// Whether `c` is kept
    pub fn allows(&self, c: char) -> bool {
        match self {
            Charset::Ascii => c.is_ascii(),
            Charset::Unicode => true,
        }
    }
}

/// Window size and overlap for the Chunker, in characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Maximum characters per chunk
    pub size: usize,

    /// Characters shared by consecutive chunks
    pub overlap: usize,

    /// Characters retained before windowing
    pub charset: Charset,
}

impl ChunkConfig {
    /// Configuration with the given size and overlap and the default charset
    pub fn new(size: usize, overlap: usize) -> Self {
        Self {
            size,
            overlap,
            charset: Charset::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.size == 0 {
            return Err(ExtractorError::Config(
                "chunk size must be greater than 0".to_string(),
            ));
        }
        if self.overlap >= self.size {
            return Err(ExtractorError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                self.overlap, self.size
            )));
        }
        Ok(())
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(1000, 100)
    }
}

/// Configuration for the RetrievalIndexer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Chunking parameters
    pub chunk: ChunkConfig,

    /// Pause after clearing a document, before re-indexing (milliseconds)
    pub settle_delay_ms: u64,
}

impl IndexerConfig {
    /// Get the settling delay as a Duration
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        self.chunk.validate()
    }
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            chunk: ChunkConfig::default(),
            settle_delay_ms: 2_000,
        }
    }
}

/// Configuration for the RoleExtractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Instruction placed before the document content
    pub prompt_template: String,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.prompt_template.trim().is_empty() {
            return Err(ExtractorError::Config(
                "role extraction prompt must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            prompt_template: DEFAULT_ROLE_PROMPT.to_string(),
        }
    }
}

/// Configuration for retrieval question answering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Number of chunks retrieved per question
    pub top_k: usize,
}

impl QaConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.top_k == 0 {
            return Err(ExtractorError::Config(
                "top_k must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for QaConfig {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_are_valid() {
        assert!(ChunkConfig::default().validate().is_ok());
        assert!(IndexerConfig::default().validate().is_ok());
        assert!(ExtractorConfig::default().validate().is_ok());
        assert!(QaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let chunk = ChunkConfig::default();
        assert_eq!((chunk.size, chunk.overlap), (1000, 100));
        assert_eq!(chunk.charset, Charset::Ascii);
        assert_eq!(IndexerConfig::default().settle_delay(), Duration::from_secs(2));
        assert_eq!(QaConfig::default().top_k, 10);
    }

    #[test]
    fn test_zero_chunk_size() {
        assert!(ChunkConfig::new(0, 0).validate().is_err());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        assert!(ChunkConfig::new(10, 10).validate().is_err());
        assert!(ChunkConfig::new(10, 11).validate().is_err());
        assert!(ChunkConfig::new(10, 9).validate().is_ok());
        assert!(ChunkConfig::new(10, 0).validate().is_ok());
    }

    #[test]
    fn test_blank_prompt_rejected() {
        let config = ExtractorConfig {
            prompt_template: "   ".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        assert!(QaConfig { top_k: 0 }.validate().is_err());
    }

    #[test]
    fn test_charset() {
        assert!(Charset::Ascii.allows('a'));
        assert!(!Charset::Ascii.allows('é'));
        assert!(Charset::Unicode.allows('é'));
    }
}
