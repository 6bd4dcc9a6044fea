//! Fixed-size overlapping text windows

use crate::config::ChunkConfig;
use crate::error::ExtractorError;
use rolecheck_domain::Chunk;

/// Splits text into overlapping windows of at most `size` characters
///
/// Characters outside the configured charset are dropped first; windows are
/// then cut from the filtered text. Window `i` starts at `i * (size - overlap)`
/// and the last window is the first one reaching the end of the text.
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkConfig,
}

impl Chunker {
    /// Create a new chunker
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is 0 or `overlap >= size`.
    pub fn new(config: ChunkConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Chunking parameters
    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text
            .chars()
            .filter(|c| self.config.charset.allows(*c))
            .collect();

        if chars.is_empty() {
            return Vec::new();
        }

        let size = self.config.size;
        let step = size - self.config.overlap;
        let mut chunks = Vec::with_capacity(chars.len().div_ceil(step));
        let mut start = 0;

        loop {
            let end = (start + size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if start + size >= chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }

    /// Chunk the text into ordered chunks of `document_id`
    pub fn chunk_document(&self, text: &str, document_id: &str) -> Vec<Chunk> {
        self.chunk(text)
            .into_iter()
            .enumerate()
            .map(|(index, content)| Chunk::new(document_id, index, content))
            .collect()
    }
}
