//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::chunk::{ChunkMetadata, QueryMatch, VectorRecord};

/// Trait for text generation (LLM completion)
///
/// Implemented by the infrastructure layer (rolecheck-llm)
pub trait TextGenerator {
    /// Error type for generation calls
    type Error;

    /// Generate a completion for the prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for text embedding
///
/// Implemented by the infrastructure layer (rolecheck-llm, rolecheck-store)
pub trait Embedder {
    /// Error type for embedding calls
    type Error;

    /// Generate an embedding vector for the text
    ///
    /// An empty vector means the backend produced no embedding.
    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error>;

    /// Dimension of the vectors produced
    fn dimension(&self) -> usize;
}

/// Trait for an external vector database
///
/// Writes are eventually consistent: a delete followed by an upsert may need a
/// short settling window before queries reflect the deletion.
///
/// Implemented by the infrastructure layer (rolecheck-store)
pub trait VectorStore {
    /// Error type for store operations
    type Error;

    /// Make sure the backing index exists and accepts requests
    ///
    /// Idempotent. Construction of a store never performs I/O; callers invoke
    /// this before first use.
    fn ensure_ready(&self) -> Result<(), Self::Error>;

    /// Insert or replace a batch of records, returning how many were written
    fn upsert(&self, records: &[VectorRecord]) -> Result<usize, Self::Error>;

    /// Return up to `top_k` entries ranked by similarity to `vector`
    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, Self::Error>;

    /// Delete every entry whose metadata matches `filter`
    ///
    /// Implementations reject an empty filter; wiping the index goes through
    /// [`VectorStore::delete_all`] only.
    fn delete(&self, filter: &MetadataFilter) -> Result<DeleteOutcome, Self::Error>;

    /// Delete every entry in the index, across all documents
    fn delete_all(&self) -> Result<(), Self::Error>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    type Error = T::Error;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        (**self).generate(prompt)
    }
}

impl<T: Embedder + ?Sized> Embedder for &T {
    type Error = T::Error;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        (**self).embed(text)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }
}

impl<T: VectorStore + ?Sized> VectorStore for &T {
    type Error = T::Error;

    fn ensure_ready(&self) -> Result<(), Self::Error> {
        (**self).ensure_ready()
    }

    fn upsert(&self, records: &[VectorRecord]) -> Result<usize, Self::Error> {
        (**self).upsert(records)
    }

    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, Self::Error> {
        (**self).query(vector, top_k)
    }

    fn delete(&self, filter: &MetadataFilter) -> Result<DeleteOutcome, Self::Error> {
        (**self).delete(filter)
    }

    fn delete_all(&self) -> Result<(), Self::Error> {
        (**self).delete_all()
    }
}

/// Equality filter over chunk metadata
///
/// All populated fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFilter {
    /// Match entries of this document
    pub document_id: Option<String>,

    /// Match entries with this chunk index
    pub chunk_index: Option<usize>,
}

impl MetadataFilter {
    /// Filter selecting every chunk of one document
    pub fn document(document_id: impl Into<String>) -> Self {
        Self {
            document_id: Some(document_id.into()),
            chunk_index: None,
        }
    }

    /// Narrow the filter to a single chunk index
    pub fn with_chunk_index(mut self, chunk_index: usize) -> Self {
        self.chunk_index = Some(chunk_index);
        self
    }

    /// True when no field is populated
    pub fn is_empty(&self) -> bool {
        self.document_id.is_none() && self.chunk_index.is_none()
    }

    /// Check whether metadata satisfies the filter
    pub fn matches(&self, metadata: &ChunkMetadata) -> bool {
        if let Some(document_id) = &self.document_id {
            if &metadata.document_id != document_id {
                return false;
            }
        }
        if let Some(chunk_index) = self.chunk_index {
            if metadata.chunk_index != chunk_index {
                return false;
            }
        }
        true
    }
}

/// Result of a filtered delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Entries were deleted; `count` is known only for stores that report it
    Deleted {
        /// Number of deleted entries, when reported
        count: Option<usize>,
    },

    /// Nothing matched the filter (or the namespace did not exist)
    NothingMatched,
}
