//! Chunk module - the unit of retrieval indexing

use std::fmt;

/// Unique identifier for a stored vector
///
/// Ids are scoped by document: `<document_id>-<uuidv7 hex>`. The document prefix
/// keeps ids readable in the vector store console, the UUIDv7 suffix keeps them
/// unique across re-indexing runs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorId(String);

impl VectorId {
    /// Generate a fresh id for a vector belonging to `document_id`
    ///
    /// # Examples
    ///
    /// ```
    /// use rolecheck_domain::VectorId;
    ///
    /// let id = VectorId::for_document("doc-001");
    /// assert!(id.as_str().starts_with("doc-001-"));
    /// assert_ne!(id, VectorId::for_document("doc-001"));
    /// ```
    pub fn for_document(document_id: &str) -> Self {
        Self(format!("{}-{}", document_id, uuid::Uuid::now_v7().simple()))
    }

    /// Wrap an id received from a vector store
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contiguous window of a document's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Document the chunk was cut from
    pub document_id: String,

    /// Ordinal position of the chunk within the document (0-based)
    pub index: usize,

    /// Text content of the window
    pub content: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(document_id: impl Into<String>, index: usize, content: impl Into<String>) -> Self {
        Self {
            document_id: document_id.into(),
            index,
            content: content.into(),
        }
    }

    /// Metadata stored alongside the chunk's vector
    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            document_id: self.document_id.clone(),
            chunk_index: self.index,
            content: self.content.clone(),
        }
    }
}

/// Metadata carried by every vector store entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Originating document id
    pub document_id: String,

    /// Ordinal index of the chunk
    pub chunk_index: usize,

    /// Chunk text, returned to callers at query time
    pub content: String,
}

/// An embedding ready to be upserted
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    /// Unique id of the entry
    pub id: VectorId,

    /// Embedding values
    pub values: Vec<f32>,

    /// Chunk metadata
    pub metadata: ChunkMetadata,
}

/// A ranked hit returned by a vector store query
///
/// Metadata fields are optional because remote stores may hold entries
/// written by other tools.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMatch {
    /// Id of the matched entry
    pub id: VectorId,

    /// Similarity score (higher is closer)
    pub score: f32,

    /// `document_id` metadata, if present
    pub document_id: Option<String>,

    /// `chunk_index` metadata, if present
    pub chunk_index: Option<usize>,

    /// `content` metadata, if present
    pub content: Option<String>,
}
