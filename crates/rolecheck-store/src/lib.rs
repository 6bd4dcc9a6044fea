//! Rolecheck Storage Layer
//!
//! Implements the `Embedder` and `VectorStore` capabilities from
//! `rolecheck-domain`.
//!
//! # Architecture
//!
//! - `PineconeStore`: managed vector index reached over its REST API
//! - `MemoryVectorStore`: brute-force cosine search held in process memory
//! - `HashEmbedder`: deterministic bag-of-words embeddings, no model files
//!
//! # Examples
//!
//! ```
//! use rolecheck_domain::{Chunk, Embedder, VectorId, VectorRecord, VectorStore};
//! use rolecheck_store::{HashEmbedder, MemoryVectorStore};
//!
//! let embedder = HashEmbedder::new(64);
//! let store = MemoryVectorStore::new();
//!
//! let chunk = Chunk::new("doc", 0, "Project Manager");
//! let record = VectorRecord {
//!     id: VectorId::for_document("doc"),
//!     values: embedder.embed(&chunk.content).unwrap(),
//!     metadata: chunk.metadata(),
//! };
//! store.upsert(&[record]).unwrap();
//!
//! let hits = store.query(&embedder.embed("project manager").unwrap(), 5).unwrap();
//! assert_eq!(hits[0].content.as_deref(), Some("Project Manager"));
//! ```

#![warn(missing_docs)]

pub mod embedding;
pub mod memory;
pub mod pinecone;

use thiserror::Error;

pub use embedding::{cosine_similarity, HashEmbedder};
pub use memory::MemoryVectorStore;
pub use pinecone::{PineconeConfig, PineconeStore};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Network or transport failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// Non-success response from the vector database
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The named index does not exist
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// The index did not become ready in time
    #[error("Index not ready: {0}")]
    NotReady(String),

    /// Vector length differs from the index dimension
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        actual: usize,
    },

    /// A filtered delete was requested with no filter fields
    #[error("Refusing to delete with an empty filter; use delete_all to wipe the index")]
    EmptyFilter,

    /// The store is switched off
    #[error("Vector store unavailable")]
    Unavailable,

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid store configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::InvalidData(e.to_string())
        } else {
            StoreError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidData(format!("JSON parsing error: {}", e))
    }
}
