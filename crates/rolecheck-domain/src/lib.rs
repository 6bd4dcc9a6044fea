//! Rolecheck Domain Layer
//!
//! This crate contains the domain model shared by every other Rolecheck crate.
//! It performs no I/O and defines the value objects and capability traits that
//! the infrastructure layers implement.
//!
//! ## Key Concepts
//!
//! - **Chunk**: A bounded, possibly overlapping slice of a document's text
//! - **VectorRecord**: A chunk together with its embedding, keyed by a unique id
//! - **Capabilities**: `TextGenerator`, `Embedder` and `VectorStore` describe the
//!   external services the pipeline talks to
//!
//! ## Architecture
//!
//! - Pure data types and trait definitions only
//! - Implementations live in `rolecheck-llm` and `rolecheck-store`
//! - Consumers receive capabilities through their constructors, never globals

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chunk;
pub mod traits;

// Re-exports for convenience
pub use chunk::{Chunk, ChunkMetadata, QueryMatch, VectorId, VectorRecord};
pub use traits::{DeleteOutcome, Embedder, MetadataFilter, TextGenerator, VectorStore};
