//! Rolecheck Extractor
//!
//! Turns document text into retrievable chunks and candidate roles.
//!
//! # Architecture
//!
//! ```text
//! Text → Chunker → Embedder → VectorStore        (RetrievalIndexer)
//! Text → prompt → TextGenerator → role list      (RoleExtractor)
//! Question → Embedder → VectorStore → TextGenerator   (RetrievalQa)
//! ```
//!
//! Capabilities are injected through constructors; nothing here performs I/O
//! on its own.
//!
//! # Example Usage
//!
//! ```
//! use rolecheck_extractor::{ExtractorConfig, RoleExtractor};
//! use rolecheck_llm::MockGenerator;
//!
//! let generator = MockGenerator::new("Data Analyst, QA Tester");
//! let extractor = RoleExtractor::new(generator, ExtractorConfig::default()).unwrap();
//!
//! let roles = extractor.extract_roles("Our Data Analyst works with the QA Tester.");
//! assert_eq!(roles.len(), 2);
//! assert!(roles.contains("QA Tester"));
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod indexer;
mod parser;
mod prompt;
mod qa;
mod types;

#[cfg(test)]
mod tests;

pub use chunking::Chunker;
pub use config::{Charset, ChunkConfig, ExtractorConfig, IndexerConfig, QaConfig};
pub use error::ExtractorError;
pub use extractor::RoleExtractor;
pub use indexer::{clear_document, RetrievalIndexer};
pub use parser::{parse_role_list, RoleReply};
pub use prompt::{answer_prompt, is_table_question, role_extraction_prompt, DEFAULT_ROLE_PROMPT};
pub use qa::RetrievalQa;
pub use types::{Answer, ClearOutcome, IndexSummary};
