//! Result types for indexing and retrieval

use serde::Serialize;

/// Outcome of clearing a document from the vector store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ClearOutcome {
    /// Vectors of the document were deleted
    Cleared,
    /// The store held nothing for the document
    NothingToClear,
    /// The delete failed; indexing may leave duplicate vectors
    Failed(String),
}

/// Counters for one indexing run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    /// Document id
    pub document_id: String,
    /// Chunks cut from the document
    pub chunks: usize,
    /// Chunks skipped because no embedding was produced
    pub skipped: usize,
    /// Vectors the store reported as written
    pub upserted: usize,
}

/// Answer to a retrieval question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "answer", rename_all = "snake_case")]
pub enum Answer {
    /// The question could not be embedded
    NoQueryEmbedding,
    /// The store returned no matches
    NoRelevantMatches,
    /// Matches carried no chunk content
    NoRetrievedContent,
    /// Generated answer
    Answered(String),
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Answer::NoQueryEmbedding => write!(f, "Could not generate query embedding."),
            Answer::NoRelevantMatches => write!(f, "No relevant information found in the document."),
            Answer::NoRetrievedContent => write!(f, "No content retrieved from relevant chunks."),
            Answer::Answered(text) => write!(f, "{}", text),
        }
    }
}
