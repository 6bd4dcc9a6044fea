//! Retrieval indexing: chunk, embed, upsert

use crate::chunking::Chunker;
use crate::config::IndexerConfig;
use crate::error::ExtractorError;
use crate::types::{ClearOutcome, IndexSummary};
use rolecheck_domain::{
    DeleteOutcome, Embedder, MetadataFilter, VectorId, VectorRecord, VectorStore,
};
use std::fmt::Display;
use std::thread;
use tracing::{debug, info, warn};

/// Delete every vector of `document_id` from `store`
///
/// Never fails: a missing document is a no-op and store errors are logged
/// and reported as [`ClearOutcome::Failed`].
pub fn clear_document<S>(store: &S, document_id: &str) -> ClearOutcome
where
    S: VectorStore,
    S::Error: Display,
{
    match store.delete(&MetadataFilter::document(document_id)) {
        Ok(DeleteOutcome::Deleted { count }) => {
            match count {
                Some(count) => info!("Deleted {} vectors for document '{}'", count, document_id),
                None => info!("Deleted vectors for document '{}'", document_id),
            }
            ClearOutcome::Cleared
        }
        Ok(DeleteOutcome::NothingMatched) => {
            info!("No existing vectors for document '{}'", document_id);
            ClearOutcome::NothingToClear
        }
        Err(e) => {
            warn!(
                "Failed to clear document '{}': {}; re-indexing may leave duplicates",
                document_id, e
            );
            ClearOutcome::Failed(e.to_string())
        }
    }
}

/// Writes a document's chunks and their embeddings into a vector store
pub struct RetrievalIndexer<E, S> {
    embedder: E,
    store: S,
    chunker: Chunker,
    config: IndexerConfig,
}

impl<E, S> RetrievalIndexer<E, S>
where
    E: Embedder,
    S: VectorStore,
    E::Error: Display,
    S::Error: Display,
{
    /// Create a new indexer
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk configuration is invalid.
    pub fn new(embedder: E, store: S, config: IndexerConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self {
            embedder,
            store,
            chunker: Chunker::new(config.chunk.clone())?,
            config,
        })
    }

    /// Delete every vector of `document_id`
    ///
    /// See [`clear_document`].
    pub fn clear(&self, document_id: &str) -> ClearOutcome {
        clear_document(&self.store, document_id)
    }

    /// Clear the document, wait for the store to settle, then index it
    pub fn reindex(&self, text: &str, document_id: &str) -> Result<IndexSummary, ExtractorError> {
        if self.clear(document_id) == ClearOutcome::Cleared {
            let delay = self.config.settle_delay();
            if !delay.is_zero() {
                debug!("Waiting {:?} for deletions to propagate", delay);
                thread::sleep(delay);
            }
        }
        self.index(text, document_id)
    }

    /// Chunk, embed and upsert a document in one batch
    ///
    /// Blank text and chunks without an embedding are skipped and logged.
    /// Only a failed upsert is reported as an error.
    pub fn index(&self, text: &str, document_id: &str) -> Result<IndexSummary, ExtractorError> {
        let mut summary = IndexSummary {
            document_id: document_id.to_string(),
            ..IndexSummary::default()
        };

        if text.trim().is_empty() {
            info!("Document '{}' has no text; nothing to index", document_id);
            return Ok(summary);
        }

        let chunks = self.chunker.chunk_document(text, document_id);
        summary.chunks = chunks.len();
        debug!("Cut {} chunks from document '{}'", chunks.len(), document_id);

        let mut records = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            match self.embedder.embed(&chunk.content) {
                Ok(values) if !values.is_empty() => records.push(VectorRecord {
                    id: VectorId::for_document(document_id),
                    values,
                    metadata: chunk.metadata(),
                }),
                Ok(_) => {
                    warn!("No embedding for chunk {} of '{}'; skipping", chunk.index, document_id);
                    summary.skipped += 1;
                }
                Err(e) => {
                    warn!(
                        "Embedding chunk {} of '{}' failed: {}; skipping",
                        chunk.index, document_id, e
                    );
                    summary.skipped += 1;
                }
            }
        }

        if records.is_empty() {
            warn!("No embeddings generated for '{}'; nothing indexed", document_id);
            return Ok(summary);
        }

        summary.upserted = self
            .store
            .upsert(&records)
            .map_err(|e| ExtractorError::Store(e.to_string()))?;

        info!(
            "Indexed {} of {} chunks for document '{}'",
            summary.upserted, summary.chunks, document_id
        );
        Ok(summary)
    }
}
