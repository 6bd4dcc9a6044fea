//! In-memory vector store
//!
//! Exact nearest-neighbour search by cosine similarity over every stored
//! record. Suitable for tests and small offline runs; state lives only as
//! long as the store.

use crate::embedding::cosine_similarity;
use crate::StoreError;
use rolecheck_domain::{DeleteOutcome, MetadataFilter, QueryMatch, VectorRecord, VectorStore};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// A `VectorStore` held in process memory
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryVectorStore {
    dimension: Option<usize>,
    records: Arc<Mutex<BTreeMap<String, VectorRecord>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryVectorStore {
    /// Create an empty store accepting vectors of any length
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects vectors not of `dimension` values
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: Some(dimension),
            ..Self::default()
        }
    }

    /// Make every subsequent operation fail with [`StoreError::Unavailable`]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// True when the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Copies of the records whose metadata matches `filter`, ordered by id
    pub fn records_matching(&self, filter: &MetadataFilter) -> Vec<VectorRecord> {
        self.records()
            .values()
            .filter(|record| filter.matches(&record.metadata))
            .cloned()
            .collect()
    }

    fn records(&self) -> MutexGuard<'_, BTreeMap<String, VectorRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn check_dimension(&self, actual: usize) -> Result<(), StoreError> {
        match self.dimension {
            Some(expected) if expected != actual => {
                Err(StoreError::DimensionMismatch { expected, actual })
            }
            _ => Ok(()),
        }
    }
}

impl VectorStore for MemoryVectorStore {
    type Error = StoreError;

    fn ensure_ready(&self) -> Result<(), Self::Error> {
        self.check_available()
    }

    fn upsert(&self, records: &[VectorRecord]) -> Result<usize, Self::Error> {
        self.check_available()?;
        for record in records {
            self.check_dimension(record.values.len())?;
        }

        let mut stored = self.records();
        for record in records {
            stored.insert(record.id.as_str().to_string(), record.clone());
        }
        debug!("Upserted {} records ({} total)", records.len(), stored.len());

        Ok(records.len())
    }

    fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, Self::Error> {
        self.check_available()?;
        self.check_dimension(vector.len())?;

        let mut matches: Vec<QueryMatch> = self
            .records()
            .values()
            .map(|record| QueryMatch {
                id: record.id.clone(),
                score: cosine_similarity(vector, &record.values),
                document_id: Some(record.metadata.document_id.clone()),
                chunk_index: Some(record.metadata.chunk_index),
                content: Some(record.metadata.content.clone()),
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches.truncate(top_k);

        Ok(matches)
    }

    fn delete(&self, filter: &MetadataFilter) -> Result<DeleteOutcome, Self::Error> {
        self.check_available()?;
        if filter.is_empty() {
            return Err(StoreError::EmptyFilter);
        }

        let mut stored = self.records();
        let before = stored.len();
        stored.retain(|_, record| !filter.matches(&record.metadata));
        let removed = before - stored.len();

        if removed == 0 {
            Ok(DeleteOutcome::NothingMatched)
        } else {
            Ok(DeleteOutcome::Deleted {
                count: Some(removed),
            })
        }
    }

    fn delete_all(&self) -> Result<(), Self::Error> {
        self.check_available()?;
        self.records().clear();
        Ok(())
    }
}
