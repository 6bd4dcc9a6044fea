//! Deterministic text embeddings
//!
//! `HashEmbedder` turns text into vectors without model files or network
//! access. Each lowercase word is hashed into one of `dimension` buckets with
//! a hash-derived sign (feature hashing), and the result is normalized to unit
//! length. Texts sharing words therefore land close together under cosine
//! similarity, which is enough to exercise retrieval end to end.
//!
//! # Examples
//!
//! ```rust
//! use rolecheck_domain::Embedder;
//! use rolecheck_store::{cosine_similarity, HashEmbedder};
//!
//! let model = HashEmbedder::new(128);
//! let a = model.embed("Senior Data Analyst").unwrap();
//! let b = model.embed("data analyst").unwrap();
//! let c = model.embed("forklift operator").unwrap();
//! assert!(cosine_similarity(&a, &b) > cosine_similarity(&a, &c));
//! ```

use crate::StoreError;
use rolecheck_domain::Embedder;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Feature-hashing embedder
///
/// Embeddings are:
///
/// - **Deterministic**: Same text always produces the same vector
/// - **Normalized**: Unit length, ready for cosine similarity
/// - **Empty for wordless text**: blank or symbol-only input yields `[]`
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create a new embedder producing vectors of `dimension` values
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_word(word: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        word.hash(&mut hasher);
        hasher.finish()
    }
}

impl Embedder for HashEmbedder {
    type Error = StoreError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        if self.dimension == 0 {
            return Err(StoreError::Config("Embedding dimension must be positive".to_string()));
        }

        let lowered = text.to_lowercase();
        let words = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty());

        let mut embedding = vec![0.0f32; self.dimension];
        let mut any = false;
        for word in words {
            let hash = Self::hash_word(word);
            let bucket = (hash % self.dimension as u64) as usize;
            let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
            any = true;
        }

        if !any {
            return Ok(Vec::new());
        }

        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Calculate cosine similarity between two embedding vectors
///
/// Returns a value in `[-1, 1]`; vectors of different lengths or with zero
/// magnitude score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot_product / (magnitude_a * magnitude_b)
}
