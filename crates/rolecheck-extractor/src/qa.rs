//! Retrieval question answering over indexed documents

use crate::config::QaConfig;
use crate::error::ExtractorError;
use crate::prompt::answer_prompt;
use crate::types::Answer;
use rolecheck_domain::{Embedder, TextGenerator, VectorStore};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Characters of each match logged for inspection
const PREVIEW_CHARS: usize = 100;

/// Answers questions from the chunks most similar to the question
pub struct RetrievalQa<E, S, G> {
    embedder: E,
    store: S,
    generator: G,
    config: QaConfig,
}

impl<E, S, G> RetrievalQa<E, S, G>
where
    E: Embedder,
    S: VectorStore,
    G: TextGenerator,
    E::Error: Display,
    S::Error: Display,
    G::Error: Display,
{
    /// Create a new question answerer
    pub fn new(embedder: E, store: S, generator: G, config: QaConfig) -> Result<Self, ExtractorError> {
        config.validate()?;
        Ok(Self {
            embedder,
            store,
            generator,
            config,
        })
    }

    /// Answer `question` from the top-k retrieved chunks
    ///
    /// # Errors
    ///
    /// Returns an error if the store query or the generation call fails.
    pub fn ask(&self, question: &str) -> Result<Answer, ExtractorError> {
        let embedding = match self.embedder.embed(question) {
            Ok(values) if !values.is_empty() => values,
            Ok(_) => return Ok(Answer::NoQueryEmbedding),
            Err(e) => {
                warn!("Embedding the question failed: {}", e);
                return Ok(Answer::NoQueryEmbedding);
            }
        };

        let matches = self
            .store
            .query(&embedding, self.config.top_k)
            .map_err(|e| ExtractorError::Store(e.to_string()))?;

        info!("Retrieved {} matches", matches.len());
        for hit in &matches {
            let preview: String = hit
                .content
                .as_deref()
                .unwrap_or_default()
                .chars()
                .take(PREVIEW_CHARS)
                .collect();
            debug!("  {} (score {:.4}): {}", hit.id, hit.score, preview);
        }

        if matches.is_empty() {
            return Ok(Answer::NoRelevantMatches);
        }

        let mut contexts = Vec::with_capacity(matches.len());
        for hit in &matches {
            match &hit.content {
                Some(content) => contexts.push(content.as_str()),
                None => warn!("No content metadata for vector {}", hit.id),
            }
        }

        if contexts.is_empty() {
            return Ok(Answer::NoRetrievedContent);
        }

        let prompt = answer_prompt(question, &contexts.join("\n\n"));
        let answer = self
            .generator
            .generate(&prompt)
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        Ok(Answer::Answered(answer))
    }
}
