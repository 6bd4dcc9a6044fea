//! The role check pipeline and the services it runs on.
//!
//! XML roles → clear + index → extract → reconcile → report. Every stage
//! after reading the inputs degrades instead of failing: an index that
//! cannot be written is logged and skipped, and extraction failures leave an
//! empty candidate list so the report still renders.

use crate::config::Config;
use crate::error::Result;
use rolecheck_domain::{Embedder, TextGenerator, VectorStore};
use rolecheck_extractor::{IndexSummary, RetrievalIndexer, RoleExtractor};
use rolecheck_llm::GeminiProvider;
use rolecheck_reconciler::{Reconciler, RoleReport};
use rolecheck_store::{PineconeConfig, PineconeStore};
use std::fmt::Display;
use std::path::Path;
use tracing::{info, warn};

/// Document id used when the PDF path has no file name
pub const FALLBACK_DOCUMENT_ID: &str = "uploaded-document";

/// Reconcile two role lists into a report
pub fn reconcile_report(
    reconciler: &Reconciler,
    authoritative: &[String],
    candidates: &[String],
) -> RoleReport {
    let result = reconciler.reconcile(authoritative, candidates);
    let report = RoleReport::new(authoritative, candidates, &result);
    info!(
        "Reconciled {} candidate roles against {} authoritative roles: {} matched, {} incorrect",
        report.candidate_count,
        report.authoritative_count,
        report.matched_roles.len(),
        report.incorrect_roles.len()
    );
    report
}

/// Id under which a PDF is indexed
pub fn document_id_for(pdf: &Path, explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| {
            pdf.file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| FALLBACK_DOCUMENT_ID.to_string())
}

/// Indexing, extraction and reconciliation wired to one set of services
pub struct Pipeline<E, S, G> {
    indexer: RetrievalIndexer<E, S>,
    extractor: RoleExtractor<G>,
    reconciler: Reconciler,
}

impl<E, S, G> Pipeline<E, S, G>
where
    E: Embedder,
    S: VectorStore,
    G: TextGenerator,
    E::Error: Display,
    S::Error: Display,
    G::Error: Display,
{
    /// Build the pipeline from validated configuration
    pub fn new(embedder: E, store: S, generator: G, config: &Config) -> Result<Self> {
        Ok(Self {
            indexer: RetrievalIndexer::new(embedder, store, config.indexer.clone())?,
            extractor: RoleExtractor::new(generator, config.extractor.clone())?,
            reconciler: Reconciler::new(config.reconciler.clone()),
        })
    }

    /// Clear the document's previous vectors and index it again
    ///
    /// Failures are logged; the check continues without an index.
    pub fn index(&self, document: &str, document_id: &str) -> Option<IndexSummary> {
        match self.indexer.reindex(document, document_id) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Indexing '{}' failed: {}; continuing without it", document_id, e);
                None
            }
        }
    }

    /// Run the check over already-read inputs
    pub fn check(
        &self,
        authoritative: &[String],
        document: &str,
        document_id: &str,
        skip_index: bool,
    ) -> RoleReport {
        if authoritative.is_empty() {
            warn!("No authoritative roles; every document role will be reported as incorrect");
        }

        if skip_index {
            info!("Skipping indexing of '{}'", document_id);
        } else {
            self.index(document, document_id);
        }

        let candidates: Vec<String> = self.extractor.extract_roles(document).into_iter().collect();
        reconcile_report(&self.reconciler, authoritative, &candidates)
    }
}

/// Gemini client from configuration
pub fn gemini_provider(config: &Config) -> Result<GeminiProvider> {
    let provider = GeminiProvider::new(config.google_api_key()?, config.llm.model.clone())?
        .with_embedding_model(
            config.llm.embedding_model.clone(),
            config.llm.embedding_dimension,
        );
    Ok(provider)
}

/// Pinecone client from configuration, with its index ready for use
pub fn pinecone_store(config: &Config) -> Result<PineconeStore> {
    let store = PineconeStore::new(PineconeConfig::new(
        config.pinecone_api_key()?,
        config.store.index_name.clone(),
        config.llm.embedding_dimension,
    ))?;
    store.ensure_ready()?;
    Ok(store)
}
