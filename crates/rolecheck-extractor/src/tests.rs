//! Integration tests for indexing, extraction and retrieval

#[cfg(test)]
mod tests {
    use crate::{
        Answer, ChunkConfig, ClearOutcome, ExtractorConfig, ExtractorError, IndexerConfig,
        QaConfig, RetrievalIndexer, RetrievalQa, RoleExtractor,
    };
    use rolecheck_domain::{
        DeleteOutcome, MetadataFilter, QueryMatch, VectorId, VectorRecord, VectorStore,
    };
    use rolecheck_llm::MockGenerator;
    use rolecheck_store::{HashEmbedder, MemoryVectorStore, StoreError};

    const DIMENSION: usize = 64;

    fn indexer_config(size: usize, overlap: usize) -> IndexerConfig {
        IndexerConfig {
            chunk: ChunkConfig::new(size, overlap),
            settle_delay_ms: 0,
        }
    }

    /// Store whose matches never carry chunk content
    struct ContentlessStore;

    impl VectorStore for ContentlessStore {
        type Error = StoreError;

        fn ensure_ready(&self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn upsert(&self, records: &[VectorRecord]) -> Result<usize, Self::Error> {
            Ok(records.len())
        }

        fn query(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<QueryMatch>, Self::Error> {
            Ok(vec![QueryMatch {
                id: VectorId::from_raw("foreign-1"),
                score: 0.9,
                document_id: None,
                chunk_index: None,
                content: None,
            }])
        }

        fn delete(&self, _filter: &MetadataFilter) -> Result<DeleteOutcome, Self::Error> {
            Ok(DeleteOutcome::NothingMatched)
        }

        fn delete_all(&self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_index_writes_every_chunk() {
        let store = MemoryVectorStore::new();
        let indexer =
            RetrievalIndexer::new(HashEmbedder::new(DIMENSION), &store, indexer_config(20, 5))
                .unwrap();

        let text = "The Data Analyst reports to the Project Manager every week.";
        let summary = indexer.index(text, "report.pdf").unwrap();

        assert_eq!(summary.document_id, "report.pdf");
        assert!(summary.chunks > 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.upserted, summary.chunks);
        assert_eq!(store.len(), summary.chunks);

        let mut indices: Vec<usize> = store
            .records_matching(&MetadataFilter::document("report.pdf"))
            .iter()
            .map(|record| record.metadata.chunk_index)
            .collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..summary.chunks).collect::<Vec<_>>());
    }

    #[test]
    fn test_index_skips_chunks_without_embedding() {
        let store = MemoryVectorStore::new();
        let indexer =
            RetrievalIndexer::new(HashEmbedder::new(DIMENSION), &store, indexer_config(10, 0))
                .unwrap();

        // Second window holds only punctuation, which embeds to nothing
        let text = "analyst ab..........engineer";
        let summary = indexer.index(text, "doc").unwrap();

        assert_eq!(summary.chunks, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.upserted, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_index_blank_text_is_noop() {
        let store = MemoryVectorStore::new();
        let indexer =
            RetrievalIndexer::new(HashEmbedder::new(DIMENSION), &store, indexer_config(10, 2))
                .unwrap();

        let summary = indexer.index("   \n\t ", "empty.pdf").unwrap();
        assert_eq!(summary.chunks, 0);
        assert_eq!(summary.upserted, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_index_reports_upsert_failure() {
        let store = MemoryVectorStore::new();
        store.set_unavailable(true);
        let indexer =
            RetrievalIndexer::new(HashEmbedder::new(DIMENSION), &store, indexer_config(50, 10))
                .unwrap();

        let result = indexer.index("Quality Assurance Tester", "doc");
        assert!(matches!(result, Err(ExtractorError::Store(_))));
    }

    #[test]
    fn test_clear_outcomes() {
        let store = MemoryVectorStore::new();
        let indexer =
            RetrievalIndexer::new(HashEmbedder::new(DIMENSION), &store, indexer_config(50, 10))
                .unwrap();

        assert_eq!(indexer.clear("never-indexed"), ClearOutcome::NothingToClear);

        indexer.index("Senior Software Engineer", "a").unwrap();
        indexer.index("Project Manager", "b").unwrap();
        assert_eq!(indexer.clear("a"), ClearOutcome::Cleared);
        assert!(store.records_matching(&MetadataFilter::document("a")).is_empty());
        assert_eq!(store.records_matching(&MetadataFilter::document("b")).len(), 1);

        store.set_unavailable(true);
        assert!(matches!(indexer.clear("b"), ClearOutcome::Failed(_)));
    }

    #[test]
    fn test_reindex_replaces_previous_chunks() {
        let store = MemoryVectorStore::new();
        let indexer =
            RetrievalIndexer::new(HashEmbedder::new(DIMENSION), &store, indexer_config(10, 0))
                .unwrap();

        indexer.index("alpha beta gamma delta epsilon", "doc").unwrap();
        let first = store.len();
        let summary = indexer.reindex("alpha", "doc").unwrap();

        assert!(first > 1);
        assert_eq!(summary.upserted, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_indexer_rejects_bad_chunking() {
        let result = RetrievalIndexer::new(
            HashEmbedder::new(DIMENSION),
            MemoryVectorStore::new(),
            indexer_config(10, 10),
        );
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_extractor_sends_one_prompt_with_document() {
        let generator = MockGenerator::new("Data Analyst, Project Manager, Data Analyst");
        let config = ExtractorConfig {
            prompt_template: "List the roles.".to_string(),
        };
        let extractor = RoleExtractor::new(&generator, config).unwrap();

        let roles = extractor.extract_roles("The Data Analyst and the Project Manager met.");

        assert_eq!(
            roles.into_iter().collect::<Vec<_>>(),
            vec!["Data Analyst".to_string(), "Project Manager".to_string()]
        );
        assert_eq!(
            generator.prompts(),
            vec![
                "List the roles.\n\nDocument Content:\nThe Data Analyst and the Project Manager met."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_extractor_none_reply_is_empty() {
        let extractor =
            RoleExtractor::new(MockGenerator::new("None."), ExtractorConfig::default()).unwrap();
        assert!(extractor.extract_roles("No staff mentioned here.").is_empty());
    }

    #[test]
    fn test_extractor_unparseable_reply_is_empty() {
        let extractor =
            RoleExtractor::new(MockGenerator::new("```\n , ,\n```"), ExtractorConfig::default())
                .unwrap();
        let roles = extractor.try_extract_roles("The QA Tester signed off.").unwrap();
        assert!(roles.is_empty());
    }

    #[test]
    fn test_extractor_blank_document_skips_generator() {
        let generator = MockGenerator::new("Data Analyst");
        let extractor = RoleExtractor::new(&generator, ExtractorConfig::default()).unwrap();

        assert!(extractor.extract_roles("  \n ").is_empty());
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_extractor_generator_failure() {
        let generator = MockGenerator::failing();
        let extractor = RoleExtractor::new(&generator, ExtractorConfig::default()).unwrap();

        assert!(extractor.extract_roles("The QA Tester signed off.").is_empty());
        assert!(matches!(
            extractor.try_extract_roles("The QA Tester signed off."),
            Err(ExtractorError::Llm(_))
        ));
    }

    #[test]
    fn test_extractor_rejects_blank_template() {
        let config = ExtractorConfig {
            prompt_template: "  ".to_string(),
        };
        assert!(RoleExtractor::new(MockGenerator::default(), config).is_err());
    }

    #[test]
    fn test_qa_answers_from_retrieved_chunks() {
        let store = MemoryVectorStore::new();
        let embedder = HashEmbedder::new(DIMENSION);
        let indexer = RetrievalIndexer::new(&embedder, &store, indexer_config(200, 20)).unwrap();
        indexer
            .index("The Project Manager approves every release.", "plan.pdf")
            .unwrap();

        let generator = MockGenerator::new("The Project Manager.");
        let qa = RetrievalQa::new(&embedder, &store, &generator, QaConfig::default()).unwrap();

        let answer = qa.ask("Who approves releases?").unwrap();
        assert_eq!(answer, Answer::Answered("The Project Manager.".to_string()));

        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("'Who approves releases?'"));
        assert!(prompts[0].contains("The Project Manager approves every release."));
        assert!(!prompts[0].contains("structured lists"));
    }

    #[test]
    fn test_qa_table_question_uses_table_prompt() {
        let store = MemoryVectorStore::new();
        let embedder = HashEmbedder::new(DIMENSION);
        let indexer = RetrievalIndexer::new(&embedder, &store, indexer_config(200, 20)).unwrap();
        indexer.index("Data Analyst 4\nQA Tester 2", "counts.pdf").unwrap();

        let generator = MockGenerator::new("4");
        let qa = RetrievalQa::new(&embedder, &store, &generator, QaConfig::default()).unwrap();

        qa.ask("How many Data Analyst positions are there?").unwrap();
        assert!(generator.prompts()[0].contains("tables or structured lists"));
    }

    #[test]
    fn test_qa_empty_store() {
        let generator = MockGenerator::default();
        let qa = RetrievalQa::new(
            HashEmbedder::new(DIMENSION),
            MemoryVectorStore::new(),
            &generator,
            QaConfig::default(),
        )
        .unwrap();

        assert_eq!(qa.ask("Who leads?").unwrap(), Answer::NoRelevantMatches);
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_qa_question_without_embedding() {
        let generator = MockGenerator::default();
        let qa = RetrievalQa::new(
            HashEmbedder::new(DIMENSION),
            MemoryVectorStore::new(),
            &generator,
            QaConfig::default(),
        )
        .unwrap();

        assert_eq!(qa.ask("???").unwrap(), Answer::NoQueryEmbedding);
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_qa_matches_without_content() {
        let generator = MockGenerator::default();
        let qa = RetrievalQa::new(
            HashEmbedder::new(DIMENSION),
            ContentlessStore,
            &generator,
            QaConfig::default(),
        )
        .unwrap();

        assert_eq!(qa.ask("Who leads?").unwrap(), Answer::NoRetrievedContent);
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn test_qa_propagates_store_and_generator_errors() {
        let store = MemoryVectorStore::new();
        let embedder = HashEmbedder::new(DIMENSION);
        let indexer = RetrievalIndexer::new(&embedder, &store, indexer_config(200, 20)).unwrap();
        indexer.index("Project Manager", "doc").unwrap();

        let failing = RetrievalQa::new(
            &embedder,
            &store,
            MockGenerator::failing(),
            QaConfig::default(),
        )
        .unwrap();
        assert!(matches!(failing.ask("Who?"), Err(ExtractorError::Llm(_))));

        store.set_unavailable(true);
        let qa = RetrievalQa::new(&embedder, &store, MockGenerator::default(), QaConfig::default())
            .unwrap();
        assert!(matches!(qa.ask("Who?"), Err(ExtractorError::Store(_))));
    }
}
