//! Query execution over a finalized corpus.
//!
//! Wraps the read view and query parser for one index generation. Free text
//! searches the vendor and product fields; field-qualified syntax
//! (`product:strut`) narrows to one field.

use tantivy::collector::TopDocs;
use tantivy::query::{Query, QueryParser};
use tantivy::{DocAddress, Index, IndexReader, ReloadPolicy, Score, TantivyDocument};
use tracing::debug;

use crate::document::{entry_from_doc, IndexEntry};
use crate::schema::CpeSchema;
use crate::SearchError;

/// A ranked search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Engine-assigned document handle, valid for this generation only
    pub address: DocAddress,
    /// BM25 relevance score
    pub score: Score,
}

/// Searcher bound to one corpus generation.
pub struct CpeSearcher {
    reader: IndexReader,
    schema: CpeSchema,
    query_parser: QueryParser,
}

impl CpeSearcher {
    /// Create a searcher over a finalized corpus.
    ///
    /// The corpus is immutable, so the reader never needs reloading.
    pub fn new(index: &Index) -> Result<Self, SearchError> {
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        let schema = CpeSchema::from_schema(index.schema())?;
        let query_parser = QueryParser::for_index(index, vec![schema.vendor, schema.product]);

        Ok(Self {
            reader,
            schema,
            query_parser,
        })
    }

    /// Search with a query string, returning up to `max_results` hits in
    /// descending score order.
    ///
    /// Empty or blank text is rejected with `SearchError::EmptyQuery` rather
    /// than silently matching nothing.
    pub fn search(&self, query_str: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        if query_str.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let query = self.query_parser.parse_query(query_str)?;
        debug!(query = query_str, "Parsed search query");
        self.search_query(&*query, max_results)
    }

    /// Execute a pre-built query.
    pub fn search_query(
        &self,
        query: &dyn Query,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        // TopDocs rejects a zero limit
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(query, &TopDocs::with_limit(max_results))?;

        Ok(top_docs
            .into_iter()
            .map(|(score, address)| SearchHit { address, score })
            .collect())
    }

    /// Retrieve the stored vendor/product values for a document handle.
    pub fn document(&self, address: DocAddress) -> Result<IndexEntry, SearchError> {
        let searcher = self.reader.searcher();

        let segment = searcher
            .segment_readers()
            .get(address.segment_ord as usize)
            .ok_or(SearchError::DocumentNotFound(address))?;
        if address.doc_id >= segment.max_doc() {
            return Err(SearchError::DocumentNotFound(address));
        }

        let doc: TantivyDocument = searcher.doc(address)?;
        entry_from_doc(&self.schema, &doc)
    }

    /// Number of documents in the corpus.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}
