//! Search error types.

use tantivy::DocAddress;
use thiserror::Error;

use cpe_types::DataSourceError;

/// Errors that can occur during index build and search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Tantivy index error
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),

    /// Query parse error
    #[error("Query parse error: {0}")]
    QueryParse(#[from] tantivy::query::QueryParserError),

    /// Empty or blank query text
    #[error("Query is null or empty")]
    EmptyQuery,

    /// The pair source failed while the corpus was being built
    #[error("Error reading CPE data: {0}")]
    DataSource(#[from] DataSourceError),

    /// Document handle is not valid for the open generation
    #[error("Document not found: segment {}, doc {}", .0.segment_ord, .0.doc_id)]
    DocumentNotFound(DocAddress),

    /// Operation requires an open index
    #[error("Index is not open")]
    Closed,

    /// Index lock is poisoned (a holder panicked)
    #[error("Index is locked: {0}")]
    IndexLocked(String),

    /// Schema mismatch
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}
