//! Document mapping between vendor/product pairs and Tantivy documents.

use tantivy::schema::Value;
use tantivy::{doc, TantivyDocument};

use crate::schema::CpeSchema;
use crate::SearchError;

/// Stored field values of one indexed pair, returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub vendor: String,
    pub product: String,
}

/// Convert a complete vendor/product pair to a Tantivy document.
///
/// Both fields are stored as given and indexed through the fragment
/// tokenizer. The doc_key field is left unpopulated.
pub fn pair_to_doc(schema: &CpeSchema, vendor: String, product: String) -> TantivyDocument {
    doc!(
        schema.vendor => vendor,
        schema.product => product
    )
}

/// Read the stored vendor/product values back out of a document.
pub fn entry_from_doc(schema: &CpeSchema, doc: &TantivyDocument) -> Result<IndexEntry, SearchError> {
    let vendor = doc
        .get_first(schema.vendor)
        .and_then(|v| v.as_str())
        .ok_or_else(|| SearchError::SchemaMismatch("missing stored vendor value".into()))?
        .to_string();

    let product = doc
        .get_first(schema.product)
        .and_then(|v| v.as_str())
        .ok_or_else(|| SearchError::SchemaMismatch("missing stored product value".into()))?
        .to_string();

    Ok(IndexEntry { vendor, product })
}
