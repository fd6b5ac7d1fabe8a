//! Tantivy schema definition for the CPE index.
//!
//! One document per vendor/product pair, with both sides stored verbatim
//! and indexed through the fragment tokenizer.

use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING,
};

use crate::analyzer::FRAGMENT_TOKENIZER;
use crate::SearchError;

/// Exact-match key field. Reserved for internal addressing; not populated
/// with pair data.
pub const DOC_KEY: &str = "doc_key";
/// Vendor identifier field, e.g. "apache".
pub const VENDOR: &str = "vendor";
/// Product identifier field, e.g. "struts".
pub const PRODUCT: &str = "product";

/// Schema field handles for efficient access
#[derive(Debug, Clone)]
pub struct CpeSchema {
    schema: Schema,
    /// Document key (STRING | STORED, raw tokenizer)
    pub doc_key: Field,
    /// Vendor name (stored, fragment-tokenized)
    pub vendor: Field,
    /// Product name (stored, fragment-tokenized)
    pub product: Field,
}

impl CpeSchema {
    /// Get the underlying Tantivy schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Create a CpeSchema from an existing Tantivy Schema
    pub fn from_schema(schema: Schema) -> Result<Self, SearchError> {
        let doc_key = schema
            .get_field(DOC_KEY)
            .map_err(|_| SearchError::SchemaMismatch("missing doc_key field".into()))?;
        let vendor = schema
            .get_field(VENDOR)
            .map_err(|_| SearchError::SchemaMismatch("missing vendor field".into()))?;
        let product = schema
            .get_field(PRODUCT)
            .map_err(|_| SearchError::SchemaMismatch("missing product field".into()))?;

        Ok(Self {
            schema,
            doc_key,
            vendor,
            product,
        })
    }
}

/// Build the CPE index schema.
///
/// Schema fields:
/// - doc_key: STRING | STORED - exact-match key, unpopulated in the base design
/// - vendor: stored text, fragment-tokenized with positions
/// - product: stored text, fragment-tokenized with positions
///
/// Positions are required: a multi-fragment query term compiles to a phrase
/// over consecutive fragments.
pub fn build_cpe_schema() -> CpeSchema {
    let mut schema_builder = Schema::builder();

    let doc_key = schema_builder.add_text_field(DOC_KEY, STRING | STORED);

    let fragment_indexing = TextFieldIndexing::default()
        .set_tokenizer(FRAGMENT_TOKENIZER)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let fragment_text = TextOptions::default()
        .set_indexing_options(fragment_indexing)
        .set_stored();

    let vendor = schema_builder.add_text_field(VENDOR, fragment_text.clone());
    let product = schema_builder.add_text_field(PRODUCT, fragment_text);

    let schema = schema_builder.build();

    CpeSchema {
        schema,
        doc_key,
        vendor,
        product,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_schema() {
        let schema = build_cpe_schema();
        assert!(schema.schema.get_field(DOC_KEY).is_ok());
        assert!(schema.schema.get_field(VENDOR).is_ok());
        assert!(schema.schema.get_field(PRODUCT).is_ok());
    }

    #[test]
    fn test_from_schema() {
        let original = build_cpe_schema();
        let rebuilt = CpeSchema::from_schema(original.schema().clone()).unwrap();
        assert_eq!(rebuilt.doc_key, original.doc_key);
        assert_eq!(rebuilt.vendor, original.vendor);
        assert_eq!(rebuilt.product, original.product);
    }

    #[test]
    fn test_from_schema_mismatch() {
        let foreign = Schema::builder().build();
        let err = CpeSchema::from_schema(foreign).unwrap_err();
        assert!(matches!(err, SearchError::SchemaMismatch(_)));
    }
}
