//! Corpus builder: streams vendor/product pairs into an in-memory index.
//!
//! The corpus is built once per open generation and never mutated afterward;
//! a failed build publishes nothing.

use serde::{Deserialize, Serialize};
use tantivy::{Index, IndexWriter};
use tracing::{debug, info};

use cpe_types::PairSource;

use crate::analyzer::register_fragment_tokenizer;
use crate::document::pair_to_doc;
use crate::schema::build_cpe_schema;
use crate::SearchError;

/// Default memory budget for the index writer (50MB)
const DEFAULT_WRITER_MEMORY_MB: usize = 50;

/// Corpus build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Memory budget for the writer in MB
    #[serde(default = "default_writer_memory_mb")]
    pub writer_memory_mb: usize,
}

fn default_writer_memory_mb() -> usize {
    DEFAULT_WRITER_MEMORY_MB
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            writer_memory_mb: DEFAULT_WRITER_MEMORY_MB,
        }
    }
}

impl BuildConfig {
    pub fn with_memory_mb(mut self, mb: usize) -> Self {
        self.writer_memory_mb = mb;
        self
    }
}

/// Build an immutable in-memory corpus from a pair source.
///
/// Incomplete pairs (either side absent or empty) are skipped. Any failure,
/// from the source or while finalizing the index, aborts the build; the
/// partially written corpus is discarded with the returned error.
pub fn build_corpus(source: &dyn PairSource, config: &BuildConfig) -> Result<Index, SearchError> {
    let pairs = source.vendor_product_pairs()?;

    let schema = build_cpe_schema();
    let index = Index::create_in_ram(schema.schema().clone());
    register_fragment_tokenizer(&index)?;

    // One writer thread keeps the segment count low; document construction
    // is trivial next to tokenization.
    let memory_budget = config.writer_memory_mb * 1024 * 1024;
    let mut writer: IndexWriter = index.writer_with_num_threads(1, memory_budget)?;

    let mut indexed = 0usize;
    let mut skipped = 0usize;
    for pair in pairs {
        if !pair.is_complete() {
            skipped += 1;
            continue;
        }
        // is_complete guarantees both sides are present
        let vendor = pair.vendor.unwrap_or_default();
        let product = pair.product.unwrap_or_default();
        writer.add_document(pair_to_doc(&schema, vendor, product))?;
        indexed += 1;
    }

    writer.commit()?;
    writer.wait_merging_threads()?;
    debug!(memory_mb = config.writer_memory_mb, "Finalized corpus writer");
    info!(indexed, skipped, "Built CPE corpus");

    Ok(index)
}
