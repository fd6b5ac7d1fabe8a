//! The data-source seam consumed by the index builder.

use std::collections::HashSet;

use crate::error::DataSourceError;
use crate::pair::VendorProductPair;

/// Supplier of the vendor/product pairs to index.
///
/// Implemented by the vulnerability database in production; the index builder
/// consumes this exactly once per build generation.
pub trait PairSource {
    /// Return the full set of known vendor/product pairs.
    fn vendor_product_pairs(&self) -> Result<HashSet<VendorProductPair>, DataSourceError>;
}

/// A set-backed pair source for tests and in-process embedders.
#[derive(Debug, Clone, Default)]
pub struct MemoryPairSource {
    pairs: HashSet<VendorProductPair>,
}

impl MemoryPairSource {
    /// Create a source over an existing pair set.
    pub fn new(pairs: HashSet<VendorProductPair>) -> Self {
        Self { pairs }
    }

    /// Create a source from complete (vendor, product) tuples.
    pub fn from_pairs<V, P>(pairs: impl IntoIterator<Item = (V, P)>) -> Self
    where
        V: Into<String>,
        P: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(v, p)| VendorProductPair::complete(v, p))
                .collect(),
        }
    }

    /// Add a pair, returning self for chaining.
    pub fn with_pair(mut self, pair: VendorProductPair) -> Self {
        self.pairs.insert(pair);
        self
    }

    /// Number of pairs held, complete or not.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the source holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PairSource for MemoryPairSource {
    fn vendor_product_pairs(&self) -> Result<HashSet<VendorProductPair>, DataSourceError> {
        Ok(self.pairs.clone())
    }
}
