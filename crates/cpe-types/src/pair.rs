//! Vendor/product identifier pairs.
//!
//! One pair per known CPE vendor/product combination. Either side may be
//! absent: the upstream vulnerability database can hold NULL columns, and
//! such pairs are filtered out before indexing rather than rejected at the
//! source.

use serde::{Deserialize, Serialize};

/// A vendor/product identifier pair from the vulnerability dataset.
///
/// Pairs are compared and hashed by value so a source can hand them over as a
/// deduplicated set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorProductPair {
    /// Vendor identifier, e.g. "apache". `None` when the record is incomplete.
    pub vendor: Option<String>,

    /// Product identifier, e.g. "struts". `None` when the record is incomplete.
    pub product: Option<String>,
}

impl VendorProductPair {
    /// Create a pair where either side may be absent.
    pub fn new(vendor: Option<String>, product: Option<String>) -> Self {
        Self { vendor, product }
    }

    /// Create a pair with both sides present.
    pub fn complete(vendor: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            vendor: Some(vendor.into()),
            product: Some(product.into()),
        }
    }

    /// Whether both sides are present and non-empty.
    ///
    /// Only complete pairs are indexable; the builder skips the rest.
    pub fn is_complete(&self) -> bool {
        matches!(&self.vendor, Some(v) if !v.is_empty())
            && matches!(&self.product, Some(p) if !p.is_empty())
    }
}
