//! Shared fixtures for end-to-end tests of the CPE index.

use cpe_types::{MemoryPairSource, VendorProductPair};

/// Number of complete pairs in [`nvd_fixture`].
pub const FIXTURE_COMPLETE_PAIRS: i64 = 6;

/// A small vendor/product snapshot shaped like NVD CPE data.
///
/// Contains one incomplete pair (missing vendor) that must never be indexed.
pub fn nvd_fixture() -> MemoryPairSource {
    MemoryPairSource::new(fixture_pairs().into_iter().collect()).with_pair(
        VendorProductPair::new(None, Some("orphan_product".to_string())),
    )
}

/// The complete pairs of [`nvd_fixture`].
pub fn fixture_pairs() -> Vec<VendorProductPair> {
    [
        ("apache", "struts"),
        ("apache", "tomcat"),
        ("microsoft", "internet_explorer"),
        ("oracle", "mysql"),
        ("eclipse", "jetty"),
        ("redhat", "openshift"),
    ]
    .into_iter()
    .map(|(vendor, product)| VendorProductPair::complete(vendor, product))
    .collect()
}
