//! Query-string construction helpers.
//!
//! Callers identifying a dependency usually know candidate vendor and product
//! text and want the fielded lookup `vendor:(...) AND product:(...)`. The
//! helpers here build that string from raw caller text without letting query
//! grammar metacharacters change the query structure.

use crate::schema::{PRODUCT, VENDOR};

/// Characters with meaning in the query grammar.
const QUERY_METACHARS: &[char] = &[
    '+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\', '/', '\'',
];

/// Neutralize query grammar metacharacters in caller-supplied text.
///
/// Metacharacters become spaces rather than being escaped: the fragment
/// strategy splits on them anyway, and space is valid in every grammar
/// position.
pub fn sanitize_term(text: &str) -> String {
    text.chars()
        .map(|c| if QUERY_METACHARS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Build the fielded lookup query for a vendor/product candidate.
///
/// Both sides are sanitized; the result parses under the index's query
/// grammar and requires a match in each field.
pub fn vendor_product_query(vendor: &str, product: &str) -> String {
    format!(
        "{}:({}) AND {}:({})",
        VENDOR,
        sanitize_term(vendor).trim(),
        PRODUCT,
        sanitize_term(product).trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_corpus, BuildConfig};
    use crate::searcher::CpeSearcher;
    use cpe_types::MemoryPairSource;

    #[test]
    fn test_sanitize_passes_plain_text() {
        assert_eq!(sanitize_term("apache struts"), "apache struts");
    }

    #[test]
    fn test_sanitize_replaces_metachars() {
        assert_eq!(sanitize_term("log4j:core (2.x)"), "log4j core  2.x ");
        assert_eq!(sanitize_term("a\\b\"c"), "a b c");
    }

    #[test]
    fn test_vendor_product_query_format() {
        let query = vendor_product_query("apache", "struts");
        assert_eq!(query, "vendor:(apache) AND product:(struts)");
    }

    #[test]
    fn test_vendor_product_query_executes() {
        let source = MemoryPairSource::from_pairs([
            ("apache", "struts"),
            ("apache", "tomcat"),
            ("eclipse", "jetty"),
        ]);
        let index = build_corpus(&source, &BuildConfig::default()).unwrap();
        let searcher = CpeSearcher::new(&index).unwrap();

        let query = vendor_product_query("apache", "struts");
        let hits = searcher.search(&query, 10).unwrap();

        assert!(!hits.is_empty());
        let top = searcher.document(hits[0].address).unwrap();
        assert_eq!(top.vendor, "apache");
        assert_eq!(top.product, "struts");
    }

    #[test]
    fn test_sanitized_metachars_still_parse() {
        let source = MemoryPairSource::from_pairs([("apache", "struts")]);
        let index = build_corpus(&source, &BuildConfig::default()).unwrap();
        let searcher = CpeSearcher::new(&index).unwrap();

        // Raw "struts:core" would be a field reference; sanitized it parses
        let query = vendor_product_query("apache", "struts:core");
        let hits = searcher.search(&query, 10).unwrap();
        assert!(!hits.is_empty());
    }
}
