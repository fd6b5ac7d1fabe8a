//! # cpe-search
//!
//! In-memory full-text search over CPE vendor/product pairs using Tantivy.
//!
//! The index maps the vendor/product combinations from a vulnerability
//! dataset into a searchable corpus, so free text (a detected library name,
//! a filename fragment) can be resolved to candidate vendor/product
//! identifiers.
//!
//! ## Features
//! - Reference-counted open/build/close: the corpus is built on first open
//!   and torn down on last close, shared by all users in between
//! - Entirely in RAM; rebuilt from the data source each open cycle
//! - Dual tokenization: exact-match key field, fragment-tokenized vendor and
//!   product fields for partial-text matching
//! - BM25-ranked results with verbatim stored-field retrieval
//!
//! ## Usage
//!
//! ```rust
//! use cpe_search::CpeMemoryIndex;
//! use cpe_types::MemoryPairSource;
//!
//! let source = MemoryPairSource::from_pairs([("apache", "struts")]);
//! let index = CpeMemoryIndex::new();
//!
//! index.open(&source).unwrap();
//! let hits = index.search("product:strut", 10).unwrap();
//! let entry = index.document(hits[0].address).unwrap();
//! assert_eq!(entry.product, "struts");
//! index.close();
//! ```

pub mod analyzer;
pub mod builder;
pub mod document;
pub mod error;
pub mod lifecycle;
pub mod query;
pub mod schema;
pub mod searcher;

pub use analyzer::{fragment_analyzer, register_fragment_tokenizer, FRAGMENT_TOKENIZER};
pub use builder::{build_corpus, BuildConfig};
pub use document::{entry_from_doc, pair_to_doc, IndexEntry};
pub use error::SearchError;
pub use lifecycle::{CpeMemoryIndex, NOT_READY};
pub use query::{sanitize_term, vendor_product_query};
pub use schema::{build_cpe_schema, CpeSchema, DOC_KEY, PRODUCT, VENDOR};
pub use searcher::{CpeSearcher, SearchHit};
