//! # cpe-types
//!
//! Shared domain types for the CPE in-memory search index.
//!
//! This crate defines the data contract between the vulnerability database
//! (or any other supplier of vendor/product identifiers) and the search core:
//! - `VendorProductPair`: one CPE vendor/product identifier pair
//! - `PairSource`: the data-source seam the index builder consumes
//! - `MemoryPairSource`: a set-backed source for tests and embedders
//!
//! ## Usage
//!
//! ```rust
//! use cpe_types::{MemoryPairSource, PairSource, VendorProductPair};
//!
//! let source = MemoryPairSource::from_pairs([("apache", "struts")]);
//! let pairs = source.vendor_product_pairs().unwrap();
//! assert!(pairs.contains(&VendorProductPair::complete("apache", "struts")));
//! ```

pub mod error;
pub mod pair;
pub mod source;

pub use error::DataSourceError;
pub use pair::VendorProductPair;
pub use source::{MemoryPairSource, PairSource};
