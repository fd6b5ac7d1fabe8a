//! Error types for pair data sources.

use thiserror::Error;

/// Errors raised while reading vendor/product pairs from a data source.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The underlying store rejected or failed the read
    #[error("Data access error: {0}")]
    Access(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
