//! Snapshot loading errors.
//!
//! Every failure carries the CSV line (1-based, header is line 1) or the
//! file path, so a bad export can be fixed at the source.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("Duplicate inventory row for product {0}")]
    DuplicateProduct(String),

    #[error("Duplicate sales row for product {product_id} on {date}")]
    DuplicateSalesRow { product_id: String, date: String },
}

pub type LoadResult<T> = Result<T, LoadError>;
