//! Worker error types

use thiserror::Error;

/// Internal catalog-loading failures. These never escape the public
/// accessors: callers get an empty catalog and the import keeps going.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
