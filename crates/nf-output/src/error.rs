//! Error types for nf-output.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when serializing or writing the network.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("gzip compression failed: {0}")]
    Compress(#[source] std::io::Error),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
