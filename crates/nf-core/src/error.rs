//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where core operations can fail.

use thiserror::Error;

/// Errors produced by `nf-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid projection parameters: {0}")]
    InvalidProjection(String),

    #[error("unknown transport mode {0:?}: expected \"car\", \"walk\", or \"bike\"")]
    UnknownMode(String),
}

/// Shorthand result type for `nf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
