//! Network-construction error type.

use thiserror::Error;

/// Errors produced while merging source graphs.  All are fatal for a run;
/// a failed [`add_graph`](crate::NetworkBuilder::add_graph) leaves the
/// builder unchanged.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {node:?} in {graph} has no coordinate (expected x/lon/lng and y/lat)")]
    MissingCoordinate { graph: String, node: String },

    #[error("{element} in {graph}: attribute {attribute:?} = {value:?} {reason}")]
    MalformedNumeric {
        graph:     String,
        element:   String,
        attribute: String,
        value:     String,
        reason:    &'static str,
    },

    #[error("edge #{edge} in {graph} references node {node:?} that is not in the graph")]
    UnknownEndpoint {
        graph: String,
        edge:  usize,
        node:  String,
    },

    #[error("node prefix {prefix:?} overlaps prefix {used:?} of an earlier layer")]
    DuplicateNodePrefix { prefix: String, used: String },

    #[error("link prefix {prefix:?} overlaps prefix {used:?} of an earlier layer")]
    DuplicateLinkPrefix { prefix: String, used: String },

    #[error("invalid layer configuration: {0}")]
    InvalidLayer(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
