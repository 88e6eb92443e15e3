use thiserror::Error;

/// Failure to load a source graph.  Every variant is fatal: no partial graph
/// is ever returned.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("cannot read graph file {path}: {source}")]
    Io {
        path:   String,
        source: std::io::Error,
    },

    #[error("malformed XML in {graph} near byte {position}: {source}")]
    Xml {
        graph:    String,
        position: usize,
        source:   quick_xml::Error,
    },

    #[error("invalid GraphML in {graph}: {reason}")]
    Malformed { graph: String, reason: String },

    #[error("edge #{edge} in {graph} references unknown node {node:?}")]
    UnknownEndpoint {
        graph: String,
        edge:  usize,
        node:  String,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;
