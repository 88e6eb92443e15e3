//! `nf-graphml` — attributed source graphs and the GraphML reader.
//!
//! A source graph is the raw input to the converter: node ids with string
//! attributes and edges between them, kept in document order.  Nothing here
//! interprets attribute values; coordinates, lengths and speeds are parsed by
//! `nf-network` where the fallback rules live.
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`graph`]   | `SourceGraph`, `SourceNode`, `SourceEdge`, `Attributes` |
//! | [`graphml`] | `load_graphml`, `read_graphml`                          |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                          |

pub mod error;
pub mod graph;
pub mod graphml;


pub use error::{GraphError, GraphResult};
pub use graph::{Attributes, SourceEdge, SourceGraph, SourceNode};
pub use graphml::{load_graphml, read_graphml};
