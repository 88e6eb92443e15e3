//! In-memory source graph.
//!
//! Nodes and edges are stored in the order they were added, which for a
//! loaded file is document order.  That order is the converter's iteration
//! order, so output is deterministic for a given input file.

use rustc_hash::FxHashMap;

use crate::{GraphError, GraphResult};

// ── Attributes ────────────────────────────────────────────────────────────────

/// String-valued attribute mapping of a node or edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes(FxHashMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Insert only if `key` is not already set.
    pub fn insert_default(&mut self, key: &str, value: &str) {
        if !self.0.contains_key(key) {
            self.0.insert(key.to_owned(), value.to_owned());
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ── Nodes & edges ─────────────────────────────────────────────────────────────

/// A node as read from the source; `id` is unique only within its own graph.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceNode {
    pub id:    String,
    pub attrs: Attributes,
}

impl SourceNode {
    pub fn new(id: impl Into<String>, attrs: Attributes) -> Self {
        Self { id: id.into(), attrs }
    }
}

/// A source edge from `source` to `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceEdge {
    pub source: String,
    pub target: String,
    pub attrs:  Attributes,
}

impl SourceEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, attrs: Attributes) -> Self {
        Self { source: source.into(), target: target.into(), attrs }
    }
}

// ── SourceGraph ───────────────────────────────────────────────────────────────

/// An attributed node/edge structure loaded from one input file.
///
/// Duplicate node ids are kept as separate entries (the builder decides how
/// to treat them); [`node`](Self::node) resolves an id to its first entry.
/// Every edge endpoint is guaranteed to resolve.
#[derive(Clone, Debug)]
pub struct SourceGraph {
    name:     String,
    directed: bool,
    nodes:    Vec<SourceNode>,
    edges:    Vec<SourceEdge>,
    index:    FxHashMap<String, usize>,
}

impl SourceGraph {
    /// `name` labels the graph in error messages, usually the file path.
    pub fn new(name: impl Into<String>, directed: bool) -> Self {
        Self {
            name: name.into(),
            directed,
            nodes: Vec::new(),
            edges: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the GraphML `edgedefault` attribute.  Informational only.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Append a node.  Returns `false` if its id was already present.
    pub fn add_node(&mut self, node: SourceNode) -> bool {
        let position = self.nodes.len();
        let fresh = match self.index.get(&node.id) {
            Some(_) => false,
            None => {
                self.index.insert(node.id.clone(), position);
                true
            }
        };
        self.nodes.push(node);
        fresh
    }

    /// Append an edge.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownEndpoint`] if either endpoint has not been added.
    pub fn add_edge(&mut self, edge: SourceEdge) -> GraphResult<()> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.index.contains_key(endpoint) {
                return Err(GraphError::UnknownEndpoint {
                    graph: self.name.clone(),
                    edge:  self.edges.len(),
                    node:  endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    /// First node entry with this id.
    pub fn node(&self, id: &str) -> Option<&SourceNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn nodes(&self) -> &[SourceNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[SourceEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
