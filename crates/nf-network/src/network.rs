//! Merged network representation.
//!
//! A [`Network`] is the complete content of one output file: nodes with
//! projected coordinates and directed links with transport attributes.
//! Both lists keep insertion order (first layer's elements before the
//! second's), which is the order they are written in.

use nf_core::{PlanarPoint, TransportMode};

/// A network node with namespaced id and projected coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkNode {
    pub id:    String,
    pub coord: PlanarPoint,
}

/// A directed link between two network nodes.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkLink {
    pub id:            String,
    pub from:          String,
    pub to:            String,
    /// Metres.
    pub length_m:      f64,
    /// Metres per second.
    pub freespeed_mps: f64,
    pub capacity:      f64,
    pub permlanes:     u32,
    pub mode:          TransportMode,
}

/// Nodes and links of the merged network.
///
/// Normally produced by [`NetworkBuilder`](crate::NetworkBuilder), which
/// guarantees unique ids and that every link endpoint is a node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
    nodes: Vec<NetworkNode>,
    links: Vec<NetworkLink>,
}

impl Network {
    /// Assemble a network from already-validated parts.
    pub fn from_parts(nodes: Vec<NetworkNode>, links: Vec<NetworkLink>) -> Self {
        Self { nodes, links }
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[NetworkLink] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Linear scan by id; intended for tests and diagnostics.
    pub fn node(&self, id: &str) -> Option<&NetworkNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn link(&self, id: &str) -> Option<&NetworkLink> {
        self.links.iter().find(|l| l.id == id)
    }

    /// Number of links carrying `mode`.
    pub fn link_count_for(&self, mode: TransportMode) -> usize {
        self.links.iter().filter(|l| l.mode == mode).count()
    }
}
