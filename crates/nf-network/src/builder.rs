//! Two-graph merge into a single [`Network`].
//!
//! Each source graph is added as one *layer* described by a [`LayerSpec`].
//! For every layer the builder:
//!
//! 1. resolves and projects every node coordinate (a node without one aborts
//!    the layer before anything is emitted),
//! 2. materialises each namespaced node id at most once,
//! 3. resolves length, speed and direction per edge and emits one or two
//!    links named `<link_prefix><n>`, `n` counting from 0 per layer.
//!
//! The layer is staged in full and committed only on success, so an error
//! leaves the builder exactly as it was.

use log::{debug, info, warn};
use rustc_hash::{FxHashMap, FxHashSet};

use nf_core::{CoordinateProjector, GeoPoint};
use nf_graphml::SourceGraph;

use crate::resolve::{is_oneway, node_coordinate, AttributeError, LengthResolver, SpeedResolver};
use crate::{LayerSpec, Network, NetworkError, NetworkLink, NetworkNode, NetworkResult};

/// Shortest length written for a link whose endpoints coincide, metres.
pub const MIN_LINK_LENGTH_M: f64 = 0.001;

// ── LayerStats ────────────────────────────────────────────────────────────────

/// Counts for one committed layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerStats {
    pub nodes_added:     usize,
    /// Node entries whose namespaced id was already materialised.
    pub duplicate_nodes: usize,
    pub edges:           usize,
    pub links:           usize,
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Accumulates layers, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use nf_core::TransverseMercator;
/// use nf_graphml::{Attributes, SourceEdge, SourceGraph, SourceNode};
/// use nf_network::{LayerSpec, NetworkBuilder};
///
/// let mut g = SourceGraph::new("drive", true);
/// g.add_node(SourceNode::new("A", [("x", "127.0"), ("y", "37.5")].into_iter().collect()));
/// g.add_node(SourceNode::new("B", [("x", "127.01"), ("y", "37.5")].into_iter().collect()));
/// g.add_edge(SourceEdge::new("A", "B", Attributes::new())).unwrap();
///
/// let mut b = NetworkBuilder::new(TransverseMercator::korea_2000_unified());
/// let stats = b.add_graph(&g, &LayerSpec::drive()).unwrap();
/// assert_eq!(stats.links, 1);
/// let net = b.build();
/// assert_eq!(net.links()[0].id, "car_0");
/// ```
pub struct NetworkBuilder<P> {
    projector:     P,
    lengths:       LengthResolver,
    nodes:         Vec<NetworkNode>,
    links:         Vec<NetworkLink>,
    node_ids:      FxHashSet<String>,
    node_prefixes: FxHashSet<String>,
    link_prefixes: FxHashSet<String>,
}

impl<P: CoordinateProjector> NetworkBuilder<P> {
    pub fn new(projector: P) -> Self {
        Self {
            projector,
            lengths:       LengthResolver::default(),
            nodes:         Vec::new(),
            links:         Vec::new(),
            node_ids:      FxHashSet::default(),
            node_prefixes: FxHashSet::default(),
            link_prefixes: FxHashSet::default(),
        }
    }

    /// Replace the length attribute names consulted for every layer.
    pub fn with_length_resolver(mut self, lengths: LengthResolver) -> Self {
        self.lengths = lengths;
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Merge one source graph as a layer.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidLayer`] for an unusable `spec`.
    /// - [`NetworkError::DuplicateNodePrefix`] / [`NetworkError::DuplicateLinkPrefix`]
    ///   if a prefix equals, extends or is extended by one an earlier layer
    ///   used; ids of the two layers could otherwise coincide.
    /// - [`NetworkError::MissingCoordinate`] if any node lacks a coordinate.
    /// - [`NetworkError::MalformedNumeric`] for unparsable coordinate, length
    ///   or speed values.
    pub fn add_graph(&mut self, graph: &SourceGraph, spec: &LayerSpec) -> NetworkResult<LayerStats> {
        spec.validate()?;
        if let Some(used) = overlapping(&self.node_prefixes, &spec.node_prefix) {
            return Err(NetworkError::DuplicateNodePrefix {
                prefix: spec.node_prefix.clone(),
                used:   used.clone(),
            });
        }
        if let Some(used) = overlapping(&self.link_prefixes, &spec.link_prefix) {
            return Err(NetworkError::DuplicateLinkPrefix {
                prefix: spec.link_prefix.clone(),
                used:   used.clone(),
            });
        }

        let mut stats = LayerStats { edges: graph.edge_count(), ..LayerStats::default() };

        // ── Nodes ─────────────────────────────────────────────────────────
        // Raw id → geographic coordinate of its first entry.
        let mut coords: FxHashMap<&str, GeoPoint> = FxHashMap::default();
        let mut staged_ids: FxHashSet<String> = FxHashSet::default();
        let mut staged_nodes = Vec::with_capacity(graph.node_count());

        for node in graph.nodes() {
            let geo = node_coordinate(&node.attrs)
                .map_err(|e| malformed(graph, format!("node {:?}", node.id), e))?
                .ok_or_else(|| NetworkError::MissingCoordinate {
                    graph: graph.name().to_owned(),
                    node:  node.id.clone(),
                })?;
            coords.entry(node.id.as_str()).or_insert(geo);

            let id = format!("{}{}", spec.node_prefix, node.id);
            if self.node_ids.contains(&id) || staged_ids.contains(&id) {
                stats.duplicate_nodes += 1;
                continue;
            }
            staged_nodes.push(NetworkNode { id: id.clone(), coord: self.projector.project(geo) });
            staged_ids.insert(id);
        }
        if stats.duplicate_nodes > 0 {
            warn!(
                "{}: {} duplicate node id(s) skipped",
                graph.name(),
                stats.duplicate_nodes
            );
        }

        // ── Links ─────────────────────────────────────────────────────────
        let speeds = SpeedResolver::new(spec.speed_attributes.iter().cloned());
        let mut staged_links = Vec::with_capacity(graph.edge_count());
        let mut seq = 0usize;

        for (i, edge) in graph.edges().iter().enumerate() {
            let element = || format!("edge #{i} ({} -> {})", edge.source, edge.target);
            let from_geo = endpoint(&coords, graph, i, &edge.source)?;
            let to_geo = endpoint(&coords, graph, i, &edge.target)?;

            let mut length_m = self
                .lengths
                .resolve(&edge.attrs, from_geo, to_geo)
                .map_err(|e| malformed(graph, element(), e))?;
            if length_m <= 0.0 {
                debug!("{}: {} has coincident endpoints", graph.name(), element());
                length_m = MIN_LINK_LENGTH_M;
            }
            let freespeed_mps = speeds
                .resolve(&edge.attrs, spec.default_speed_mps)
                .map_err(|e| malformed(graph, element(), e))?;

            let from = format!("{}{}", spec.node_prefix, edge.source);
            let to = format!("{}{}", spec.node_prefix, edge.target);
            let oneway = is_oneway(&edge.attrs);

            let mut emit = |from: String, to: String| {
                staged_links.push(NetworkLink {
                    id: format!("{}{seq}", spec.link_prefix),
                    from,
                    to,
                    length_m,
                    freespeed_mps,
                    capacity: spec.capacity,
                    permlanes: spec.permlanes,
                    mode: spec.mode,
                });
                seq += 1;
            };
            if oneway {
                emit(from, to);
            } else {
                emit(from.clone(), to.clone());
                emit(to, from);
            }
        }
        stats.nodes_added = staged_nodes.len();
        stats.links = staged_links.len();

        // ── Commit ────────────────────────────────────────────────────────
        self.nodes.extend(staged_nodes);
        self.node_ids.extend(staged_ids);
        self.links.extend(staged_links);
        self.node_prefixes.insert(spec.node_prefix.clone());
        self.link_prefixes.insert(spec.link_prefix.clone());

        info!(
            "{} layer from {}: {} nodes, {} edges -> {} links",
            spec.mode,
            graph.name(),
            stats.nodes_added,
            stats.edges,
            stats.links
        );
        Ok(stats)
    }

    /// Consume the builder and produce the merged [`Network`].
    pub fn build(self) -> Network {
        Network::from_parts(self.nodes, self.links)
    }
}

/// Build a network from `layers` in order with default resolvers.
pub fn merge<P: CoordinateProjector>(
    projector: P,
    layers:    &[(&SourceGraph, &LayerSpec)],
) -> NetworkResult<Network> {
    let mut builder = NetworkBuilder::new(projector);
    for (graph, spec) in layers {
        builder.add_graph(graph, spec)?;
    }
    Ok(builder.build())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A used prefix that `prefix` equals, extends, or is extended by.
fn overlapping<'a>(used: &'a FxHashSet<String>, prefix: &str) -> Option<&'a String> {
    used.iter().find(|u| u.starts_with(prefix) || prefix.starts_with(u.as_str()))
}

fn endpoint(
    coords: &FxHashMap<&str, GeoPoint>,
    graph:  &SourceGraph,
    edge:   usize,
    node:   &str,
) -> NetworkResult<GeoPoint> {
    coords.get(node).copied().ok_or_else(|| NetworkError::UnknownEndpoint {
        graph: graph.name().to_owned(),
        edge,
        node:  node.to_owned(),
    })
}

fn malformed(graph: &SourceGraph, element: String, e: AttributeError) -> NetworkError {
    NetworkError::MalformedNumeric {
        graph:     graph.name().to_owned(),
        element,
        attribute: e.attribute,
        value:     e.value,
        reason:    e.reason,
    }
}
