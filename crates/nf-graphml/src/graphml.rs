//! GraphML reader.
//!
//! # Accepted format
//!
//! The subset written by networkx / osmnx:
//!
//! ```xml
//! <graphml xmlns="http://graphml.graphdrawing.org/xmlns">
//!   <key id="d0" for="node" attr.name="x" attr.type="string"/>
//!   <key id="d1" for="node" attr.name="y" attr.type="string"/>
//!   <key id="d2" for="edge" attr.name="oneway" attr.type="string">
//!     <default>True</default>
//!   </key>
//!   <graph edgedefault="directed">
//!     <node id="1"><data key="d0">127.0</data><data key="d1">37.5</data></node>
//!     <edge source="1" target="2"><data key="d2">False</data></edge>
//!   </graph>
//! </graphml>
//! ```
//!
//! `<data>` values are kept as trimmed, unescaped strings under the key's
//! `attr.name` (or the raw key id when the key is undeclared).  Key
//! `<default>`s are applied to every node/edge lacking that attribute.  Only
//! the first `<graph>` is read; nested graphs and hyperedges are rejected.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rustc_hash::FxHashMap;

use crate::{Attributes, GraphError, GraphResult, SourceEdge, SourceGraph, SourceNode};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a GraphML file.
///
/// # Errors
///
/// [`GraphError::Io`] if the file cannot be opened; any other
/// [`GraphError`] variant if its contents are not a usable graph.
pub fn load_graphml(path: &Path) -> GraphResult<SourceGraph> {
    let label = path.display().to_string();
    let file = File::open(path).map_err(|source| GraphError::Io { path: label.clone(), source })?;
    let graph = read_graphml(BufReader::new(file), &label)?;
    log::info!(
        "loaded {label}: {} nodes, {} edges ({})",
        graph.node_count(),
        graph.edge_count(),
        if graph.is_directed() { "directed" } else { "undirected" },
    );
    Ok(graph)
}

/// Like [`load_graphml`] but accepts any buffered reader.
///
/// `name` labels the graph in error messages.  Useful for testing (pass a
/// byte slice) or reading from an already-open stream.
pub fn read_graphml<R: BufRead>(reader: R, name: &str) -> GraphResult<SourceGraph> {
    let mut xml = Reader::from_reader(reader);
    xml.trim_text(true);

    let mut state = ParseState::new(name);
    let mut buf = Vec::new();

    loop {
        let event = xml.read_event_into(&mut buf).map_err(|source| GraphError::Xml {
            graph:    name.to_owned(),
            position: xml.buffer_position(),
            source,
        })?;
        let position = xml.buffer_position();
        let xml_err = |source: quick_xml::Error| GraphError::Xml {
            graph: name.to_owned(),
            position,
            source,
        };

        match event {
            Event::Start(e) => state.open(&e, false).map_err(|f| f.into_graph_error(xml_err))?,
            Event::Empty(e) => state.open(&e, true).map_err(|f| f.into_graph_error(xml_err))?,
            Event::Text(t) => {
                if state.capturing() {
                    state.text.push_str(&t.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(t) => {
                if state.capturing() {
                    state.text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(e) => state.close(e.local_name().as_ref())?,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    state.finish()
}

// ── Parser state ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq)]
enum KeyDomain {
    Node,
    Edge,
    Other,
    All,
}

struct KeyDecl {
    name:    String,
    domain:  KeyDomain,
    default: Option<String>,
}

/// The node or edge currently open, with its attributes accumulated so far.
enum OpenElement {
    Node(SourceNode),
    Edge(SourceEdge),
}

/// What the next run of character data belongs to.
enum Capture {
    None,
    Data(String),
    Default,
}

struct ParseState<'a> {
    name:       &'a str,
    keys:       FxHashMap<String, KeyDecl>,
    graph:      Option<SourceGraph>,
    /// Depth of `<graph>` elements; only depth 1 is read.
    graph_depth: usize,
    graph_done: bool,
    open:       Option<OpenElement>,
    capture:    Capture,
    text:       String,
    /// Id of the most recently declared `<key>`.
    last_key:   Option<String>,
    node_defaults: Vec<(String, String)>,
    edge_defaults: Vec<(String, String)>,
}

/// Internal failure while handling an opening tag.
enum OpenFailure {
    Xml(quick_xml::Error),
    Graph(GraphError),
}

impl From<quick_xml::Error> for OpenFailure {
    fn from(e: quick_xml::Error) -> Self {
        OpenFailure::Xml(e)
    }
}

impl From<GraphError> for OpenFailure {
    fn from(e: GraphError) -> Self {
        OpenFailure::Graph(e)
    }
}

impl OpenFailure {
    fn into_graph_error(self, xml_err: impl FnOnce(quick_xml::Error) -> GraphError) -> GraphError {
        match self {
            OpenFailure::Xml(e) => xml_err(e),
            OpenFailure::Graph(e) => e,
        }
    }
}

impl<'a> ParseState<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            keys: FxHashMap::default(),
            graph: None,
            graph_depth: 0,
            graph_done: false,
            open: None,
            capture: Capture::None,
            text: String::new(),
            last_key: None,
            node_defaults: Vec::new(),
            edge_defaults: Vec::new(),
        }
    }

    fn capturing(&self) -> bool {
        !matches!(self.capture, Capture::None)
    }

    fn malformed(&self, reason: impl Into<String>) -> GraphError {
        GraphError::Malformed { graph: self.name.to_owned(), reason: reason.into() }
    }

    /// Handle `<tag ...>` (or `<tag .../>` when `empty`).
    fn open(&mut self, e: &BytesStart<'_>, empty: bool) -> Result<(), OpenFailure> {
        match e.local_name().as_ref() {
            b"key" => {
                let id = required_attr(e, b"id", "key", self)?;
                let name = attr_value(e, b"attr.name")?.unwrap_or_else(|| id.clone());
                let domain = match attr_value(e, b"for")?.as_deref() {
                    Some("node") => KeyDomain::Node,
                    Some("edge") => KeyDomain::Edge,
                    Some("all") | None => KeyDomain::All,
                    Some(_) => KeyDomain::Other,
                };
                self.last_key = Some(id.clone());
                self.keys.insert(id, KeyDecl { name, domain, default: None });
            }
            b"default" => {
                // applies to the most recent <key>; resolved on </default>
                if !empty {
                    self.capture = Capture::Default;
                    self.text.clear();
                }
            }
            b"graph" => {
                if self.graph_depth > 0 {
                    return Err(self.malformed("nested graphs are not supported").into());
                }
                if self.graph_done {
                    return Err(self.malformed("more than one <graph> element").into());
                }
                let directed = attr_value(e, b"edgedefault")?.as_deref() != Some("undirected");
                self.graph = Some(SourceGraph::new(self.name, directed));
                self.collect_defaults();
                if empty {
                    self.graph_done = true;
                } else {
                    self.graph_depth = 1;
                }
            }
            b"node" => {
                self.require_graph("node")?;
                if self.open.is_some() {
                    return Err(self.malformed("<node> nested inside another element").into());
                }
                let id = required_attr(e, b"id", "node", self)?;
                let node = SourceNode::new(id, Attributes::new());
                if empty {
                    self.push_node(node);
                } else {
                    self.open = Some(OpenElement::Node(node));
                }
            }
            b"edge" => {
                self.require_graph("edge")?;
                if self.open.is_some() {
                    return Err(self.malformed("<edge> nested inside another element").into());
                }
                let source = required_attr(e, b"source", "edge", self)?;
                let target = required_attr(e, b"target", "edge", self)?;
                let edge = SourceEdge::new(source, target, Attributes::new());
                if empty {
                    self.push_edge(edge)?;
                } else {
                    self.open = Some(OpenElement::Edge(edge));
                }
            }
            b"data" => {
                let key = required_attr(e, b"key", "data", self)?;
                if empty {
                    self.store_data(&key, String::new());
                } else {
                    self.capture = Capture::Data(key);
                    self.text.clear();
                }
            }
            b"hyperedge" => {
                return Err(self.malformed("hyperedges are not supported").into());
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle `</tag>`.
    fn close(&mut self, local_name: &[u8]) -> GraphResult<()> {
        match local_name {
            b"data" => {
                if let Capture::Data(key) = std::mem::replace(&mut self.capture, Capture::None) {
                    let value = std::mem::take(&mut self.text).trim().to_owned();
                    self.store_data(&key, value);
                }
            }
            b"default" => {
                if let Capture::Default = std::mem::replace(&mut self.capture, Capture::None) {
                    let value = std::mem::take(&mut self.text).trim().to_owned();
                    self.set_last_key_default(value);
                }
            }
            b"node" => {
                if let Some(OpenElement::Node(node)) = self.open.take() {
                    self.push_node(node);
                }
            }
            b"edge" => {
                if let Some(OpenElement::Edge(edge)) = self.open.take() {
                    self.push_edge(edge)?;
                }
            }
            b"graph" => {
                self.graph_depth = self.graph_depth.saturating_sub(1);
                self.graph_done = true;
            }
            _ => {}
        }
        Ok(())
    }

    fn finish(self) -> GraphResult<SourceGraph> {
        if self.open.is_some() || self.graph_depth > 0 {
            return Err(self.malformed("unexpected end of file inside <graph>"));
        }
        self.graph.ok_or_else(|| GraphError::Malformed {
            graph:  self.name.to_owned(),
            reason: "no <graph> element found".to_owned(),
        })
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn require_graph(&self, what: &str) -> GraphResult<()> {
        if self.graph_depth == 1 {
            Ok(())
        } else {
            Err(self.malformed(format!("<{what}> outside of <graph>")))
        }
    }

    fn collect_defaults(&mut self) {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        for decl in self.keys.values() {
            let Some(default) = &decl.default else { continue };
            let pair = (decl.name.clone(), default.clone());
            match decl.domain {
                KeyDomain::Node => nodes.push(pair),
                KeyDomain::Edge => edges.push(pair),
                KeyDomain::All => {
                    nodes.push(pair.clone());
                    edges.push(pair);
                }
                KeyDomain::Other => {}
            }
        }
        self.node_defaults = nodes;
        self.edge_defaults = edges;
    }

    /// `<default>` belongs to the key declared immediately before it.
    fn set_last_key_default(&mut self, value: String) {
        let Some(id) = self.last_key.as_deref() else { return };
        if let Some(decl) = self.keys.get_mut(id) {
            decl.default = Some(value);
        }
    }

    fn store_data(&mut self, key: &str, value: String) {
        let name = self
            .keys
            .get(key)
            .map(|decl| decl.name.clone())
            .unwrap_or_else(|| key.to_owned());
        match &mut self.open {
            Some(OpenElement::Node(node)) => {
                node.attrs.insert(name, value);
            }
            Some(OpenElement::Edge(edge)) => {
                edge.attrs.insert(name, value);
            }
            // graph-level and document-level data are not needed
            None => {}
        }
    }

    fn push_node(&mut self, mut node: SourceNode) {
        for (k, v) in &self.node_defaults {
            node.attrs.insert_default(k, v);
        }
        if let Some(graph) = self.graph.as_mut() {
            let id = node.id.clone();
            // a repeated id neither merges nor updates the first entry's attributes
            if !graph.add_node(node) {
                log::warn!("{}: duplicate node id {id:?}, first occurrence wins", self.name);
            }
        }
    }

    fn push_edge(&mut self, mut edge: SourceEdge) -> GraphResult<()> {
        for (k, v) in &self.edge_defaults {
            edge.attrs.insert_default(k, v);
        }
        match &mut self.graph {
            Some(graph) => graph.add_edge(edge),
            None => Err(GraphError::Malformed {
                graph:  self.name.to_owned(),
                reason: "<edge> outside of <graph>".to_owned(),
            }),
        }
    }
}

// ── Attribute helpers ─────────────────────────────────────────────────────────

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, quick_xml::Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn required_attr(
    e:     &BytesStart<'_>,
    key:   &[u8],
    tag:   &str,
    state: &ParseState<'_>,
) -> Result<String, OpenFailure> {
    match attr_value(e, key)? {
        Some(v) => Ok(v),
        None => Err(state
            .malformed(format!(
                "<{tag}> without required attribute {:?}",
                String::from_utf8_lossy(key)
            ))
            .into()),
    }
}
