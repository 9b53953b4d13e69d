//! Directed graph model backed by petgraph.
//!
//! Nodes are identified by their string id, edges keep their endpoint ids,
//! direction flag and attribute map so that a graph can be written back out
//! exactly as it was read.

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::btree_set;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Attribute map attached to graphs, nodes and edges.
///
/// Keys and values are stored verbatim; they carry no meaning for the
/// cycle search.
pub type Attributes = BTreeMap<String, String>;

static NO_SUCCESSORS: BTreeSet<String> = BTreeSet::new();

/// A node in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Node identifier, unique within its graph
    pub id: String,
    /// Attributes given for this node
    pub attrs: Attributes,
}

impl Node {
    /// Creates a node without attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attrs: Attributes::new(),
        }
    }

    /// Creates a node with the given attributes.
    pub fn with_attrs(id: impl Into<String>, attrs: Attributes) -> Self {
        Self {
            id: id.into(),
            attrs,
        }
    }
}

/// Port reference on an edge endpoint, as in `a:port:compass`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    /// Port name, or a compass point when given alone
    pub name: String,
    /// Compass point following the port name
    pub compass: Option<String>,
}

impl Port {
    /// Creates a port without a compass point.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            compass: None,
        }
    }
}

/// An edge record.
///
/// Parallel edges between the same pair of nodes are separate records.
/// Ports are kept for output only; the cycle search works on node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Source node id
    pub source: String,
    /// Destination node id
    pub target: String,
    /// Port on the source node
    pub source_port: Option<Port>,
    /// Port on the destination node
    pub target_port: Option<Port>,
    /// Whether the edge was declared with `->`
    pub directed: bool,
    /// Attributes given for this edge
    pub attrs: Attributes,
}

impl Edge {
    /// Creates a directed edge without attributes.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_port: None,
            target_port: None,
            directed: true,
            attrs: Attributes::new(),
        }
    }

    /// Returns true if the edge starts and ends at the same node.
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Mapping from a node to the distinct nodes reachable over one edge.
///
/// Derived from an edge list; nodes without outgoing edges have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    targets: BTreeMap<String, BTreeSet<String>>,
}

impl Adjacency {
    /// Builds the adjacency view of an edge sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use findcycles::graph::{Adjacency, Edge};
    ///
    /// let edges = vec![Edge::new("a", "b"), Edge::new("a", "b"), Edge::new("a", "c")];
    /// let adjacency = Adjacency::from_edges(&edges);
    ///
    /// assert_eq!(adjacency.out_degree("a"), 2);
    /// assert_eq!(adjacency.out_degree("b"), 0);
    /// ```
    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Self {
        let mut targets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for edge in edges {
            targets
                .entry(edge.source.clone())
                .or_default()
                .insert(edge.target.clone());
        }
        Self { targets }
    }

    /// Iterates the distinct direct successors of `node`, in id order.
    ///
    /// Unknown nodes and nodes without outgoing edges yield nothing.
    pub fn successors(&self, node: &str) -> btree_set::Iter<'_, String> {
        self.targets.get(node).unwrap_or(&NO_SUCCESSORS).iter()
    }

    /// Number of distinct direct successors of `node`.
    pub fn out_degree(&self, node: &str) -> usize {
        self.targets.get(node).map_or(0, BTreeSet::len)
    }

    /// Returns true if `node` has an edge to itself.
    pub fn has_self_loop(&self, node: &str) -> bool {
        self.targets
            .get(node)
            .is_some_and(|targets| targets.contains(node))
    }

    /// Iterates the nodes that have at least one outgoing edge.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Returns true if no node has an outgoing edge.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A directed graph of string-identified nodes and attributed edges.
///
/// The graph uses petgraph's `DiGraph` internally. Node order is the order
/// in which ids were first seen, and edge order is insertion order.
///
/// # Example
///
/// ```rust
/// use findcycles::graph::{Attributes, Graph};
///
/// let mut graph = Graph::new("deps");
/// graph.add_node("a", Attributes::new());
/// graph.add_edge("a", "b", true, Attributes::new());
/// graph.add_edge("b", "a", true, Attributes::new());
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2);
/// assert_eq!(graph.adjacency().out_degree("a"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Graph name, empty for anonymous graphs
    name: String,
    /// Graph-level attributes
    attrs: Attributes,
    /// The underlying directed graph
    graph: DiGraph<Node, Edge>,
    /// Maps node ids to their indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl Graph {
    /// Creates an empty graph with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the graph.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the graph-level attributes.
    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Sets a graph-level attribute, replacing any previous value.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Adds a node, or merges `attrs` into the node if it already exists.
    ///
    /// Returns the index of the added or existing node.
    ///
    /// # Example
    ///
    /// ```rust
    /// use findcycles::graph::{Attributes, Graph};
    ///
    /// let mut graph = Graph::new("g");
    /// let first = graph.add_node("a", Attributes::new());
    /// let second = graph.add_node("a", Attributes::from([("color".into(), "red".into())]));
    ///
    /// assert_eq!(first, second);
    /// assert_eq!(graph.node_count(), 1);
    /// assert_eq!(graph.node("a").unwrap().attrs["color"], "red");
    /// ```
    pub fn add_node(&mut self, id: &str, attrs: Attributes) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(id) {
            if let Some(node) = self.graph.node_weight_mut(idx) {
                node.attrs.extend(attrs);
            }
            return idx;
        }

        let idx = self.graph.add_node(Node::with_attrs(id, attrs));
        self.node_indices.insert(id.to_string(), idx);
        idx
    }

    /// Appends an edge from `source` to `target`.
    ///
    /// Endpoints that are not yet in the graph are registered as nodes
    /// without attributes, the same way a DOT edge statement declares them.
    pub fn add_edge(&mut self, source: &str, target: &str, directed: bool, attrs: Attributes) {
        self.insert_edge(Edge {
            directed,
            attrs,
            ..Edge::new(source, target)
        });
    }

    /// Appends a complete edge record, ports included.
    ///
    /// Unseen endpoints are registered like in [`Graph::add_edge`].
    pub fn insert_edge(&mut self, edge: Edge) {
        let from = self.add_node(&edge.source, Attributes::new());
        let to = self.add_node(&edge.target, Attributes::new());
        self.graph.add_edge(from, to, edge);
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_indices
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Returns true if the graph has a node with the given id.
    pub fn contains(&self, id: &str) -> bool {
        self.node_indices.contains_key(id)
    }

    /// Iterates all nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Iterates all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    /// Derives the adjacency view from the current edge list.
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::from_edges(self.edges())
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edge records, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Gives the cycle strategies access to the petgraph structure.
    pub(crate) fn inner(&self) -> &DiGraph<Node, Edge> {
        &self.graph
    }
}
