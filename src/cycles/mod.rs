//! Cycle participant detection.
//!
//! Finds every node that lies on at least one simple cycle and reduces a
//! graph to the edges running between such nodes.
//!
//! Two strategies are available:
//!
//! - [`Strategy::Exhaustive`] (default) runs a depth-first search from every
//!   node and records the path each time the search returns to its root.
//!   Its worst case is exponential on dense, highly cyclic graphs.
//! - [`Strategy::Components`] runs a single strongly-connected-components
//!   pass and yields the same set in linear time.
//!
//! # Example
//!
//! ```rust
//! use findcycles::cycles::{filter_to_cycles, find_cycle_participants};
//! use findcycles::graph::{Attributes, Graph};
//!
//! let mut graph = Graph::new("G");
//! graph.add_edge("a", "b", true, Attributes::new());
//! graph.add_edge("b", "c", true, Attributes::new());
//! graph.add_edge("c", "a", true, Attributes::new());
//! graph.add_edge("c", "d", true, Attributes::new());
//!
//! let participants = find_cycle_participants(&graph);
//! assert!(participants.contains("a"));
//! assert!(!participants.contains("d"));
//!
//! let filtered = filter_to_cycles(&graph, &participants);
//! assert_eq!(filtered.edge_count(), 3);
//! assert!(!filtered.contains("d"));
//! ```

mod components;
mod filter;
mod search;

pub use filter::filter_to_cycles;
pub use search::cycles_through;

use crate::graph::Graph;
use serde::Serialize;
use std::collections::btree_set;
use std::collections::BTreeSet;
use tracing::info;

/// Algorithm used to compute the participant set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Depth-first search rooted at every node
    #[default]
    Exhaustive,
    /// One Tarjan strongly-connected-components pass
    Components,
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exhaustive" | "dfs" => Ok(Strategy::Exhaustive),
            "components" | "scc" => Ok(Strategy::Components),
            _ => Err(format!(
                "Unknown strategy: '{}'. Valid strategies: exhaustive, components",
                s
            )),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Exhaustive => write!(f, "exhaustive"),
            Strategy::Components => write!(f, "components"),
        }
    }
}

/// The set of node ids that lie on at least one simple cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParticipantSet {
    nodes: BTreeSet<String>,
}

impl ParticipantSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `id` is a cycle participant.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    /// Adds a node id to the set.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.nodes.insert(id.into())
    }

    /// Adds every member of `other` to this set.
    pub fn union(&mut self, other: ParticipantSet) {
        self.nodes.extend(other.nodes);
    }

    /// Iterates the members in id order.
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.nodes.iter()
    }

    /// Returns the number of participants.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node participates in a cycle.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ParticipantSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ParticipantSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.nodes.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Finds all cycle participants using the default exhaustive search.
pub fn find_cycle_participants(graph: &Graph) -> ParticipantSet {
    find_cycle_participants_with(graph, Strategy::Exhaustive)
}

/// Finds all cycle participants using the given strategy.
///
/// Both strategies return the same set for every graph.
pub fn find_cycle_participants_with(graph: &Graph, strategy: Strategy) -> ParticipantSet {
    let participants = match strategy {
        Strategy::Exhaustive => search::exhaustive(graph),
        Strategy::Components => components::strongly_connected(graph),
    };

    info!(
        %strategy,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        participants = participants.len(),
        "cycle search finished"
    );
    participants
}

/// Computes the participants and returns the graph reduced to them.
pub fn reduce_to_cycles(graph: &Graph, strategy: Strategy) -> Graph {
    let participants = find_cycle_participants_with(graph, strategy);
    filter_to_cycles(graph, &participants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Attributes;

    fn graph_of(edges: &[(&str, &str)]) -> Graph {
        let mut graph = Graph::new("test");
        for (from, to) in edges {
            graph.add_edge(from, to, true, Attributes::new());
        }
        graph
    }

    fn both(graph: &Graph) -> ParticipantSet {
        let exhaustive = find_cycle_participants_with(graph, Strategy::Exhaustive);
        let components = find_cycle_participants_with(graph, Strategy::Components);
        assert_eq!(exhaustive, components);
        exhaustive
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!(
            "exhaustive".parse::<Strategy>().unwrap(),
            Strategy::Exhaustive
        );
        assert_eq!("DFS".parse::<Strategy>().unwrap(), Strategy::Exhaustive);
        assert_eq!(
            "components".parse::<Strategy>().unwrap(),
            Strategy::Components
        );
        assert_eq!("scc".parse::<Strategy>().unwrap(), Strategy::Components);
        assert!("johnson".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_display() {
        assert_eq!(Strategy::Exhaustive.to_string(), "exhaustive");
        assert_eq!(Strategy::Components.to_string(), "components");
        assert_eq!(Strategy::default(), Strategy::Exhaustive);
    }

    #[test]
    fn test_participant_set_union() {
        let mut set: ParticipantSet = ["a", "b"].into_iter().collect();
        set.union(["b", "c"].into_iter().collect());

        let members: Vec<&String> = set.iter().collect();
        assert_eq!(members, vec!["a", "b", "c"]);
        assert_eq!(set.len(), 3);
        assert!(!set.insert("a"));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new("empty");
        assert!(both(&graph).is_empty());
    }

    #[test]
    fn test_triangle_with_tail() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
        let participants = both(&graph);

        let expected: ParticipantSet = ["A", "B", "C"].into_iter().collect();
        assert_eq!(participants, expected);
    }

    #[test]
    fn test_disconnected_components() {
        let graph = graph_of(&[("A", "B"), ("B", "A"), ("C", "D")]);
        let expected: ParticipantSet = ["A", "B"].into_iter().collect();
        assert_eq!(both(&graph), expected);
    }

    #[test]
    fn test_self_loop() {
        let graph = graph_of(&[("A", "A"), ("A", "B")]);
        let expected: ParticipantSet = ["A"].into_iter().collect();
        assert_eq!(both(&graph), expected);
    }

    #[test]
    fn test_diamond_dag_has_no_participants() {
        let graph = graph_of(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "E")]);
        assert!(both(&graph).is_empty());
    }

    #[test]
    fn test_dag_node_between_cycles() {
        // M is reachable from one cycle and reaches another, but no path
        // leads back to it.
        let graph = graph_of(&[
            ("A", "B"),
            ("B", "A"),
            ("B", "M"),
            ("M", "X"),
            ("X", "Y"),
            ("Y", "X"),
        ]);
        let expected: ParticipantSet = ["A", "B", "X", "Y"].into_iter().collect();
        assert_eq!(both(&graph), expected);
    }

    #[test]
    fn test_reduce_to_cycles() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
        let reduced = reduce_to_cycles(&graph, Strategy::Components);

        let edges: Vec<(&str, &str)> = reduced
            .edges()
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(edges, vec![("A", "B"), ("B", "C"), ("C", "A")]);
    }
}
