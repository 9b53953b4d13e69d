//! Strongly-connected-components cycle detection.

use super::ParticipantSet;
use crate::graph::Graph;
use petgraph::algo::tarjan_scc;
use tracing::debug;

/// Marks every node of a nontrivial strongly connected component.
///
/// A component is a cycle if it has more than one node, or if it's a
/// single node with a self-loop. Every node of such a component lies on a
/// simple cycle, so this yields the same set as the exhaustive search.
pub(super) fn strongly_connected(graph: &Graph) -> ParticipantSet {
    let inner = graph.inner();
    let mut participants = ParticipantSet::new();

    for scc in tarjan_scc(inner) {
        let is_cycle = match scc.as_slice() {
            [] => false,
            [single] => inner.contains_edge(*single, *single),
            _ => true,
        };
        if !is_cycle {
            continue;
        }

        debug!(members = scc.len(), "cyclic component");
        participants.extend(
            scc.iter()
                .filter_map(|&idx| inner.node_weight(idx))
                .map(|node| node.id.as_str()),
        );
    }

    participants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Attributes;

    #[test]
    fn test_single_node_without_self_loop() {
        let mut graph = Graph::new("g");
        graph.add_node("lonely", Attributes::new());
        assert!(strongly_connected(&graph).is_empty());
    }

    #[test]
    fn test_parallel_edges_in_cycle() {
        let mut graph = Graph::new("g");
        graph.add_edge("a", "b", true, Attributes::new());
        graph.add_edge("a", "b", true, Attributes::new());
        graph.add_edge("b", "a", true, Attributes::new());

        let participants = strongly_connected(&graph);
        assert_eq!(participants.len(), 2);
        assert!(participants.contains("a"));
        assert!(participants.contains("b"));
    }

    #[test]
    fn test_components_joined_by_bridge() {
        let mut graph = Graph::new("g");
        for (a, b) in [("a", "b"), ("b", "a"), ("b", "c"), ("c", "d"), ("d", "d")] {
            graph.add_edge(a, b, true, Attributes::new());
        }

        let participants = strongly_connected(&graph);
        let members: Vec<&str> = participants.iter().map(String::as_str).collect();
        assert_eq!(members, vec!["a", "b", "d"]);
    }
}
