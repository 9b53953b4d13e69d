//! Reduction of a graph to its cycle-internal edges.

use super::ParticipantSet;
use crate::graph::{Attributes, Edge, Graph};
use tracing::debug;

/// Builds a new graph holding only the edges between cycle participants.
///
/// Retained edges keep their original order, ports and attributes and are
/// all directed. The node set of the result is exactly the endpoints of the
/// retained edges, registered without attributes; participants with no
/// retained edge do not appear.
pub fn filter_to_cycles(graph: &Graph, participants: &ParticipantSet) -> Graph {
    let mut filtered = Graph::new(graph.name());

    for edge in graph.edges() {
        if participants.contains(&edge.source) && participants.contains(&edge.target) {
            filtered.add_node(&edge.source, Attributes::new());
            filtered.add_node(&edge.target, Attributes::new());
            filtered.insert_edge(Edge {
                directed: true,
                ..edge.clone()
            });
        }
    }

    debug!(
        kept_edges = filtered.edge_count(),
        dropped_edges = graph.edge_count() - filtered.edge_count(),
        "filtered graph to cycles"
    );
    filtered
}
