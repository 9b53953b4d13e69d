//! Exhaustive depth-first cycle search.

use super::ParticipantSet;
use crate::graph::{Adjacency, Graph};
use std::collections::btree_set;
use std::collections::HashSet;
use tracing::{debug, trace};

/// Returns every node that lies on a simple cycle through `start`.
///
/// Runs a depth-first search from `start` that keeps the current path on an
/// explicit stack. Reaching `start` again closes a cycle and adds the whole
/// path to the result. Reaching any other node already on the path ends the
/// branch. The search visits every simple path from `start`, so it is
/// exponential on dense graphs.
///
/// # Example
///
/// ```rust
/// use findcycles::cycles::cycles_through;
/// use findcycles::graph::{Adjacency, Edge};
///
/// let edges = vec![Edge::new("a", "b"), Edge::new("b", "a"), Edge::new("b", "c")];
/// let adjacency = Adjacency::from_edges(&edges);
///
/// let found = cycles_through("a", &adjacency);
/// assert!(found.contains("a") && found.contains("b"));
/// assert!(cycles_through("c", &adjacency).is_empty());
/// ```
pub fn cycles_through(start: &str, adjacency: &Adjacency) -> ParticipantSet {
    let mut found = ParticipantSet::new();

    let mut path: Vec<&str> = vec![start];
    let mut on_path: HashSet<&str> = HashSet::from([start]);
    // One successor iterator per open node on the path.
    let mut frames: Vec<btree_set::Iter<'_, String>> = vec![adjacency.successors(start)];

    while let Some(frame) = frames.last_mut() {
        match frame.next() {
            Some(next) if next == start => {
                trace!(start, depth = path.len(), "cycle closed");
                found.extend(path.iter().copied());
            }
            Some(next) if on_path.contains(next.as_str()) => {}
            Some(next) => {
                path.push(next);
                on_path.insert(next);
                frames.push(adjacency.successors(next));
            }
            None => {
                frames.pop();
                if let Some(done) = path.pop() {
                    on_path.remove(done);
                }
            }
        }
    }

    found
}

/// Unions the per-root results of [`cycles_through`] over every node.
pub(super) fn exhaustive(graph: &Graph) -> ParticipantSet {
    let adjacency = graph.adjacency();
    let mut participants = ParticipantSet::new();

    for node in graph.nodes() {
        let found = cycles_through(&node.id, &adjacency);
        if !found.is_empty() {
            debug!(root = %node.id, members = found.len(), "cycles found");
        }
        participants.union(found);
    }

    participants
}
