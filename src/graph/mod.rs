//! Graph module for directed graph modeling.
//!
//! This module provides the [`Graph`] struct, which keeps the node set and
//! the ordered edge list of a parsed graph, and the derived [`Adjacency`]
//! view consumed by the cycle search.
//!
//! # Example
//!
//! ```rust
//! use findcycles::graph::{Attributes, Graph};
//!
//! let mut graph = Graph::new("G");
//! graph.add_edge("a", "b", true, Attributes::new());
//! graph.add_edge("b", "a", true, Attributes::new());
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 2);
//! ```

mod model;

pub use model::{Adjacency, Attributes, Edge, Graph, Node, Port};
