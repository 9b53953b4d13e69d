//! findcycles - reduce a directed graph to the parts that lie on cycles
//!
//! This crate reads Graphviz DOT graphs, finds every node that participates
//! in at least one simple cycle, and produces the graph restricted to the
//! edges between those nodes.

pub mod cycles;
pub mod dot;
pub mod graph;
pub mod report;
