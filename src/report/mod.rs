//! Output of a cycle analysis run.
//!
//! This module bundles the reduced graph with summary figures about the run
//! and writes them in one of two formats: DOT (the reduced graph) or JSON
//! (the summary).

pub mod dot;
pub mod json;

use crate::cycles::{filter_to_cycles, find_cycle_participants_with, ParticipantSet, Strategy};
use crate::graph::Graph;
use std::io::{self, Write};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// DOT format - the reduced graph
    #[default]
    Dot,
    /// JSON format - machine-readable run summary
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dot" | "gv" => Ok(OutputFormat::Dot),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown output format: '{}'. Valid formats: dot, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Dot => write!(f, "dot"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Result of reducing one graph to its cycles.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Strategy used for the search
    pub strategy: Strategy,
    /// Name of the input graph
    pub graph_name: String,
    /// Number of nodes in the input graph
    pub input_nodes: usize,
    /// Number of edges in the input graph
    pub input_edges: usize,
    /// Nodes found on at least one cycle
    pub participants: ParticipantSet,
    /// The input graph reduced to cycle-internal edges
    pub filtered: Graph,
}

impl Analysis {
    /// Finds the cycle participants of `graph` and reduces it to them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use findcycles::cycles::Strategy;
    /// use findcycles::dot::parse;
    /// use findcycles::report::Analysis;
    ///
    /// let graph = parse("digraph { a -> b -> a; b -> c }").unwrap();
    /// let analysis = Analysis::run(&graph, Strategy::Exhaustive);
    ///
    /// assert_eq!(analysis.participants.len(), 2);
    /// assert_eq!(analysis.filtered.edge_count(), 2);
    /// ```
    pub fn run(graph: &Graph, strategy: Strategy) -> Self {
        let participants = find_cycle_participants_with(graph, strategy);
        let filtered = filter_to_cycles(graph, &participants);
        Self {
            strategy,
            graph_name: graph.name().to_string(),
            input_nodes: graph.node_count(),
            input_edges: graph.edge_count(),
            participants,
            filtered,
        }
    }

    /// Number of input edges that were dropped.
    pub fn dropped_edges(&self) -> usize {
        self.input_edges - self.filtered.edge_count()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the analysis to the given writer.
    fn export<W: Write>(&self, analysis: &Analysis, writer: &mut W) -> io::Result<()>;
}

/// Export the analysis in the specified format.
pub fn export<W: Write>(
    format: OutputFormat,
    analysis: &Analysis,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        OutputFormat::Dot => dot::DotExporter.export(analysis, writer),
        OutputFormat::Json => json::JsonExporter.export(analysis, writer),
    }
}

/// Export the analysis to a string.
pub fn export_to_string(format: OutputFormat, analysis: &Analysis) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, analysis, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dot::parse;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("dot".parse::<OutputFormat>().unwrap(), OutputFormat::Dot);
        assert_eq!("GV".parse::<OutputFormat>().unwrap(), OutputFormat::Dot);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("svg".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(format!("{}", OutputFormat::Dot), "dot");
        assert_eq!(format!("{}", OutputFormat::Json), "json");
    }

    #[test]
    fn test_analysis_counts() {
        let graph = parse("digraph G { A -> B; B -> C; C -> A; C -> D }").unwrap();
        let analysis = Analysis::run(&graph, Strategy::Components);

        assert_eq!(analysis.graph_name, "G");
        assert_eq!(analysis.input_nodes, 4);
        assert_eq!(analysis.input_edges, 4);
        assert_eq!(analysis.filtered.node_count(), 3);
        assert_eq!(analysis.dropped_edges(), 1);
    }

    #[test]
    fn test_export_dispatches_on_format() {
        let graph = parse("digraph { a -> a }").unwrap();
        let analysis = Analysis::run(&graph, Strategy::Exhaustive);

        let dot = export_to_string(OutputFormat::Dot, &analysis).unwrap();
        assert!(dot.starts_with("digraph {"));

        let json = export_to_string(OutputFormat::Json, &analysis).unwrap();
        assert!(json.trim_start().starts_with('{'));
    }
}
