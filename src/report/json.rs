//! JSON export implementation.
//!
//! Exports a summary of the analysis in JSON format for machine-readable output.

use super::{Analysis, Exporter};
use crate::cycles::ParticipantSet;
use crate::graph::Attributes;
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable edge for JSON output.
#[derive(Serialize)]
struct JsonEdge<'a> {
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "no_attributes")]
    attributes: &'a Attributes,
}

fn no_attributes(attrs: &&Attributes) -> bool {
    attrs.is_empty()
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    input_nodes: usize,
    input_edges: usize,
    participants: usize,
    retained_nodes: usize,
    retained_edges: usize,
    dropped_edges: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    graph: &'a str,
    strategy: String,
    summary: JsonSummary,
    participants: &'a ParticipantSet,
    edges: Vec<JsonEdge<'a>>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, analysis: &Analysis, writer: &mut W) -> io::Result<()> {
        let edges: Vec<JsonEdge<'_>> = analysis
            .filtered
            .edges()
            .map(|e| JsonEdge {
                source: &e.source,
                target: &e.target,
                attributes: &e.attrs,
            })
            .collect();

        let export = JsonExport {
            graph: &analysis.graph_name,
            strategy: analysis.strategy.to_string(),
            summary: JsonSummary {
                input_nodes: analysis.input_nodes,
                input_edges: analysis.input_edges,
                participants: analysis.participants.len(),
                retained_nodes: analysis.filtered.node_count(),
                retained_edges: analysis.filtered.edge_count(),
                dropped_edges: analysis.dropped_edges(),
            },
            participants: &analysis.participants,
            edges,
        };

        serde_json::to_writer_pretty(&mut *writer, &export)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::Strategy;
    use crate::dot::parse;

    fn export_json(input: &str) -> serde_json::Value {
        let graph = parse(input).unwrap();
        let analysis = Analysis::run(&graph, Strategy::Exhaustive);
        let mut output = Vec::new();
        JsonExporter.export(&analysis, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_export_structure() {
        let json = export_json("digraph G { A -> B; B -> C; C -> A [label=back]; C -> D }");

        assert_eq!(json["graph"], "G");
        assert_eq!(json["strategy"], "exhaustive");
        assert_eq!(json["summary"]["input_nodes"], 4);
        assert_eq!(json["summary"]["input_edges"], 4);
        assert_eq!(json["summary"]["participants"], 3);
        assert_eq!(json["summary"]["retained_nodes"], 3);
        assert_eq!(json["summary"]["retained_edges"], 3);
        assert_eq!(json["summary"]["dropped_edges"], 1);
        assert_eq!(json["participants"], serde_json::json!(["A", "B", "C"]));

        let edges = json["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0]["source"], "A");
        assert!(edges[0].get("attributes").is_none());
        assert_eq!(edges[2]["attributes"]["label"], "back");
    }

    #[test]
    fn test_json_export_without_cycles() {
        let json = export_json("digraph { a -> b }");

        assert_eq!(json["summary"]["participants"], 0);
        assert_eq!(json["summary"]["retained_nodes"], 0);
        assert_eq!(json["participants"], serde_json::json!([]));
        assert_eq!(json["edges"], serde_json::json!([]));
    }
}
