//! DOT export of the reduced graph.

use super::{Analysis, Exporter};
use std::io::{self, Write};

/// DOT exporter implementation.
pub struct DotExporter;

impl Exporter for DotExporter {
    fn export<W: Write>(&self, analysis: &Analysis, writer: &mut W) -> io::Result<()> {
        crate::dot::write(&analysis.filtered, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycles::Strategy;
    use crate::dot::parse;

    #[test]
    fn test_dot_export_keeps_only_cycles() {
        let graph = parse("digraph G { C -> D; A -> B [color=red]; B -> A }").unwrap();
        let analysis = Analysis::run(&graph, Strategy::Exhaustive);

        let mut output = Vec::new();
        DotExporter.export(&analysis, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(
            text,
            "digraph G {\n\tA;\n\tB;\n\tA->B [ color=red ];\n\tB->A;\n}\n"
        );
    }
}
