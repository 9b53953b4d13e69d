//! Graphviz DOT input and output.
//!
//! This module reads a DOT graph description into a [`Graph`](crate::graph::Graph)
//! and writes a graph back out as DOT text.
//!
//! # Supported Input
//!
//! - `graph` / `digraph` headers, optionally `strict` and named
//! - node statements, edge statements and edge chains (`a -> b -> c`)
//! - ports on edge endpoints (`a:port:compass`)
//! - attribute lists, `graph`/`node`/`edge` attribute statements, `key=value`
//! - subgraphs, flattened into the enclosing graph, also as edge endpoints
//! - identifiers, numerals, quoted strings and HTML strings
//! - `//`, `/* */` and `#` line comments
//!
//! `node` and `edge` defaults are scoped to the subgraph that declares them.
//! Subgraphs nested deeper than [`parser::MAX_NESTING`] levels are rejected.
//!
//! # Example
//!
//! ```
//! use findcycles::dot;
//!
//! let graph = dot::parse("digraph G { a -> b; b -> a }").unwrap();
//! let text = dot::to_string(&graph);
//! assert!(text.starts_with("digraph G {"));
//! ```

mod lexer;
pub mod parser;
pub mod writer;

pub use parser::{parse, parse_file, ParseError, ParseResult, ReadError};
pub use writer::{to_string, write};
