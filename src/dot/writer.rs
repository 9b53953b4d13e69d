//! DOT output for graphs.
//!
//! Renders a [`Graph`] as a `digraph`. Ids and attribute values that are
//! already valid DOT ids (including quoted and HTML strings read by the
//! parser) are written verbatim; anything else is quoted.

use super::lexer::{is_id_continue, is_id_start};
use crate::graph::{Attributes, Graph, Port};
use std::borrow::Cow;
use std::io::{self, Write};

/// Writes `graph` in DOT syntax.
///
/// Graph attributes come first, then one line per node in node order, then
/// one line per edge in edge order. Every edge is written with `->`.
pub fn write<W: Write>(graph: &Graph, writer: &mut W) -> io::Result<()> {
    if graph.name().is_empty() {
        writeln!(writer, "digraph {{")?;
    } else {
        writeln!(writer, "digraph {} {{", escape_id(graph.name()))?;
    }

    for (key, value) in graph.attrs() {
        writeln!(writer, "\t{}={};", escape_id(key), escape_id(value))?;
    }

    for node in graph.nodes() {
        writeln!(writer, "\t{}{};", escape_id(&node.id), format_attrs(&node.attrs))?;
    }

    for edge in graph.edges() {
        writeln!(
            writer,
            "\t{}->{}{};",
            format_endpoint(&edge.source, edge.source_port.as_ref()),
            format_endpoint(&edge.target, edge.target_port.as_ref()),
            format_attrs(&edge.attrs)
        )?;
    }

    writeln!(writer, "}}")
}

/// Renders `graph` in DOT syntax to a string.
///
/// # Example
///
/// ```
/// use findcycles::dot::{parse, to_string};
///
/// let graph = parse("digraph G { a -> b [color=red] }").unwrap();
/// assert_eq!(to_string(&graph), "digraph G {\n\ta;\n\tb;\n\ta->b [ color=red ];\n}\n");
/// ```
pub fn to_string(graph: &Graph) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    if write(graph, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

fn format_endpoint(id: &str, port: Option<&Port>) -> String {
    let mut text = escape_id(id).into_owned();
    if let Some(port) = port {
        text.push(':');
        text.push_str(&escape_id(&port.name));
        if let Some(compass) = &port.compass {
            text.push(':');
            text.push_str(&escape_id(compass));
        }
    }
    text
}

fn format_attrs(attrs: &Attributes) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = attrs
        .iter()
        .map(|(key, value)| format!("{}={}", escape_id(key), escape_id(value)))
        .collect();
    format!(" [ {} ]", pairs.join(", "))
}

/// Returns `id` unchanged if it is a valid DOT id, otherwise quoted.
fn escape_id(id: &str) -> Cow<'_, str> {
    if is_plain_id(id) || is_numeral(id) || is_quoted(id) || is_html(id) {
        return Cow::Borrowed(id);
    }

    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

fn is_plain_id(id: &str) -> bool {
    let mut chars = id.chars();
    let keyword = matches!(
        id.to_ascii_lowercase().as_str(),
        "strict" | "graph" | "digraph" | "node" | "edge" | "subgraph"
    );
    !keyword && chars.next().is_some_and(is_id_start) && chars.all(is_id_continue)
}

fn is_numeral(id: &str) -> bool {
    let digits = id.strip_prefix('-').unwrap_or(id);
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let fraction = parts.next();
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && all_digits(whole),
        Some(fraction) => {
            (!whole.is_empty() || !fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
        }
    }
}

fn is_quoted(id: &str) -> bool {
    if id.len() < 2 || !id.starts_with('"') || !id.ends_with('"') {
        return false;
    }
    let mut escaped = false;
    let inner = &id[1..id.len() - 1];
    for c in inner.chars() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return false,
            _ => {}
        }
    }
    !escaped
}

fn is_html(id: &str) -> bool {
    if !id.starts_with('<') || !id.ends_with('>') {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in id.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth = match depth.checked_sub(1) {
                    Some(depth) => depth,
                    None => return false,
                };
                if depth == 0 && i != id.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}
