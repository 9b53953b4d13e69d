//! Parser for Graphviz DOT graph descriptions.
//!
//! Builds a [`Graph`] from the supported DOT subset. Subgraph bodies are
//! flattened into the enclosing graph. `node [..]` and `edge [..]` defaults
//! apply to statements that follow them in the same subgraph and in the
//! subgraphs it contains. A subgraph used as an edge endpoint stands for
//! every node mentioned inside it.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::lexer::{tokenize, Token, TokenKind};
use crate::graph::{Attributes, Edge, Graph, Port};
use tracing::debug;

/// Deepest subgraph nesting the parser accepts.
pub const MAX_NESTING: usize = 100;

/// Errors that can occur while reading a DOT graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A character that cannot start any token.
    #[error("{line}:{column}: unexpected character '{found}'")]
    UnexpectedChar {
        found: char,
        line: usize,
        column: usize,
    },

    /// A token that does not fit the grammar at this point.
    #[error("{line}:{column}: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
        column: usize,
    },

    /// A string, HTML string or comment that is never closed.
    #[error("{line}:{column}: unterminated {what}")]
    Unterminated {
        what: &'static str,
        line: usize,
        column: usize,
    },

    /// Input ended in the middle of the graph.
    #[error("{line}:{column}: unexpected end of input, expected {expected}")]
    UnexpectedEof {
        expected: String,
        line: usize,
        column: usize,
    },

    /// Subgraphs nested beyond [`MAX_NESTING`].
    #[error("{line}:{column}: subgraphs nested more than {limit} levels deep")]
    TooDeep {
        limit: usize,
        line: usize,
        column: usize,
    },
}

/// Result type alias for DOT parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while reading a DOT file from disk.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The file content is not a valid graph.
    #[error("Failed to parse graph: {0}")]
    Parse(#[from] ParseError),
}

/// Parses a DOT file from a file path.
pub fn parse_file(path: &Path) -> Result<Graph, ReadError> {
    let content = fs::read_to_string(path)?;
    Ok(parse(&content)?)
}

/// Parses a DOT graph description.
///
/// # Example
///
/// ```
/// use findcycles::dot::parse;
///
/// let graph = parse("digraph G { a -> b -> a; c [shape=box] }").unwrap();
/// assert_eq!(graph.name(), "G");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// ```
pub fn parse(input: &str) -> ParseResult<Graph> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        graph: Graph::default(),
        root: Scope::default(),
        nested: Vec::new(),
        end: end_position(input),
    };
    parser.parse_graph()?;

    debug!(
        name = parser.graph.name(),
        nodes = parser.graph.node_count(),
        edges = parser.graph.edge_count(),
        "parsed graph"
    );
    Ok(parser.graph)
}

fn end_position(input: &str) -> (usize, usize) {
    let line = input.matches('\n').count() + 1;
    let column = input
        .rsplit('\n')
        .next()
        .map_or(0, |last| last.chars().count())
        + 1;
    (line, column)
}

/// Default attributes and mentioned nodes of one graph or subgraph body.
#[derive(Debug, Default)]
struct Scope {
    node_defaults: Attributes,
    edge_defaults: Attributes,
    /// Nodes mentioned in this body, in first-mention order
    members: Vec<String>,
    seen: HashSet<String>,
}

impl Scope {
    /// An empty body inheriting this scope's defaults.
    fn child(&self) -> Scope {
        Scope {
            node_defaults: self.node_defaults.clone(),
            edge_defaults: self.edge_defaults.clone(),
            ..Scope::default()
        }
    }

    fn remember(&mut self, id: &str) {
        if self.seen.insert(id.to_string()) {
            self.members.push(id.to_string());
        }
    }
}

/// One side of an edge operator.
enum Operand {
    Node { id: String, port: Option<Port> },
    /// All nodes mentioned in a subgraph
    Group(Vec<String>),
}

impl Operand {
    fn endpoints(&self) -> Vec<(&str, Option<&Port>)> {
        match self {
            Operand::Node { id, port } => vec![(id.as_str(), port.as_ref())],
            Operand::Group(ids) => ids.iter().map(|id| (id.as_str(), None)).collect(),
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    graph: Graph,
    /// Scope of the root graph body
    root: Scope,
    /// Open subgraph bodies, innermost last
    nested: Vec<Scope>,
    /// Position just past the last character, for end-of-input errors
    end: (usize, usize),
}

impl Parser {
    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|token| &token.kind)
    }

    fn peek_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|token| &token.kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn position(&self) -> (usize, usize) {
        self.tokens
            .get(self.pos)
            .map_or(self.end, |token| (token.line, token.column))
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(token) => ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.kind.describe(),
                line: token.line,
                column: token.column,
            },
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
                line: self.end.0,
                column: self.end.1,
            },
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.describe()))
        }
    }

    fn expect_id(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some(TokenKind::Id(_)) => match self.advance() {
                Some(Token {
                    kind: TokenKind::Id(text),
                    ..
                }) => Ok(text),
                _ => Err(self.unexpected("an identifier")),
            },
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn scope(&self) -> &Scope {
        self.nested.last().unwrap_or(&self.root)
    }

    fn scope_mut(&mut self) -> &mut Scope {
        match self.nested.last_mut() {
            Some(scope) => scope,
            None => &mut self.root,
        }
    }

    /// Registers a mentioned node, applying node defaults on first sight.
    fn mention(&mut self, id: &str) {
        if !self.graph.contains(id) {
            let defaults = self.scope().node_defaults.clone();
            self.graph.add_node(id, defaults);
        }
        if let Some(scope) = self.nested.last_mut() {
            scope.remember(id);
        }
    }

    /// graph := [strict] (graph | digraph) [ID] '{' stmt_list '}'
    fn parse_graph(&mut self) -> ParseResult<()> {
        self.eat(&TokenKind::Strict);
        if !self.eat(&TokenKind::Digraph) && !self.eat(&TokenKind::Graph) {
            return Err(self.unexpected("'graph' or 'digraph'"));
        }
        if matches!(self.peek(), Some(TokenKind::Id(_))) {
            let name = self.expect_id()?;
            self.graph.set_name(name);
        }
        self.expect(&TokenKind::LBrace)?;
        self.parse_stmt_list()?;
        self.expect(&TokenKind::RBrace)?;

        if self.pos < self.tokens.len() {
            return Err(self.unexpected("end of input"));
        }
        Ok(())
    }

    fn parse_stmt_list(&mut self) -> ParseResult<()> {
        while !matches!(self.peek(), Some(TokenKind::RBrace) | None) {
            self.parse_stmt()?;
            if !self.eat(&TokenKind::Semicolon) {
                self.eat(&TokenKind::Comma);
            }
        }
        Ok(())
    }

    fn parse_stmt(&mut self) -> ParseResult<()> {
        match self.peek() {
            Some(TokenKind::Graph) => {
                self.pos += 1;
                let attrs = self.parse_attr_list()?;
                if self.nested.is_empty() {
                    for (key, value) in attrs {
                        self.graph.set_attr(key, value);
                    }
                }
                Ok(())
            }
            Some(TokenKind::Node) => {
                self.pos += 1;
                let attrs = self.parse_attr_list()?;
                self.scope_mut().node_defaults.extend(attrs);
                Ok(())
            }
            Some(TokenKind::Edge) => {
                self.pos += 1;
                let attrs = self.parse_attr_list()?;
                self.scope_mut().edge_defaults.extend(attrs);
                Ok(())
            }
            Some(TokenKind::Id(_)) if self.peek_at(1) == Some(&TokenKind::Equals) => {
                let key = self.expect_id()?;
                self.pos += 1;
                let value = self.expect_id()?;
                if self.nested.is_empty() {
                    self.graph.set_attr(key, value);
                }
                Ok(())
            }
            Some(TokenKind::Id(_)) | Some(TokenKind::Subgraph) | Some(TokenKind::LBrace) => {
                self.parse_node_or_edge()
            }
            _ => Err(self.unexpected("a statement")),
        }
    }

    /// subgraph := [subgraph [ID]] '{' stmt_list '}'
    ///
    /// Returns the nodes mentioned inside, nested subgraphs included.
    fn parse_subgraph(&mut self) -> ParseResult<Vec<String>> {
        if self.nested.len() >= MAX_NESTING {
            let (line, column) = self.position();
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING,
                line,
                column,
            });
        }
        if self.eat(&TokenKind::Subgraph) && matches!(self.peek(), Some(TokenKind::Id(_))) {
            self.pos += 1;
        }
        self.expect(&TokenKind::LBrace)?;
        let scope = self.scope().child();
        self.nested.push(scope);
        self.parse_stmt_list()?;
        self.expect(&TokenKind::RBrace)?;

        let members = self.nested.pop().map(|scope| scope.members).unwrap_or_default();
        if let Some(parent) = self.nested.last_mut() {
            for id in &members {
                parent.remember(id);
            }
        }
        Ok(members)
    }

    /// operand := ID [':' ID [':' ID]] | subgraph
    fn parse_operand(&mut self) -> ParseResult<Operand> {
        if matches!(self.peek(), Some(TokenKind::Subgraph) | Some(TokenKind::LBrace)) {
            return Ok(Operand::Group(self.parse_subgraph()?));
        }
        let id = self.expect_id()?;
        let port = if self.eat(&TokenKind::Colon) {
            let name = self.expect_id()?;
            let compass = if self.eat(&TokenKind::Colon) {
                Some(self.expect_id()?)
            } else {
                None
            };
            Some(Port { name, compass })
        } else {
            None
        };
        self.mention(&id);
        Ok(Operand::Node { id, port })
    }

    /// node_stmt := operand [attr_list]
    /// edge_stmt := operand (edgeop operand)+ [attr_list]
    fn parse_node_or_edge(&mut self) -> ParseResult<()> {
        let first = self.parse_operand()?;
        let mut chain: Vec<(bool, Operand)> = Vec::new();

        loop {
            let directed = match self.peek() {
                Some(TokenKind::Arrow) => true,
                Some(TokenKind::Line) => false,
                _ => break,
            };
            self.pos += 1;
            chain.push((directed, self.parse_operand()?));
        }

        if chain.is_empty() {
            if let Operand::Node { id, .. } = first {
                if self.peek() == Some(&TokenKind::LBracket) {
                    let attrs = self.parse_attr_list()?;
                    self.graph.add_node(&id, attrs);
                }
            }
            return Ok(());
        }

        let mut attrs = self.scope().edge_defaults.clone();
        if self.peek() == Some(&TokenKind::LBracket) {
            attrs.extend(self.parse_attr_list()?);
        }

        let mut left = first;
        for (directed, right) in chain {
            for (source, source_port) in left.endpoints() {
                for (target, target_port) in right.endpoints() {
                    self.graph.insert_edge(Edge {
                        source: source.to_string(),
                        target: target.to_string(),
                        source_port: source_port.cloned(),
                        target_port: target_port.cloned(),
                        directed,
                        attrs: attrs.clone(),
                    });
                }
            }
            left = right;
        }
        Ok(())
    }

    /// attr_list := ('[' (ID ['=' ID] [';' | ','])* ']')+
    fn parse_attr_list(&mut self) -> ParseResult<Attributes> {
        let mut attrs = Attributes::new();
        self.expect(&TokenKind::LBracket)?;
        loop {
            while !self.eat(&TokenKind::RBracket) {
                let key = self.expect_id()?;
                let value = if self.eat(&TokenKind::Equals) {
                    self.expect_id()?
                } else {
                    "true".to_string()
                };
                attrs.insert(key, value);
                if !self.eat(&TokenKind::Semicolon) {
                    self.eat(&TokenKind::Comma);
                }
            }
            if !self.eat(&TokenKind::LBracket) {
                return Ok(attrs);
            }
        }
    }
}
