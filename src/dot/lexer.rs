//! Tokenizer for the DOT language.

use super::{ParseError, ParseResult};

/// Kind of a DOT token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Identifier, numeral, quoted string or HTML string, verbatim
    Id(String),
    Strict,
    Graph,
    Digraph,
    Node,
    Edge,
    Subgraph,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Equals,
    Semicolon,
    Comma,
    /// Port separator in `node:port:compass`
    Colon,
    /// `->`
    Arrow,
    /// `--`
    Line,
}

impl TokenKind {
    /// Human-readable form used in error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Id(text) => format!("identifier {}", text),
            TokenKind::Strict => "'strict'".to_string(),
            TokenKind::Graph => "'graph'".to_string(),
            TokenKind::Digraph => "'digraph'".to_string(),
            TokenKind::Node => "'node'".to_string(),
            TokenKind::Edge => "'edge'".to_string(),
            TokenKind::Subgraph => "'subgraph'".to_string(),
            TokenKind::LBrace => "'{'".to_string(),
            TokenKind::RBrace => "'}'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Arrow => "'->'".to_string(),
            TokenKind::Line => "'--'".to_string(),
        }
    }
}

/// A token with the 1-based position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    /// Only whitespace seen so far on the current line
    line_start: bool,
}

/// Splits DOT source text into tokens, dropping whitespace and comments.
pub(crate) fn tokenize(input: &str) -> ParseResult<Vec<Token>> {
    let mut lexer = Lexer {
        chars: input.chars().peekable(),
        line: 1,
        column: 1,
        line_start: true,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

/// Returns true for characters that may start an unquoted identifier.
pub(crate) fn is_id_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Returns true for characters that may continue an unquoted identifier.
pub(crate) fn is_id_continue(c: char) -> bool {
    is_id_start(c) || c.is_ascii_digit()
}

impl Lexer<'_> {
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
            self.line_start = true;
        } else {
            self.column += 1;
            if !c.is_whitespace() {
                self.line_start = false;
            }
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next()
    }

    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') if self.line_start => self.skip_line(),
                Some('/') if self.peek_second() == Some('/') => self.skip_line(),
                Some('/') if self.peek_second() == Some('*') => self.skip_block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) -> ParseResult<()> {
        let (line, column) = (self.line, self.column);
        self.bump();
        self.bump();
        let mut prev = '\0';
        while let Some(c) = self.bump() {
            if prev == '*' && c == '/' {
                return Ok(());
            }
            prev = c;
        }
        Err(ParseError::Unterminated {
            what: "comment",
            line,
            column,
        })
    }

    fn next_token(&mut self) -> ParseResult<Option<Token>> {
        self.skip_trivia()?;
        let (line, column) = (self.line, self.column);
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let kind = match c {
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '=' => self.single(TokenKind::Equals),
            ';' => self.single(TokenKind::Semicolon),
            ',' => self.single(TokenKind::Comma),
            ':' => self.single(TokenKind::Colon),
            '"' => TokenKind::Id(self.quoted(line, column)?),
            '<' => TokenKind::Id(self.html(line, column)?),
            '-' => match self.peek_second() {
                Some('>') => {
                    self.bump();
                    self.bump();
                    TokenKind::Arrow
                }
                Some('-') => {
                    self.bump();
                    self.bump();
                    TokenKind::Line
                }
                Some(d) if d.is_ascii_digit() || d == '.' => TokenKind::Id(self.numeral()),
                _ => {
                    return Err(ParseError::UnexpectedChar {
                        found: c,
                        line,
                        column,
                    })
                }
            },
            c if c.is_ascii_digit() || c == '.' => TokenKind::Id(self.numeral()),
            c if is_id_start(c) => keyword_or_id(self.identifier()),
            _ => {
                return Err(ParseError::UnexpectedChar {
                    found: c,
                    line,
                    column,
                })
            }
        };

        Ok(Some(Token { kind, line, column }))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.bump();
        kind
    }

    fn identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek().filter(|&c| is_id_continue(c)) {
            text.push(c);
            self.bump();
        }
        text
    }

    fn numeral(&mut self) -> String {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.bump();
        }
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || (c == '.' && !seen_dot) {
                seen_dot |= c == '.';
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text
    }

    /// Reads a double-quoted string, keeping the quotes and escapes.
    fn quoted(&mut self, line: usize, column: usize) -> ParseResult<String> {
        let mut text = String::new();
        if let Some(open) = self.bump() {
            text.push(open);
        }
        while let Some(c) = self.bump() {
            text.push(c);
            match c {
                '"' => return Ok(text),
                '\\' => {
                    if let Some(escaped) = self.bump() {
                        text.push(escaped);
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::Unterminated {
            what: "string",
            line,
            column,
        })
    }

    /// Reads an HTML string, keeping the outer angle brackets.
    fn html(&mut self, line: usize, column: usize) -> ParseResult<String> {
        let mut text = String::new();
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            text.push(c);
            match c {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(text);
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::Unterminated {
            what: "HTML string",
            line,
            column,
        })
    }
}

fn keyword_or_id(text: String) -> TokenKind {
    match text.to_ascii_lowercase().as_str() {
        "strict" => TokenKind::Strict,
        "graph" => TokenKind::Graph,
        "digraph" => TokenKind::Digraph,
        "node" => TokenKind::Node,
        "edge" => TokenKind::Edge,
        "subgraph" => TokenKind::Subgraph,
        _ => TokenKind::Id(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn id(text: &str) -> TokenKind {
        TokenKind::Id(text.to_string())
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("STRICT DiGraph node Edge subgraph graph"),
            vec![
                TokenKind::Strict,
                TokenKind::Digraph,
                TokenKind::Node,
                TokenKind::Edge,
                TokenKind::Subgraph,
                TokenKind::Graph,
            ]
        );
    }

    #[test]
    fn test_edge_operators_and_numerals() {
        assert_eq!(
            kinds("a->b--c -1.5 .5 -.25 42"),
            vec![
                id("a"),
                TokenKind::Arrow,
                id("b"),
                TokenKind::Line,
                id("c"),
                id("-1.5"),
                id(".5"),
                id("-.25"),
                id("42"),
            ]
        );
    }

    #[test]
    fn test_quoted_strings_are_verbatim() {
        assert_eq!(
            kinds(r#""hello world" "say \"hi\"""#),
            vec![id(r#""hello world""#), id(r#""say \"hi\"""#)]
        );
    }

    #[test]
    fn test_html_strings_nest() {
        assert_eq!(kinds("<<b>bold</b>>"), vec![id("<<b>bold</b>>")]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let input = "# preprocessor line\na // trailing\n/* block\ncomment */ b";
        assert_eq!(kinds(input), vec![id("a"), id("b")]);
    }

    #[test]
    fn test_port_separator() {
        assert_eq!(
            kinds("a:n:sw"),
            vec![id("a"), TokenKind::Colon, id("n"), TokenKind::Colon, id("sw")]
        );
    }

    #[test]
    fn test_hash_inside_line_is_an_error() {
        let err = tokenize("a # b").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedChar {
                found: '#',
                line: 1,
                column: 3
            }
        );
    }

    #[test]
    fn test_positions() {
        let tokens = tokenize("digraph {\n  a -> b\n}").unwrap();
        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(positions, vec![(1, 1), (1, 9), (2, 3), (2, 5), (2, 8), (3, 1)]);
    }

    #[test]
    fn test_unterminated_inputs() {
        assert!(matches!(
            tokenize("\"open").unwrap_err(),
            ParseError::Unterminated { what: "string", line: 1, column: 1 }
        ));
        assert!(matches!(
            tokenize("a <b").unwrap_err(),
            ParseError::Unterminated { what: "HTML string", line: 1, column: 3 }
        ));
        assert!(matches!(
            tokenize("/* never closed").unwrap_err(),
            ParseError::Unterminated { what: "comment", .. }
        ));
    }
}
