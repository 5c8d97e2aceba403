//! CSS parsing and stylesheet data structures.
//!
//! This module turns the token stream from [`crate::lexer`] into a
//! [`Stylesheet`] tree:
//!
//! - [`parse_stylesheet`]: Main entry point, tokenizes and parses CSS text
//! - [`parse`]: Parses an already tokenized stylesheet
//! - [`Stylesheet`], [`Node`], [`RuleBlock`], [`AtRuleBlock`], [`Declaration`]
//!
//! ## Submodules
//!
//! - [`stylesheet`]: Tree types
//! - [`selectors`]: Selector list splitting and token text reconstruction
//! - [`at_rules`]: The table of recognized at-rules
//!
//! ## Example
//!
//! ```rust
//! use gpucss::parser::{parse_stylesheet, Node};
//!
//! let sheet = parse_stylesheet(".box, .card { animation: fade 1s !important }").unwrap();
//! let Node::Rule(rule) = &sheet.nodes[0] else { panic!("expected a rule") };
//!
//! assert_eq!(rule.selectors.len(), 2);
//! assert_eq!(rule.declarations[0].value, "fade 1s");
//! assert!(rule.declarations[0].important);
//! ```

pub mod at_rules;
pub mod selectors;
pub mod stylesheet;

pub use crate::parser::at_rules::AtRuleKind;
pub use crate::parser::stylesheet::{
    AtRuleBlock, AtRuleBody, AtStatement, Declaration, Node, RuleBlock, Selector, Stylesheet,
};

use crate::error::{GpuCssError, ParseError};
use crate::lexer::{Token, TokenKind, tokenize};
use crate::parser::selectors::{join_tokens, parse_selector_list};

/// Tokenizes and parses a full stylesheet.
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet, GpuCssError> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}

/// Parses a token stream into a stylesheet.
pub fn parse(tokens: &[Token<'_>]) -> Result<Stylesheet, ParseError> {
    let mut parser = Parser::new(tokens);
    let nodes = parser.parse_nodes(None)?;
    Ok(Stylesheet::new(nodes))
}

/// Deepest accepted nesting of block at-rules.
pub const MAX_NESTING_DEPTH: usize = 256;

/// How a prelude (selector list or at-rule prelude) ended.
enum PreludeEnd {
    Block(usize),
    Semicolon,
}

struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Skips whitespace and stray semicolons.
    fn skip_trivia(&mut self) {
        while self
            .peek()
            .is_some_and(|t| matches!(t.kind, TokenKind::Whitespace | TokenKind::Semicolon))
        {
            self.pos += 1;
        }
    }

    /// Parses nodes until end of input (`open == None`) or until the `}`
    /// closing the block opened at byte `open`.
    fn parse_nodes(&mut self, open: Option<usize>) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();

        loop {
            self.skip_trivia();
            let Some(token) = self.peek() else {
                return match open {
                    None => Ok(nodes),
                    Some(offset) => Err(ParseError::UnclosedBlock(offset)),
                };
            };

            match token.kind {
                TokenKind::CloseBrace => {
                    if open.is_none() {
                        return Err(unexpected(token));
                    }
                    self.pos += 1;
                    return Ok(nodes);
                }
                TokenKind::AtKeyword => nodes.push(self.parse_at_rule()?),
                _ => nodes.push(Node::Rule(self.parse_rule_block()?)),
            }
        }
    }

    /// [`Self::parse_nodes`] for the body of a block at-rule, bounded by
    /// [`MAX_NESTING_DEPTH`].
    fn parse_nested_nodes(&mut self, open: usize) -> Result<Vec<Node>, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep(open));
        }
        self.depth += 1;
        let nodes = self.parse_nodes(Some(open));
        self.depth -= 1;
        nodes
    }

    /// Collects tokens up to a top-level `{` or `;`, consuming the terminator.
    fn parse_prelude(&mut self, start: usize) -> Result<(&'t [Token<'a>], PreludeEnd), ParseError> {
        let tokens = self.tokens;
        let first = self.pos;
        let mut depth = 0usize;

        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::OpenBrace if depth == 0 => {
                    let prelude = &tokens[first..self.pos - 1];
                    return Ok((prelude, PreludeEnd::Block(token.offset)));
                }
                TokenKind::Semicolon if depth == 0 => {
                    let prelude = &tokens[first..self.pos - 1];
                    return Ok((prelude, PreludeEnd::Semicolon));
                }
                TokenKind::CloseBrace => return Err(unexpected(token)),
                _ => {}
            }
        }

        Err(ParseError::UnexpectedEof(start))
    }

    fn parse_at_rule(&mut self) -> Result<Node, ParseError> {
        let Some(keyword) = self.bump() else {
            return Err(ParseError::UnexpectedEof(0));
        };
        let name = keyword.at_name().unwrap_or_default();
        let kind = AtRuleKind::lookup(name).ok_or_else(|| ParseError::UnknownAtRule {
            name: name.to_string(),
            offset: keyword.offset,
        })?;

        let (prelude_tokens, end) = self.parse_prelude(keyword.offset)?;
        let prelude = join_tokens(prelude_tokens);

        match end {
            PreludeEnd::Semicolon if kind.allows_statement() => {
                Ok(Node::Statement(AtStatement {
                    name: name.to_string(),
                    prelude,
                }))
            }
            PreludeEnd::Semicolon => Err(ParseError::UnexpectedToken {
                found: ";".to_string(),
                offset: self.tokens[self.pos - 1].offset,
            }),
            PreludeEnd::Block(open) if kind.allows_block() => {
                let body = match kind {
                    AtRuleKind::Declarations => {
                        AtRuleBody::Declarations(self.parse_declarations(open)?)
                    }
                    _ => AtRuleBody::Rules(self.parse_nested_nodes(open)?),
                };
                Ok(Node::AtRule(AtRuleBlock {
                    name: name.to_string(),
                    prelude,
                    body,
                }))
            }
            PreludeEnd::Block(open) => Err(ParseError::UnexpectedToken {
                found: "{".to_string(),
                offset: open,
            }),
        }
    }

    fn parse_rule_block(&mut self) -> Result<RuleBlock, ParseError> {
        let start = self.peek().map_or(0, |t| t.offset);
        let (prelude_tokens, end) = self.parse_prelude(start)?;

        let open = match end {
            PreludeEnd::Block(open) => open,
            PreludeEnd::Semicolon => return Err(unexpected(&self.tokens[self.pos - 1])),
        };

        let selectors = parse_selector_list(prelude_tokens);
        if selectors.is_empty() {
            return Err(ParseError::EmptySelector(start));
        }

        let declarations = self.parse_declarations(open)?;
        Ok(RuleBlock::new(selectors, declarations))
    }

    /// Parses declarations up to and including the `}` closing the block
    /// opened at byte `open`.
    fn parse_declarations(&mut self, open: usize) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            self.skip_trivia();
            match self.peek() {
                None => return Err(ParseError::UnclosedBlock(open)),
                Some(token) if token.kind == TokenKind::CloseBrace => {
                    self.pos += 1;
                    return Ok(declarations);
                }
                Some(_) => declarations.push(self.parse_declaration(open)?),
            }
        }
    }

    fn parse_declaration(&mut self, open: usize) -> Result<Declaration, ParseError> {
        let start = self.pos;
        let start_offset = self.tokens[start].offset;

        // property
        loop {
            let Some(token) = self.peek() else {
                return Err(ParseError::UnclosedBlock(open));
            };
            match token.kind {
                TokenKind::Colon => break,
                TokenKind::Semicolon | TokenKind::CloseBrace | TokenKind::OpenBrace => {
                    return Err(ParseError::MissingColon(start_offset));
                }
                _ => self.pos += 1,
            }
        }
        let property = join_tokens(&self.tokens[start..self.pos]);
        if property.is_empty() {
            return Err(unexpected(&self.tokens[self.pos]));
        }
        self.pos += 1; // ':'

        // value
        let value_start = self.pos;
        let mut depth = 0usize;
        loop {
            let Some(token) = self.peek() else {
                return Err(ParseError::UnclosedBlock(open));
            };
            match token.kind {
                TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseParen | TokenKind::CloseBracket => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Semicolon | TokenKind::CloseBrace if depth == 0 => break,
                TokenKind::OpenBrace => return Err(unexpected(token)),
                _ => {}
            }
            self.pos += 1;
        }

        let (value_tokens, important) = strip_important(&self.tokens[value_start..self.pos]);
        let value = join_tokens(value_tokens);
        if value.is_empty() {
            return Err(ParseError::EmptyValue {
                property,
                offset: start_offset,
            });
        }

        // A `;` terminator is consumed here, a `}` is left for the caller.
        if self.peek().is_some_and(|t| t.kind == TokenKind::Semicolon) {
            self.pos += 1;
        }

        Ok(Declaration {
            property,
            value,
            important,
        })
    }
}

/// Removes a trailing `! important` (any case, optional whitespace).
fn strip_important<'t, 'a>(tokens: &'t [Token<'a>]) -> (&'t [Token<'a>], bool) {
    let mut end = tokens.len();
    while end > 0 && tokens[end - 1].is_whitespace() {
        end -= 1;
    }
    if end == 0 {
        return (tokens, false);
    }

    let last = &tokens[end - 1];
    if last.kind != TokenKind::Ident || !last.text.eq_ignore_ascii_case("important") {
        return (tokens, false);
    }

    let mut bang = end - 1;
    while bang > 0 && tokens[bang - 1].is_whitespace() {
        bang -= 1;
    }
    if bang > 0 && tokens[bang - 1].kind == TokenKind::Delim('!') {
        (&tokens[..bang - 1], true)
    } else {
        (tokens, false)
    }
}

fn unexpected(token: &Token<'_>) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.text.to_string(),
        offset: token.offset,
    }
}
