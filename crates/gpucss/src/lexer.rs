//! Lexer for CSS source text.
//!
//! Converts input text into a stream of tokens. Comments are dropped,
//! whitespace runs collapse into a single [`TokenKind::Whitespace`] token,
//! and every token keeps the exact source slice it was read from so the
//! parser can rebuild selectors and values textually.

use nom::{
    IResult,
    branch::alt,
    character::complete::{char, digit1, one_of},
    combinator::{opt, recognize},
    sequence::{pair, tuple},
};

use crate::error::LexError;

/// The category of a [`Token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `animation`, `-webkit-transform`, `--gap`, `md\:flex`
    Ident,
    /// `@media` (text includes the `@`)
    AtKeyword,
    /// `#header`, `#fff`
    Hash,
    /// Quoted string, text includes the quotes.
    String,
    /// `10`, `-0.5em`, `50%`, `1e3`
    Number,
    /// Unquoted `url(...)`, text includes `url(` and `)`.
    Url,
    Whitespace,
    Colon,
    Semicolon,
    Comma,
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    /// Any other single character: `.`, `>`, `+`, `~`, `*`, `!`, ...
    Delim(char),
}

/// A token produced by the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw source text of the token.
    pub text: &'a str,
    /// Byte offset of the token in the source.
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Byte offset one past the end of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// For an [`TokenKind::AtKeyword`], the name without the leading `@`.
    pub fn at_name(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::AtKeyword => Some(&self.text[1..]),
            _ => None,
        }
    }
}

/// Tokenizes a complete stylesheet, stopping at the first error.
///
/// # Examples
///
/// ```
/// use gpucss::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize(".box { opacity: 0.5; }").unwrap();
/// assert_eq!(tokens[0].kind, TokenKind::Delim('.'));
/// assert_eq!(tokens[1].text, "box");
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(input).collect()
}

/// Lexer for CSS text.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            failed: false,
        }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.input[start..self.pos],
            offset: start,
        }
    }

    /// Skip every comment at the cursor. Whitespace is left in place.
    fn skip_comments(&mut self) -> Result<(), LexError> {
        while self.remaining().starts_with("/*") {
            let start = self.pos;
            match self.remaining()[2..].find("*/") {
                Some(idx) => self.pos += 2 + idx + 2,
                None => return Err(LexError::UnterminatedComment(start)),
            }
        }
        Ok(())
    }

    fn consume_whitespace(&mut self) -> Token<'a> {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
        self.token(TokenKind::Whitespace, start)
    }

    fn consume_string(&mut self, quote: char) -> Result<Token<'a>, LexError> {
        let start = self.pos;
        self.advance(); // opening quote

        loop {
            match self.advance() {
                None | Some('\n') => return Err(LexError::UnterminatedString(start)),
                Some('\\') => {
                    // An escaped newline continues the string.
                    if self.advance().is_none() {
                        return Err(LexError::UnterminatedString(start));
                    }
                }
                Some(c) if c == quote => break,
                Some(_) => {}
            }
        }

        Ok(self.token(TokenKind::String, start))
    }

    /// Consume a numeric literal and its unit, if the cursor starts one.
    fn consume_number(&mut self) -> Option<Token<'a>> {
        let start = self.pos;
        let (_, literal) = number_literal(self.remaining()).ok()?;
        self.pos += literal.len();

        if self.peek() == Some('%') {
            self.advance();
        } else if self.starts_ident() {
            self.consume_name();
        }

        Some(self.token(TokenKind::Number, start))
    }

    /// Whether the next characters begin an identifier.
    fn starts_ident(&self) -> bool {
        match self.peek() {
            Some('-') => match self.peek_nth(1) {
                Some('-') => true,
                Some('\\') => self.peek_nth(2).is_some_and(|c| c != '\n'),
                Some(c) => is_name_start(c),
                None => false,
            },
            Some('\\') => self.peek_nth(1).is_some_and(|c| c != '\n'),
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    /// Consume name characters, including backslash escapes.
    fn consume_name(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\\' {
                match self.peek_nth(1) {
                    Some(next) if next != '\n' => {
                        self.advance();
                        self.advance();
                    }
                    _ => break,
                }
            } else if is_name_char(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn consume_ident_like(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.pos;
        self.consume_name();

        let name = &self.input[start..self.pos];
        if name.eq_ignore_ascii_case("url") && self.peek() == Some('(') {
            let after_paren = self.remaining()[1..].trim_start();
            if !after_paren.starts_with(['"', '\'']) {
                return self.consume_url(start);
            }
        }

        Ok(self.token(TokenKind::Ident, start))
    }

    /// Consume the body of an unquoted `url(...)`; `start` points at `url`.
    fn consume_url(&mut self, start: usize) -> Result<Token<'a>, LexError> {
        self.advance(); // '('

        loop {
            match self.advance() {
                None => return Err(LexError::UnterminatedUrl(start)),
                Some('\\') => {
                    self.advance();
                }
                Some(')') => break,
                Some(_) => {}
            }
        }

        Ok(self.token(TokenKind::Url, start))
    }

    fn next_token(&mut self) -> Option<Result<Token<'a>, LexError>> {
        if let Err(err) = self.skip_comments() {
            return Some(Err(err));
        }

        let start = self.pos;
        let c = self.peek()?;

        if c.is_whitespace() {
            return Some(Ok(self.consume_whitespace()));
        }

        let starts_number = c.is_ascii_digit()
            || (matches!(c, '.' | '+' | '-') && number_literal(self.remaining()).is_ok());
        if starts_number {
            if let Some(token) = self.consume_number() {
                return Some(Ok(token));
            }
        }

        if self.starts_ident() {
            return Some(self.consume_ident_like());
        }

        match c {
            '"' | '\'' => Some(self.consume_string(c)),
            '@' => {
                self.advance();
                if self.starts_ident() {
                    self.consume_name();
                    Some(Ok(self.token(TokenKind::AtKeyword, start)))
                } else {
                    Some(Ok(self.token(TokenKind::Delim('@'), start)))
                }
            }
            '#' => {
                self.advance();
                let name_follows = self
                    .peek()
                    .is_some_and(|n| is_name_char(n) || n == '\\');
                if name_follows {
                    self.consume_name();
                }
                let kind = if self.pos - start > 1 {
                    TokenKind::Hash
                } else {
                    TokenKind::Delim('#')
                };
                Some(Ok(self.token(kind, start)))
            }
            _ => {
                self.advance();
                let kind = match c {
                    ':' => TokenKind::Colon,
                    ';' => TokenKind::Semicolon,
                    ',' => TokenKind::Comma,
                    '{' => TokenKind::OpenBrace,
                    '}' => TokenKind::CloseBrace,
                    '(' => TokenKind::OpenParen,
                    ')' => TokenKind::CloseParen,
                    '[' => TokenKind::OpenBracket,
                    ']' => TokenKind::CloseBracket,
                    other => TokenKind::Delim(other),
                };
                Some(Ok(self.token(kind, start)))
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_token();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

/// Sign, integer and/or fraction, optional exponent: `-1.5e3`, `.5`, `+2`.
fn number_literal(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(input)
}
