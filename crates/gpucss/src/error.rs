//! Error types for CSS lexing and parsing.
//!
//! Every variant carries the byte offset in the source text where the
//! problem was detected. None of these errors escape [`crate::transform`];
//! they are only visible through [`crate::try_transform`].

use thiserror::Error;

/// Errors produced while splitting CSS text into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A quoted string hit a raw newline or the end of input.
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),

    /// A `/*` comment was never closed.
    #[error("unterminated comment starting at byte {0}")]
    UnterminatedComment(usize),

    /// An unquoted `url(` was never closed.
    #[error("unterminated url starting at byte {0}")]
    UnterminatedUrl(usize),
}

/// Structural errors produced while building a [`crate::Stylesheet`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token appeared where it is not allowed.
    #[error("unexpected `{found}` at byte {offset}")]
    UnexpectedToken { found: String, offset: usize },

    /// A `{` block was still open at the end of input.
    #[error("block opened at byte {0} is never closed")]
    UnclosedBlock(usize),

    /// The input ended in the middle of a rule or at-rule prelude.
    #[error("unexpected end of input in construct starting at byte {0}")]
    UnexpectedEof(usize),

    /// An at-rule whose name is not in the recognized set.
    #[error("unknown at-rule `@{name}` at byte {offset}")]
    UnknownAtRule { name: String, offset: usize },

    /// A rule block whose selector list is empty after trimming.
    #[error("rule at byte {0} has no selectors")]
    EmptySelector(usize),

    /// A declaration with nothing after the colon.
    #[error("declaration `{property}` at byte {offset} has no value")]
    EmptyValue { property: String, offset: usize },

    /// A declaration without a `:` between property and value.
    #[error("expected `:` after property at byte {0}")]
    MissingColon(usize),

    /// Block at-rules nested deeper than the parser accepts.
    #[error("block opened at byte {0} is nested too deeply")]
    NestingTooDeep(usize),
}

/// Any failure of the tokenize → parse front half of the pipeline.
///
/// # Examples
///
/// ```rust
/// use gpucss::{Configuration, GpuCssError, try_transform};
///
/// let result = try_transform(".broken { transform: ;", &Configuration::default());
/// assert!(matches!(result, Err(GpuCssError::Parse(_))));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GpuCssError {
    #[error("CSS lex error: {0}")]
    Lex(#[from] LexError),

    #[error("CSS syntax error: {0}")]
    Parse(#[from] ParseError),
}
