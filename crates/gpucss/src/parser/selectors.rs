//! Selector list splitting and token-to-text reconstruction.

use crate::lexer::{Token, TokenKind};
use crate::parser::Selector;

/// Rebuilds source text from a token slice.
///
/// Whitespace runs become a single space and leading and trailing
/// whitespace is dropped. A gap left by a stripped comment becomes a space
/// only when the neighbours would otherwise lex as one token, so
/// `1px/**/solid` becomes `1px solid` while `.a/**/.b` stays `.a.b`.
pub fn join_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    let mut pending_space = false;
    let mut prev: Option<&Token<'_>> = None;
    let mut prev_end: Option<usize> = None;

    for token in tokens {
        if token.is_whitespace() {
            pending_space = true;
            prev_end = Some(token.end());
            continue;
        }
        let comment_gap = prev_end.is_some_and(|end| end < token.offset);
        if comment_gap && prev.is_some_and(|prev| would_merge(prev, token)) {
            pending_space = true;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push_str(token.text);
        prev = Some(token);
        prev_end = Some(token.end());
    }

    out
}

/// Whether `next` written directly after `prev` would re-lex differently.
fn would_merge(prev: &Token<'_>, next: &Token<'_>) -> bool {
    use TokenKind::*;

    match (prev.kind, next.kind) {
        (Ident | Number | Hash | AtKeyword, Ident | Number | Url | Delim('-' | '%' | '\\')) => true,
        (Ident | AtKeyword, OpenParen) => true,
        (Delim('.' | '+' | '-' | '#' | '@'), Ident | Number) => true,
        (Delim('/'), Delim('*')) => true,
        _ => false,
    }
}

/// Splits `tokens` on commas that are not nested in `()` or `[]`.
pub fn split_top_level_commas<'t, 'a>(tokens: &'t [Token<'a>]) -> Vec<&'t [Token<'a>]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpenParen | TokenKind::OpenBracket => depth += 1,
            TokenKind::CloseParen | TokenKind::CloseBracket => depth = depth.saturating_sub(1),
            TokenKind::Comma if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&tokens[start..]);
    parts
}

/// Parses a rule prelude into its selectors, dropping empty segments.
pub fn parse_selector_list(tokens: &[Token<'_>]) -> Vec<Selector> {
    split_top_level_commas(tokens)
        .into_iter()
        .map(join_tokens)
        .filter(|text| !text.is_empty())
        .map(Selector::new)
        .collect()
}
