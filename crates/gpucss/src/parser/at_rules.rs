//! Recognized at-rules and the shape of their bodies.

/// What may follow an at-rule's prelude.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtRuleKind {
    /// `{` followed by nested rules: `@media`, `@keyframes`, ...
    Rules,
    /// `{` followed by declarations: `@font-face`, `@page`, ...
    Declarations,
    /// Terminated by `;`: `@import`, `@charset`, ...
    Statement,
    /// Either a block of rules or a `;` statement: `@layer`.
    RulesOrStatement,
}

impl AtRuleKind {
    /// Looks up an at-rule name (without `@`), ignoring ASCII case and any
    /// vendor prefix such as `-webkit-`.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        let kind = match strip_vendor_prefix(&name) {
            "media" | "supports" | "document" | "container" | "keyframes" | "scope"
            | "starting-style" => Self::Rules,
            "font-face" | "page" | "counter-style" | "property" | "viewport"
            | "font-palette-values" => Self::Declarations,
            "import" | "charset" | "namespace" => Self::Statement,
            "layer" => Self::RulesOrStatement,
            _ => return None,
        };
        Some(kind)
    }

    pub fn allows_block(self) -> bool {
        !matches!(self, Self::Statement)
    }

    pub fn allows_statement(self) -> bool {
        matches!(self, Self::Statement | Self::RulesOrStatement)
    }
}

/// `-webkit-keyframes` → `keyframes`; names without a prefix pass through.
fn strip_vendor_prefix(name: &str) -> &str {
    name.strip_prefix('-')
        .and_then(|rest| rest.split_once('-'))
        .map(|(_, unprefixed)| unprefixed)
        .unwrap_or(name)
}
