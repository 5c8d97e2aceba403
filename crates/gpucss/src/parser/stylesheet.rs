//! Stylesheet tree produced by the parser.

/// One entry of a comma-separated selector list, e.g. `.fade-in`, `0%`, `to`.
///
/// The selector is kept as opaque text with whitespace collapsed to single
/// spaces; it is only ever inspected by substring matching.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selector(String);

impl Selector {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl From<&str> for Selector {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A `property: value` pair, optionally flagged `!important`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    /// Value text with the `!important` suffix removed.
    pub value: String,
    pub important: bool,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
        }
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }
}

/// `selectors { declarations }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleBlock {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

impl RuleBlock {
    pub fn new(selectors: Vec<Selector>, declarations: Vec<Declaration>) -> Self {
        Self {
            selectors,
            declarations,
        }
    }
}

/// Contents of an at-rule's `{}` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AtRuleBody {
    /// `@media`, `@supports`, `@keyframes`, ...: nested rules and at-rules.
    Rules(Vec<Node>),
    /// `@font-face`, `@page`, ...: descriptors written as declarations.
    Declarations(Vec<Declaration>),
}

/// `@name prelude { body }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRuleBlock {
    /// Name as written, without `@` (vendor prefix kept).
    pub name: String,
    /// Everything between the name and `{`, possibly empty.
    pub prelude: String,
    pub body: AtRuleBody,
}

/// `@name prelude;` such as `@import` or `@charset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtStatement {
    pub name: String,
    pub prelude: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    AtRule(AtRuleBlock),
    Rule(RuleBlock),
    Statement(AtStatement),
}

/// A parsed stylesheet: top-level nodes in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Every rule block in document order, at any nesting depth.
    pub fn rules(&self) -> Vec<&RuleBlock> {
        let mut out = Vec::new();
        collect_rules(&self.nodes, &mut out);
        out
    }

    /// Mutable access to every rule block in document order.
    pub fn rules_mut(&mut self) -> Vec<&mut RuleBlock> {
        let mut out = Vec::new();
        collect_rules_mut(&mut self.nodes, &mut out);
        out
    }
}

fn collect_rules<'a>(nodes: &'a [Node], out: &mut Vec<&'a RuleBlock>) {
    for node in nodes {
        match node {
            Node::Rule(rule) => out.push(rule),
            Node::AtRule(at_rule) => {
                if let AtRuleBody::Rules(children) = &at_rule.body {
                    collect_rules(children, out);
                }
            }
            Node::Statement(_) => {}
        }
    }
}

fn collect_rules_mut<'a>(nodes: &'a mut [Node], out: &mut Vec<&'a mut RuleBlock>) {
    for node in nodes {
        match node {
            Node::Rule(rule) => out.push(rule),
            Node::AtRule(at_rule) => {
                if let AtRuleBody::Rules(children) = &mut at_rule.body {
                    collect_rules_mut(children, out);
                }
            }
            Node::Statement(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(selector: &str) -> Node {
        Node::Rule(RuleBlock::new(
            vec![Selector::from(selector)],
            vec![Declaration::new("color", "red")],
        ))
    }

    #[test]
    fn rules_walks_nested_bodies_in_order() {
        let sheet = Stylesheet::new(vec![
            rule(".a"),
            Node::AtRule(AtRuleBlock {
                name: "media".into(),
                prelude: "print".into(),
                body: AtRuleBody::Rules(vec![rule(".b"), rule(".c")]),
            }),
            Node::AtRule(AtRuleBlock {
                name: "font-face".into(),
                prelude: String::new(),
                body: AtRuleBody::Declarations(vec![Declaration::new("font-family", "X")]),
            }),
            rule(".d"),
        ]);

        let selectors: Vec<_> = sheet
            .rules()
            .iter()
            .map(|r| r.selectors[0].as_str())
            .collect();
        assert_eq!(selectors, vec![".a", ".b", ".c", ".d"]);
    }

    #[test]
    fn rules_mut_allows_in_place_edits() {
        let mut sheet = Stylesheet::new(vec![rule(".a"), rule(".b")]);
        for rule in sheet.rules_mut() {
            rule.declarations.clear();
        }
        assert!(sheet.rules().iter().all(|r| r.declarations.is_empty()));
    }

    #[test]
    fn important_builder_sets_flag() {
        let decl = Declaration::new("color", "red").important();
        assert!(decl.important);
        assert_eq!(decl.value, "red");
    }
}
