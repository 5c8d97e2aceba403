//! Rendering a [`Stylesheet`] back to CSS text.
//!
//! Three layouts are available through [`OutputFormat`]. All of them re-parse
//! to the same tree; only whitespace differs.
//!
//! ```text
//! Default:  .a, .b { color: red; top: 0 !important; }
//! Compact:  .a,.b{color:red;top:0!important}
//! Pretty:   .a, .b {
//!               color: red;
//!               top: 0 !important;
//!           }
//! ```

use std::fmt::{self, Write as _};

use crate::parser::{AtRuleBlock, AtRuleBody, AtStatement, Declaration, Node, RuleBlock, Selector, Stylesheet};

const INDENT: &str = "    ";

/// Layout used when rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// One top-level node per line, blocks on a single line.
    #[default]
    Default,
    /// No optional whitespace at all.
    Compact,
    /// Indented blocks, one declaration per line.
    Pretty,
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

/// Renders with [`OutputFormat::Default`].
pub fn render(sheet: &Stylesheet) -> String {
    render_with(sheet, OutputFormat::Default)
}

pub fn render_with(sheet: &Stylesheet, format: OutputFormat) -> String {
    let mut printer = Printer {
        format,
        out: String::new(),
    };
    printer.top_level(&sheet.nodes);
    printer.out
}

struct Printer {
    format: OutputFormat,
    out: String,
}

impl Printer {
    fn top_level(&mut self, nodes: &[Node]) {
        for (i, node) in nodes.iter().enumerate() {
            match self.format {
                OutputFormat::Default => {
                    self.node(node, 0);
                    self.out.push('\n');
                }
                OutputFormat::Compact => self.node(node, 0),
                OutputFormat::Pretty => {
                    if i > 0 {
                        self.out.push('\n');
                    }
                    self.node(node, 0);
                }
            }
        }
    }

    fn node(&mut self, node: &Node, depth: usize) {
        match node {
            Node::Rule(rule) => self.rule(rule, depth),
            Node::AtRule(at_rule) => self.at_rule(at_rule, depth),
            Node::Statement(statement) => self.statement(statement, depth),
        }
    }

    fn indent(&mut self, depth: usize) {
        if self.format == OutputFormat::Pretty {
            for _ in 0..depth {
                self.out.push_str(INDENT);
            }
        }
    }

    fn header(&mut self, name: &str, prelude: &str) {
        self.out.push('@');
        self.out.push_str(name);
        if !prelude.is_empty() {
            self.out.push(' ');
            self.out.push_str(prelude);
        }
    }

    fn statement(&mut self, statement: &AtStatement, depth: usize) {
        self.indent(depth);
        self.header(&statement.name, &statement.prelude);
        self.out.push(';');
        if self.format == OutputFormat::Pretty {
            self.out.push('\n');
        }
    }

    fn rule(&mut self, rule: &RuleBlock, depth: usize) {
        self.indent(depth);
        let separator = match self.format {
            OutputFormat::Compact => ",",
            _ => ", ",
        };
        for (i, selector) in rule.selectors.iter().enumerate() {
            if i > 0 {
                self.out.push_str(separator);
            }
            self.out.push_str(selector.as_str());
        }
        self.declaration_block(&rule.declarations, depth);
    }

    fn at_rule(&mut self, at_rule: &AtRuleBlock, depth: usize) {
        self.indent(depth);
        self.header(&at_rule.name, &at_rule.prelude);

        let children = match &at_rule.body {
            AtRuleBody::Declarations(declarations) => {
                self.declaration_block(declarations, depth);
                return;
            }
            AtRuleBody::Rules(children) => children,
        };

        match self.format {
            OutputFormat::Default => {
                self.out.push_str(" {");
                for child in children {
                    self.out.push(' ');
                    self.node(child, depth + 1);
                }
                self.out.push_str(" }");
            }
            OutputFormat::Compact => {
                self.out.push('{');
                for child in children {
                    self.node(child, depth + 1);
                }
                self.out.push('}');
            }
            OutputFormat::Pretty => {
                self.out.push_str(" {\n");
                for child in children {
                    self.node(child, depth + 1);
                }
                self.indent(depth);
                self.out.push_str("}\n");
            }
        }
    }

    fn declaration_block(&mut self, declarations: &[Declaration], depth: usize) {
        match self.format {
            OutputFormat::Default => {
                self.out.push_str(" {");
                for declaration in declarations {
                    let _ = write!(self.out, " {declaration};");
                }
                self.out.push_str(" }");
            }
            OutputFormat::Compact => {
                self.out.push('{');
                for (i, declaration) in declarations.iter().enumerate() {
                    if i > 0 {
                        self.out.push(';');
                    }
                    self.out.push_str(&declaration.property);
                    self.out.push(':');
                    self.out.push_str(&declaration.value);
                    if declaration.important {
                        self.out.push_str("!important");
                    }
                }
                self.out.push('}');
            }
            OutputFormat::Pretty => {
                self.out.push_str(" {\n");
                for declaration in declarations {
                    self.indent(depth + 1);
                    let _ = writeln!(self.out, "{declaration};");
                }
                self.indent(depth);
                self.out.push_str("}\n");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_stylesheet;

    const SAMPLE: &str = r#"
        @charset "UTF-8";
        .a, .b { color: red; top: 0 !important }
        @media (max-width: 600px) { .c { opacity: 0.5 } }
        @font-face { font-family: "X"; src: url(x.woff2) }
    "#;

    #[test]
    fn declaration_display() {
        assert_eq!(Declaration::new("color", "red").to_string(), "color: red");
        assert_eq!(
            Declaration::new("color", "red").important().to_string(),
            "color: red !important"
        );
    }

    #[test]
    fn render_empty_stylesheet() {
        let sheet = Stylesheet::default();
        for format in [OutputFormat::Default, OutputFormat::Compact, OutputFormat::Pretty] {
            assert_eq!(render_with(&sheet, format), "");
        }
    }

    #[test]
    fn render_empty_rule() {
        let sheet = parse_stylesheet(".a {}").unwrap();
        assert_eq!(render(&sheet), ".a { }\n");
        assert_eq!(render_with(&sheet, OutputFormat::Compact), ".a{}");
    }

    #[test]
    fn render_default_format() {
        let sheet = parse_stylesheet(SAMPLE).unwrap();
        insta::assert_snapshot!(render(&sheet), @r#"
        @charset "UTF-8";
        .a, .b { color: red; top: 0 !important; }
        @media (max-width: 600px) { .c { opacity: 0.5; } }
        @font-face { font-family: "X"; src: url(x.woff2); }
        "#);
    }

    #[test]
    fn render_compact_format() {
        let sheet = parse_stylesheet(SAMPLE).unwrap();
        insta::assert_snapshot!(
            render_with(&sheet, OutputFormat::Compact),
            @r#"@charset "UTF-8";.a,.b{color:red;top:0!important}@media (max-width: 600px){.c{opacity:0.5}}@font-face{font-family:"X";src:url(x.woff2)}"#
        );
    }

    #[test]
    fn render_pretty_format() {
        let sheet = parse_stylesheet(SAMPLE).unwrap();
        insta::assert_snapshot!(render_with(&sheet, OutputFormat::Pretty), @r#"
        @charset "UTF-8";

        .a, .b {
            color: red;
            top: 0 !important;
        }

        @media (max-width: 600px) {
            .c {
                opacity: 0.5;
            }
        }

        @font-face {
            font-family: "X";
            src: url(x.woff2);
        }
        "#);
    }

    #[test]
    fn every_format_reparses_to_the_same_tree() {
        let sheet = parse_stylesheet(SAMPLE).unwrap();
        for format in [OutputFormat::Default, OutputFormat::Compact, OutputFormat::Pretty] {
            let rendered = render_with(&sheet, format);
            assert_eq!(parse_stylesheet(&rendered).unwrap(), sheet, "format {format:?}");
        }
    }

    #[test]
    fn stylesheet_display_uses_default_format() {
        let sheet = parse_stylesheet(".a{color:red}").unwrap();
        assert_eq!(sheet.to_string(), ".a { color: red; }\n");
    }
}
