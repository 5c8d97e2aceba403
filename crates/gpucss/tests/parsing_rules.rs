//! Integration tests for rule block parsing.
//!
//! Covers selector lists, declaration values, `!important`, and the
//! structural errors that make the parser give up.

use gpucss::parser::{Declaration, Node, RuleBlock, parse_stylesheet};
use gpucss::{GpuCssError, ParseError};

fn rules(source: &str) -> Vec<RuleBlock> {
    parse_stylesheet(source)
        .unwrap()
        .rules()
        .into_iter()
        .cloned()
        .collect()
}

fn selectors(rule: &RuleBlock) -> Vec<&str> {
    rule.selectors.iter().map(|s| s.as_str()).collect()
}

// ============================================================================
// SELECTORS
// ============================================================================

#[test]
fn test_single_class_selector() {
    let rules = rules(".fade-in { opacity: 1; }");
    assert_eq!(rules.len(), 1);
    assert_eq!(selectors(&rules[0]), vec![".fade-in"]);
}

#[test]
fn test_selector_list_order_is_preserved() {
    let rules = rules("h1, .title,#main>p { color: red }");
    assert_eq!(selectors(&rules[0]), vec!["h1", ".title", "#main>p"]);
}

#[test]
fn test_complex_selectors() {
    let rules = rules(
        r#"
        nav ul > li:not(.active):hover::after,
        a[href^="https://"],
        input[type="checkbox" i]:checked + label { color: red }
        "#,
    );
    assert_eq!(
        selectors(&rules[0]),
        vec![
            "nav ul > li:not(.active):hover::after",
            r#"a[href^="https://"]"#,
            r#"input[type="checkbox" i]:checked + label"#,
        ]
    );
}

#[test]
fn test_escaped_utility_class() {
    let rules = rules(r".md\:hover\:scale-110:hover { transform: scale(1.1) }");
    assert_eq!(selectors(&rules[0]), vec![r".md\:hover\:scale-110:hover"]);
}

#[test]
fn test_multiple_rules_in_order() {
    let rules = rules(".a { color: red } .b { color: blue } .c { color: green }");
    let names: Vec<_> = rules.iter().map(|r| r.selectors[0].as_str()).collect();
    assert_eq!(names, vec![".a", ".b", ".c"]);
}

// ============================================================================
// DECLARATIONS
// ============================================================================

#[test]
fn test_declarations_in_order_with_duplicates() {
    let rules = rules(".a { color: red; color: blue; margin: 0 auto; }");
    assert_eq!(
        rules[0].declarations,
        vec![
            Declaration::new("color", "red"),
            Declaration::new("color", "blue"),
            Declaration::new("margin", "0 auto"),
        ]
    );
}

#[test]
fn test_property_case_is_kept() {
    let rules = rules(".a { Color: Red }");
    assert_eq!(rules[0].declarations[0], Declaration::new("Color", "Red"));
}

#[test]
fn test_function_values() {
    let rules = rules(
        ".a { transform: translate(-50%, -50%) rotate(45deg); width: calc(100% - 2 * var(--gap, 8px)); }",
    );
    assert_eq!(rules[0].declarations[0].value, "translate(-50%, -50%) rotate(45deg)");
    assert_eq!(rules[0].declarations[1].value, "calc(100% - 2 * var(--gap, 8px))");
}

#[test]
fn test_custom_property() {
    let rules = rules(":root { --brand-color: #ff6600; --spacing: 4px }");
    assert_eq!(rules[0].declarations[0], Declaration::new("--brand-color", "#ff6600"));
    assert_eq!(rules[0].declarations[1], Declaration::new("--spacing", "4px"));
}

#[test]
fn test_string_value_with_semicolon_and_braces() {
    let rules = rules(r#".a::before { content: "a; b { c }"; color: red }"#);
    assert_eq!(rules[0].declarations[0].value, r#""a; b { c }""#);
    assert_eq!(rules[0].declarations.len(), 2);
}

#[test]
fn test_unquoted_data_url() {
    let rules = rules(".icon { background: url(data:image/svg+xml;utf8,<svg/>) no-repeat }");
    assert_eq!(
        rules[0].declarations[0].value,
        "url(data:image/svg+xml;utf8,<svg/>) no-repeat"
    );
}

#[test]
fn test_important_flag_is_stripped_from_value() {
    let rules = rules(".a { animation: spin 2s !important; }");
    assert_eq!(
        rules[0].declarations[0],
        Declaration::new("animation", "spin 2s").important()
    );
}

#[test]
fn test_empty_block() {
    let rules = rules(".a { }");
    assert!(rules[0].declarations.is_empty());
}

#[test]
fn test_legacy_hack_property() {
    let rules = rules(".clearfix { *zoom: 1; }");
    assert_eq!(rules[0].declarations[0].property, "*zoom");
}

// ============================================================================
// ERRORS
// ============================================================================

fn parse_error(source: &str) -> ParseError {
    match parse_stylesheet(source) {
        Err(GpuCssError::Parse(err)) => err,
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_error_missing_closing_brace() {
    assert!(matches!(
        parse_error(".broken { transform: ;"),
        ParseError::EmptyValue { .. }
    ));
    assert_eq!(parse_error(".a { color: red"), ParseError::UnclosedBlock(3));
}

#[test]
fn test_error_empty_value() {
    assert_eq!(
        parse_error(".a { color: }"),
        ParseError::EmptyValue {
            property: "color".to_string(),
            offset: 5
        }
    );
}

#[test]
fn test_error_selector_without_block() {
    assert!(matches!(parse_error(".a;"), ParseError::UnexpectedToken { .. }));
}

#[test]
fn test_error_messages_mention_offsets() {
    let err = parse_error(".a { color red }");
    assert_eq!(err.to_string(), "expected `:` after property at byte 5");
}

#[test]
fn test_top_level_node_kinds() {
    let sheet = parse_stylesheet("@import url(a.css); .a { color: red }").unwrap();
    assert!(matches!(sheet.nodes[0], Node::Statement(_)));
    assert!(matches!(sheet.nodes[1], Node::Rule(_)));
}
