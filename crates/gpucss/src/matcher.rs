//! Rule selection.
//!
//! A rule block is matched when none of its selectors contains an excluded
//! substring and at least one of its property names contains a target
//! substring. Both checks are plain, case-sensitive substring tests.

use crate::config::Configuration;
use crate::parser::{RuleBlock, Stylesheet};

/// Whether `rule` should receive GPU declarations.
pub fn is_matched(rule: &RuleBlock, config: &Configuration) -> bool {
    !is_excluded(rule, config) && has_target_property(rule, config)
}

/// Any selector contains any exclusion entry.
pub fn is_excluded(rule: &RuleBlock, config: &Configuration) -> bool {
    config.exclude_selectors().iter().any(|exclude| {
        rule.selectors
            .iter()
            .any(|selector| selector.contains(exclude))
    })
}

/// Any declaration property contains any target entry.
pub fn has_target_property(rule: &RuleBlock, config: &Configuration) -> bool {
    rule.declarations.iter().any(|declaration| {
        config
            .target_properties()
            .iter()
            .any(|target| declaration.property.contains(target.as_str()))
    })
}

/// Number of rule blocks in `sheet` that [`is_matched`] accepts.
pub fn matched_rules(sheet: &Stylesheet, config: &Configuration) -> usize {
    sheet
        .rules()
        .into_iter()
        .filter(|rule| is_matched(rule, config))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Declaration, Selector};

    fn rule(selectors: &[&str], properties: &[&str]) -> RuleBlock {
        RuleBlock::new(
            selectors.iter().copied().map(Selector::from).collect(),
            properties
                .iter()
                .map(|p| Declaration::new(*p, "x"))
                .collect(),
        )
    }

    #[test]
    fn matches_on_property_substring() {
        let config = Configuration::disabled().with_target_properties(["animation"]);
        assert!(is_matched(&rule(&[".a"], &["animation-name"]), &config));
        assert!(is_matched(&rule(&[".a"], &["-webkit-animation"]), &config));
        assert!(!is_matched(&rule(&[".a"], &["color"]), &config));
    }

    #[test]
    fn property_match_is_case_sensitive() {
        let config = Configuration::disabled().with_target_properties(["animation"]);
        assert!(!is_matched(&rule(&[".a"], &["ANIMATION"]), &config));
    }

    #[test]
    fn no_targets_matches_nothing() {
        let config = Configuration::disabled();
        assert!(!is_matched(&rule(&[".a"], &["animation"]), &config));
    }

    #[test]
    fn exclusion_wins_over_target() {
        let config = Configuration::disabled()
            .with_target_properties(["animation"])
            .with_exclude_selectors([".no-gpu"]);
        assert!(!is_matched(&rule(&[".card.no-gpu"], &["animation"]), &config));
    }

    #[test]
    fn any_excluded_selector_excludes_the_whole_block() {
        let config = Configuration::disabled()
            .with_target_properties(["transition"])
            .with_exclude_selectors(["#legacy"]);
        assert!(!is_matched(&rule(&[".ok", "#legacy .btn"], &["transition"]), &config));
        assert!(is_matched(&rule(&[".ok", ".btn"], &["transition"]), &config));
    }

    #[test]
    fn empty_exclude_entry_excludes_nothing() {
        let config = Configuration::from_lists("", "animation");
        assert!(!is_excluded(&rule(&[".a"], &["animation"]), &config));
        assert!(is_matched(&rule(&[".a"], &["animation"]), &config));
    }

    #[test]
    fn counts_matches_across_nesting() {
        let sheet = crate::parser::parse_stylesheet(
            ".a { animation: x } @media print { .b { animation: y } .c { color: red } }",
        )
        .unwrap();
        let config = Configuration::disabled().with_target_properties(["animation"]);
        assert_eq!(matched_rules(&sheet, &config), 2);
    }
}
