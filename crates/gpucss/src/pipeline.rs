//! The tokenize → parse → match → inject → render pipeline.

use crate::config::Configuration;
use crate::error::GpuCssError;
use crate::matcher::is_matched;
use crate::parser::parse_stylesheet;
use crate::serializer::{OutputFormat, render_with};
use crate::transform::apply_gpu_properties;

/// Result of a successful run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transformed {
    pub css: String,
    /// Rule blocks seen at any depth.
    pub rules: usize,
    /// Rule blocks that received declarations.
    pub matched: usize,
    /// Declarations appended in total.
    pub injected: usize,
}

/// Transforms `css`, returning it unchanged if it cannot be parsed.
///
/// # Examples
///
/// ```
/// use gpucss::{Configuration, transform};
///
/// let config = Configuration::disabled()
///     .with_transform(true)
///     .with_target_properties(["animation"]);
///
/// let out = transform(".box { animation: fade 1s; }", &config);
/// assert_eq!(out, ".box { animation: fade 1s; transform: translateZ(0); }\n");
///
/// // Unparseable input passes through untouched.
/// assert_eq!(transform(".broken {", &config), ".broken {");
/// ```
pub fn transform(css: &str, config: &Configuration) -> String {
    transform_with(css, config, OutputFormat::Default)
}

/// [`transform`] with a chosen output layout.
pub fn transform_with(css: &str, config: &Configuration, format: OutputFormat) -> String {
    match run(css, config, format) {
        Ok(transformed) => transformed.css,
        Err(err) => {
            log::warn!("leaving stylesheet unchanged: {err}");
            css.to_string()
        }
    }
}

/// Like [`transform`] but reports parse failures instead of passing the
/// input through.
pub fn try_transform(css: &str, config: &Configuration) -> Result<String, GpuCssError> {
    run(css, config, OutputFormat::Default).map(|transformed| transformed.css)
}

/// Runs the whole pipeline and reports counts alongside the output.
pub fn run(
    css: &str,
    config: &Configuration,
    format: OutputFormat,
) -> Result<Transformed, GpuCssError> {
    let mut sheet = parse_stylesheet(css)?;

    let mut rules = 0;
    let mut matched = 0;
    let mut injected = 0;
    for rule in sheet.rules_mut() {
        rules += 1;
        if is_matched(rule, config) {
            matched += 1;
            injected += apply_gpu_properties(rule, config);
            log::trace!("accelerated `{}`", selector_list(&rule.selectors));
        }
    }

    let css = render_with(&sheet, format);
    log::debug!(
        "transformed stylesheet: {rules} rules, {matched} matched, {injected} declarations added"
    );

    Ok(Transformed {
        css,
        rules,
        matched,
        injected,
    })
}

fn selector_list(selectors: &[crate::parser::Selector]) -> String {
    selectors
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
