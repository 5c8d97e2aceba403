//! # gpucss - GPU acceleration rewriter for CSS
//!
//! Parses a stylesheet, finds the rule blocks that animate, and appends
//! declarations that promote those elements to their own compositor layer:
//!
//! ```css
//! transform: translateZ(0);
//! will-change: transform;
//! backface-visibility: hidden;
//! perspective: 1000px;
//! ```
//!
//! This crate provides:
//!
//! - **Lexing**: [`lexer`] turns CSS text into tokens, dropping comments
//! - **Parsing**: [`parser`] builds a [`Stylesheet`] of rules and at-rules
//! - **Matching**: [`matcher`] selects rule blocks by selector and property substrings
//! - **Injection**: [`transform`](mod@transform) appends the enabled declarations
//! - **Rendering**: [`serializer`] prints the tree back as CSS
//!
//! ## Quick Start
//!
//! ```rust
//! use gpucss::{Configuration, transform};
//!
//! let config = Configuration::default()
//!     .with_exclude_selectors([".no-gpu"])
//!     .with_target_properties(["animation", "transition"]);
//!
//! let css = r#"
//!     .spinner { animation: spin 1s linear infinite; }
//!     .spinner.no-gpu { animation: none; }
//! "#;
//!
//! let out = transform(css, &config);
//! assert!(out.contains("will-change: transform"));
//! assert!(out.contains(".spinner.no-gpu { animation: none; }"));
//! ```
//!
//! ## Failure policy
//!
//! [`transform`] never fails. If the input cannot be tokenized or parsed, a
//! warning is logged through the `log` facade and the input is returned
//! byte for byte. Use [`try_transform`] to see the error instead.
//!
//! ## Supported Syntax
//!
//! - Rule blocks with comma-separated selector lists
//! - Block at-rules holding rules: `@media`, `@supports`, `@keyframes`
//!   (and vendor-prefixed forms), `@container`, `@layer`, `@document`
//! - Block at-rules holding descriptors: `@font-face`, `@page`, `@property`
//! - Statement at-rules: `@import`, `@charset`, `@namespace`
//! - `!important`, quoted strings, unquoted `url()`
//!
//! Comments are not preserved and CSS nesting inside rule blocks is rejected.

pub mod config;
pub mod error;
pub mod lexer;
pub mod matcher;
pub mod parser;
pub mod pipeline;
pub mod serializer;
pub mod transform;

pub use config::Configuration;
pub use error::{GpuCssError, LexError, ParseError};
pub use parser::{
    AtRuleBlock, AtRuleBody, AtStatement, Declaration, Node, RuleBlock, Selector, Stylesheet,
    parse_stylesheet,
};
pub use pipeline::{Transformed, run, transform, transform_with, try_transform};
pub use serializer::{OutputFormat, render, render_with};
pub use transform::{GpuProperty, apply_gpu_properties};
