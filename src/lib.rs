//! # gpu-accelerator
//!
//! Command-line front end and options file handling for [`gpucss`], the
//! stylesheet rewriter that adds GPU compositing hints to animated rules.
//!
//! The engine lives in the `gpucss` crate; this package adds:
//!
//! - [`options`]: the JSON options file (`enable_transform`, `exclude_selectors`, ...)
//! - [`cli`]: argument parsing and parallel processing of input files
//! - [`log_init`]: a line logger for stderr or a log file
//! - [`error`]: the package-level [`Error`]
//!
//! ```rust
//! use gpu_accelerator::{Options, transform};
//!
//! let options = Options::from_json(r#"{ "enable_backface": "no", "enable_perspective": "no" }"#).unwrap();
//! let out = transform(".fade { transition: opacity .3s; }", &options.to_configuration());
//!
//! assert_eq!(
//!     out,
//!     ".fade { transition: opacity .3s; transform: translateZ(0); will-change: transform; }\n"
//! );
//! ```

pub mod cli;
pub mod error;
pub mod log_init;
pub mod options;

pub use error::{Error, Result};
pub use gpucss::{Configuration, OutputFormat, transform, transform_with, try_transform};
pub use options::Options;
